pub mod analysis;
pub mod bulk;
pub mod lead;
pub mod user;
