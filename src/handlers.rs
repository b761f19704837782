pub mod analysis;
pub mod leads;
pub mod users;
