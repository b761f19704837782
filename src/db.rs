pub mod store;
pub use store::{LeadStore, UserStore};
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

#[cfg(test)]
pub mod memory;
