pub mod analysis;
pub mod auth;
pub use auth::AuthService;
pub mod lead_service;
pub use lead_service::LeadService;
pub mod outreach;
pub mod visibility;
