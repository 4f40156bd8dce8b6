// Public API exports
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export key types for easy access
pub use application::lead_service::{LeadService, LeadServiceError};
pub use domain::lead::Lead;
