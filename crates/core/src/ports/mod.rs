pub mod clock;
pub mod lead_store;
