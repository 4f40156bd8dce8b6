pub mod clock;
pub mod config;
pub mod memory_store;
pub mod sheets;
