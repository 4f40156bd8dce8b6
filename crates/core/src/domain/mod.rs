pub mod lead;
pub mod sheets;
