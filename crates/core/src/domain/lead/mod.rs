pub mod follow_ups;
pub mod labels;
pub mod layout;
pub mod lead;
pub mod remarks;
pub mod row_mapper;

pub use lead::Lead;
