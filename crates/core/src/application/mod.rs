pub mod lead_service;
