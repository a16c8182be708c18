pub mod backend;
pub mod config_service;
pub mod export_service;
pub mod session_service;
pub mod workspace;
