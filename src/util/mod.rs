pub mod api;
pub mod config;
pub mod log;
pub mod session;
pub mod string;
