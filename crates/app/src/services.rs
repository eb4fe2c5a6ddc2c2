//! Application services.

pub mod diagram_service;
