//! Telemetry and structured logging components for DefectScan.
//!
//! Handles console plus rolling JSON file output, and scrubs provider
//! credentials from text before it reaches a log line.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
