//! Pulseboard Common
//!
//! Infrastructure shared by every Pulseboard crate and binary.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};
