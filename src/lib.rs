//! Versor - quaternion rotation explorer
//!
//! Layered configuration and report formatting around [`versor_math`].

pub mod config;
pub mod report;

pub use versor_math;
