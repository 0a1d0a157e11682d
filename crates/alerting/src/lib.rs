//! # Alerting
//!
//! `AlertTransport` implementations.
//!
//! The pipeline renders one fixed-template notification per flagged reading
//! (`AlertMessage::anomaly`) and hands it to a transport. Failures are
//! logged by the caller and never retried.

mod log;
mod smtp;

pub use crate::log::LogTransport;
pub use smtp::SmtpAlerter;
