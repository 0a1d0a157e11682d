//! # Classifier
//!
//! `AnomalyClassifier` implementations.
//!
//! Detection itself is an external service; [`HttpClassifier`] speaks its
//! protocol (`{"frequency": <number>}` out, `{"anomaly": <boolean>}` back).
//! [`BandClassifier`] is the in-process stand-in for runs without the
//! service: a reading outside the configured normal band is an anomaly.

mod band;
mod http;

pub use band::BandClassifier;
pub use http::HttpClassifier;
