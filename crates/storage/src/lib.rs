//! # Storage
//!
//! `FrequencyStore` implementations.
//!
//! The pipeline persists every normalized reading with a store-assigned
//! timestamp before classification is attempted. Three stores are provided:
//! - [`FileStore`] - append-only JSONL (the durable default)
//! - [`LogStore`] - log-line only, for runs without persistence
//! - [`MemoryStore`] - in-process vector, for tests

mod file;
mod log;
mod memory;
mod record;

pub use crate::log::LogStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::FrequencyRecord;
