//! # Runner
//!
//! The six-stage pipeline runner.
//!
//! Consumes one message at a time per assigned partition and runs, in
//! order: parse, normalize, persist, export gauge, classify, conditional
//! alert, acknowledge. Partitions are processed concurrently relative to
//! each other; within a partition, one message completes all stages before
//! the next begins.
//!
//! Collaborators are injected at construction; the runner owns no ambient
//! state. Collaborator failures degrade the message (log + counter), never
//! the pipeline.

mod counters;
mod runner;
mod worker;

pub use counters::{RunnerCounters, RunnerSnapshot};
pub use runner::{drain_workers, PipelineRunner, RunnerConfig};
pub use worker::StageOutcome;
