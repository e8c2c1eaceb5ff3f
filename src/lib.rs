//! ffmpeg-cut library
//!
//! An ffmpeg wrapper that cuts time ranges out of videos, optionally crops
//! and filters them, writes a concat manifest describing every clip and joins
//! the clips back into one output.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod filters;
pub mod instructions;
pub mod manifest;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, DomainResult, ManifestWarning};
pub use domain::model::{Clip, ClipLedger, Cut, FilterFragment, Instruction, RunConfig, RunMode};
