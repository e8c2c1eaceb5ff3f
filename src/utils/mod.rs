//! Common utilities and helpers

pub mod path;
pub mod shell;
