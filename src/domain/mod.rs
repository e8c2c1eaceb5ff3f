// Domain layer - Core types, grammars and policies

pub mod errors;
pub mod model;
pub mod rules;
