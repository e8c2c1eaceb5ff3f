// Application layer - Use case interactors

pub mod clip_interactor;
pub mod container;
pub mod join_interactor;
pub mod run_interactor;

// Re-export interactors
pub use clip_interactor::{ClipInteractor, CutOutcome};
pub use container::{AppContainer, DefaultAppContainer};
pub use join_interactor::JoinInteractor;
pub use run_interactor::RunInteractor;
