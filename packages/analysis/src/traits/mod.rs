//! Trait abstractions for external collaborators.

pub mod model;
pub mod renderer;
pub mod store;

pub use model::EthicsModel;
pub use renderer::{PageRenderer, RenderedPage};
pub use store::{AnalysisStore, ResultCache, ResultStore};
