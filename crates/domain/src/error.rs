//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`VizError`]
//! at the seam, keeping adapter crates (reqwest, serde_yaml, …) out of the
//! domain's dependency tree.

/// Top-level error type crossing the port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// The automation source could not produce a configuration list.
    #[error("automation source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl VizError {
    /// Wrap an adapter error as a source failure.
    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}
