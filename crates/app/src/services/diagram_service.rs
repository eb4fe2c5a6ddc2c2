//! Diagram service — fetch automations, render markup, wrap in the envelope.

use autoviz_domain::diagram::{DiagramResponse, NO_AUTOMATIONS_MESSAGE};

use crate::ports::AutomationSource;
use crate::render::{self, RenderMode};

/// Builds a fresh [`DiagramResponse`] from the configured source.
///
/// Source failures are logged and reported as a logical failure inside
/// the envelope; this service never returns an error.
pub struct DiagramService<S> {
    source: S,
    mode: RenderMode,
}

impl<S: AutomationSource> DiagramService<S> {
    /// Create a new service backed by the given automation source.
    pub fn new(source: S, mode: RenderMode) -> Self {
        Self { source, mode }
    }

    /// Fetch the automation list and render it into an envelope.
    #[tracing::instrument(skip(self))]
    pub async fn build_diagram(&self) -> DiagramResponse {
        let automations = match self.source.fetch_automations().await {
            Ok(automations) => automations,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch automations");
                Vec::new()
            }
        };

        if automations.is_empty() {
            return DiagramResponse::failure(NO_AUTOMATIONS_MESSAGE);
        }

        tracing::info!(count = automations.len(), "rendering automation diagram");
        match self.mode {
            RenderMode::Cards => {
                DiagramResponse::cards(render::cards::render(&automations), automations.len())
            }
            RenderMode::Flowchart => DiagramResponse::flowchart(
                render::flowchart::render(&automations),
                automations.len(),
            ),
        }
    }
}
