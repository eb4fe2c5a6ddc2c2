//! `DiagramResponse` — the JSON envelope returned by the diagram endpoint.
//!
//! Produced fresh on every refresh, consumed once by the client, discarded.
//! Failures travel *inside* the envelope (`success: false` plus a
//! human-readable message) rather than as HTTP errors.

use serde::{Deserialize, Serialize};

/// Message used when the upstream yields nothing.
pub const NO_AUTOMATIONS_MESSAGE: &str =
    "No automations found or cannot connect to Home Assistant";

/// JSON wrapper carrying the rendered markup, item count, and outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramResponse {
    pub success: bool,
    /// Card markup, present in the card-based variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Flowchart markup, present in the SVG variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DiagramResponse {
    /// Successful card-based envelope.
    #[must_use]
    pub fn cards(html: String, count: usize) -> Self {
        Self {
            success: true,
            html: Some(html),
            svg: None,
            count: Some(count),
            message: None,
        }
    }

    /// Successful flowchart envelope.
    #[must_use]
    pub fn flowchart(svg: String, count: usize) -> Self {
        Self {
            success: true,
            html: None,
            svg: Some(svg),
            count: Some(count),
            message: None,
        }
    }

    /// Logical failure with a human-readable message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            html: None,
            svg: None,
            count: None,
            message: Some(message.into()),
        }
    }

    /// Whichever markup field is populated.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.html.as_deref().or(self.svg.as_deref())
    }
}
