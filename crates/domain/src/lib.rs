//! # autoviz-domain
//!
//! Pure domain model for the autoviz Home Assistant automation visualizer.
//!
//! ## Responsibilities
//! - Model **Automations** as Home Assistant describes them: loosely typed
//!   trigger → condition → action configuration blocks
//! - Define the **`DiagramResponse`** envelope returned by the diagram API
//! - Foundational types: error conventions, timestamps
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod automation;
pub mod diagram;
pub mod error;
pub mod time;
