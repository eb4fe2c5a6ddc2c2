//! # autoviz-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`AutomationSource`** port that adapters implement
//!   (driven/outbound port)
//! - Render automation lists into diagram markup (HTML cards or an SVG
//!   flowchart)
//! - Build the [`DiagramResponse`](autoviz_domain::diagram::DiagramResponse)
//!   envelope via [`services::diagram_service::DiagramService`]
//! - Drive the periodic **refresh loop** and publish snapshots with
//!   monotonically increasing sequence numbers
//!
//! ## Dependency rule
//! Depends on `autoviz-domain` only (plus `tokio::sync`/`tokio::time` for
//! channels and timers). Never imports adapter crates. Adapters depend on
//! *this* crate, not the reverse.

pub mod ports;
pub mod refresh;
pub mod render;
pub mod services;
