//! # autoviz-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **diagram JSON API** (`/api/diagram`, `/api/refresh`)
//! - Serve the **dashboard page**: a server-rendered shell whose inline
//!   script polls the API, swaps the container contents, and sequences
//!   responses so a stale one never overwrites a fresher one
//! - Map HTTP requests into refresh-handle calls (driving adapter)
//!
//! ## Dependency rule
//! Depends on `autoviz-app` (refresh handle, renderers) and
//! `autoviz-domain` (envelope type used in response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod page;
pub mod router;
pub mod state;
