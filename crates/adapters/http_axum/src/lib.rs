//! # agridash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Provide [`LivePage`](page::LivePage), the in-memory display model the
//!   application services write into (driven side of the view port)
//! - Serve that model as a **server-side-rendered HTML page** that works with
//!   **zero JavaScript**
//! - Serve the current history charts as SVG images
//! - Map form submissions into application service calls (driving adapter)
//!
//! ## No-JS dashboard approach
//! - The page is rendered server-side as complete HTML on every request and
//!   carries every display element ID the stylesheet expects.
//! - Pump buttons and the range selector are `<form>` elements that POST
//!   back to the server and redirect (PRG pattern).
//! - `<meta http-equiv="refresh">` reloads the page on the live polling
//!   period, so the values follow the background poller.
//!
//! ## Dependency rule
//! Depends on `agridash-app` (for port traits and services) and
//! `agridash-domain` (for display types). Never leaks axum types into the
//! domain.

pub mod dashboard;
pub mod error;
pub mod page;
pub mod router;
pub mod state;
