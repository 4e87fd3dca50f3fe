//! # agridash-domain
//!
//! Pure domain model for the agridash monitoring dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, display element identifiers
//! - Define the **backend payloads** (current readings, pump status, history
//!   records, statistics, system status) and their lenient decoding
//! - Define **display formatting** (one-decimal readings, `--` placeholders,
//!   stat items, chart labels)
//! - Define **chart specifications** for the two history charts
//! - Define the **connection state machine** and **notifications**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;
pub mod view;

pub mod chart;
pub mod connection;
pub mod history;
pub mod notification;
pub mod pump;
pub mod readings;
pub mod stats;
pub mod status;
