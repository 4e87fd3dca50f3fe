//! # agridash-adapter-backend-reqwest
//!
//! Driven adapter implementing [`DashboardApi`](agridash_app::ports::DashboardApi)
//! over HTTP with [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Build request URLs from a configured base URL
//! - Map transport failures, non-2xx answers and undecodable bodies onto
//!   [`DashboardError`](agridash_domain::error::DashboardError)
//! - Extract the error detail of FastAPI-style (`{"detail": ...}`) and
//!   plain (`{"error": ...}`) error bodies
//!
//! ## Dependency rule
//! Depends on `agridash-app` for the port trait and `agridash-domain` for the
//! wire types. Never leaks reqwest types past its public constructor.

mod client;

pub use client::ReqwestDashboardApi;
