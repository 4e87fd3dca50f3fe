//! # agridash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DashboardApi`: the monitoring backend's HTTP API
//!   - `DashboardView`: the display elements of the dashboard
//!   - `ChartRenderer` / `ChartHandle`: drawing and releasing charts
//!   - `Notifier`: transient user-facing messages
//! - Define **driving/inbound ports** as use-case structs:
//!   - `LiveService`: current readings, pump status, pump control, connection badge
//!   - `HistoryService`: history window and the two charts
//!   - `StatsService`: the statistics block
//!   - `Dashboard`: startup/shutdown sequence and periodic refresh
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (chart registry, periodic tasks, toast board)
//!
//! ## Dependency rule
//! Depends on `agridash-domain` only (plus `tokio` for timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod chart_registry;
pub mod dashboard;
pub mod ports;
pub mod scheduler;
pub mod services;
pub mod toast;

#[cfg(test)]
pub(crate) mod test_support;
