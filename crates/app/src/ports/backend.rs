//! Backend port: the monitoring service's HTTP API.

use std::future::Future;
use std::sync::Arc;

use agridash_domain::error::DashboardError;
use agridash_domain::history::{HistoryLimit, HistoryRecord};
use agridash_domain::pump::{PumpCommand, PumpReply, PumpStatus};
use agridash_domain::readings::CurrentReadings;
use agridash_domain::stats::StatsEnvelope;
use agridash_domain::status::SystemStatus;

/// Read and command access to the monitoring backend.
///
/// Every method maps to one request. Implementations must report non-2xx
/// answers as [`DashboardError::Status`] and undecodable bodies as
/// [`DashboardError::Decode`]; they never retry.
pub trait DashboardApi: Send + Sync {
    /// `GET /api/data`
    fn current_readings(
        &self,
    ) -> impl Future<Output = Result<CurrentReadings, DashboardError>> + Send;

    /// `GET /api/pump/status`
    fn pump_status(&self) -> impl Future<Output = Result<PumpStatus, DashboardError>> + Send;

    /// `POST /api/pump/on` or `POST /api/pump/off`
    fn send_pump_command(
        &self,
        command: PumpCommand,
    ) -> impl Future<Output = Result<PumpReply, DashboardError>> + Send;

    /// `GET /api/history?limit=N`
    fn history(
        &self,
        limit: HistoryLimit,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, DashboardError>> + Send;

    /// `GET /api/stats`
    fn stats(&self) -> impl Future<Output = Result<StatsEnvelope, DashboardError>> + Send;

    /// `GET /api/status`
    fn system_status(&self) -> impl Future<Output = Result<SystemStatus, DashboardError>> + Send;
}

impl<T: DashboardApi> DashboardApi for Arc<T> {
    fn current_readings(
        &self,
    ) -> impl Future<Output = Result<CurrentReadings, DashboardError>> + Send {
        (**self).current_readings()
    }

    fn pump_status(&self) -> impl Future<Output = Result<PumpStatus, DashboardError>> + Send {
        (**self).pump_status()
    }

    fn send_pump_command(
        &self,
        command: PumpCommand,
    ) -> impl Future<Output = Result<PumpReply, DashboardError>> + Send {
        (**self).send_pump_command(command)
    }

    fn history(
        &self,
        limit: HistoryLimit,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, DashboardError>> + Send {
        (**self).history(limit)
    }

    fn stats(&self) -> impl Future<Output = Result<StatsEnvelope, DashboardError>> + Send {
        (**self).stats()
    }

    fn system_status(&self) -> impl Future<Output = Result<SystemStatus, DashboardError>> + Send {
        (**self).system_status()
    }
}
