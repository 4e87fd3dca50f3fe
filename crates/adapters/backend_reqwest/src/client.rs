//! reqwest-backed implementation of the backend port.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use agridash_app::ports::DashboardApi;
use agridash_domain::error::DashboardError;
use agridash_domain::history::{HistoryLimit, HistoryRecord};
use agridash_domain::pump::{PumpCommand, PumpReply, PumpStatus};
use agridash_domain::readings::CurrentReadings;
use agridash_domain::stats::StatsEnvelope;
use agridash_domain::status::SystemStatus;

/// Error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// `/api/pump/status` as sent on the wire; `is_on` is checked explicitly.
#[derive(Deserialize)]
struct PumpStatusBody {
    is_on: Option<bool>,
    #[serde(default)]
    pin: Option<u8>,
}

/// HTTP client for the monitoring backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestDashboardApi {
    http_client: Client,
    base_url: String,
}

impl ReqwestDashboardApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// Requests have no deadline unless `timeout` is given.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DashboardError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(DashboardError::transport)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        tracing::trace!(path, "GET");
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(DashboardError::transport)?;
        decode(path, response).await
    }
}

/// Check the HTTP status, then decode the JSON body.
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, DashboardError> {
    let status = response.status();
    let body = response.bytes().await.map_err(DashboardError::transport)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.detail.or(body.error));
        tracing::debug!(path, status = status.as_u16(), detail = ?message, "backend error response");
        return Err(DashboardError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|err| {
        tracing::debug!(
            path,
            error = %err,
            body_preview = %String::from_utf8_lossy(&body).chars().take(200).collect::<String>(),
            "failed to parse backend response"
        );
        DashboardError::Decode(err)
    })
}

impl DashboardApi for ReqwestDashboardApi {
    async fn current_readings(&self) -> Result<CurrentReadings, DashboardError> {
        self.get_json("/api/data").await
    }

    async fn pump_status(&self) -> Result<PumpStatus, DashboardError> {
        let body: PumpStatusBody = self.get_json("/api/pump/status").await?;
        let is_on = body.is_on.ok_or(DashboardError::MissingField("is_on"))?;
        Ok(PumpStatus {
            is_on,
            pin: body.pin,
        })
    }

    async fn send_pump_command(&self, command: PumpCommand) -> Result<PumpReply, DashboardError> {
        let path = command.action().path();
        tracing::trace!(path, "POST");
        let response = self
            .http_client
            .post(self.url(path))
            .json(&command.body())
            .send()
            .await
            .map_err(DashboardError::transport)?;
        decode(path, response).await
    }

    async fn history(&self, limit: HistoryLimit) -> Result<Vec<HistoryRecord>, DashboardError> {
        self.get_json(&format!("/api/history?limit={limit}")).await
    }

    async fn stats(&self) -> Result<StatsEnvelope, DashboardError> {
        self.get_json("/api/stats").await
    }

    async fn system_status(&self) -> Result<SystemStatus, DashboardError> {
        self.get_json("/api/status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agridash_domain::pump::PumpAction;
    use agridash_domain::readings::SensorValue;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client(router: Router) -> ReqwestDashboardApi {
        ReqwestDashboardApi::new(&serve(router).await, None).unwrap()
    }

    #[tokio::test]
    async fn should_decode_current_readings_with_nulls() {
        let api = client(Router::new().route(
            "/api/data",
            get(|| async { Json(json!({"temp": 23.4, "hum": null, "soil": 455, "light": 700})) }),
        ))
        .await;

        let readings = api.current_readings().await.unwrap();

        assert_eq!(readings.temp, Some(SensorValue::Number(23.4)));
        assert_eq!(readings.hum, None);
        assert_eq!(readings.soil, Some(SensorValue::Number(455.0)));
    }

    #[tokio::test]
    async fn should_capture_fastapi_detail_on_error_status() {
        let api = client(Router::new().route(
            "/api/data",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "serial port closed"})),
                )
            }),
        ))
        .await;

        let err = api.current_readings().await.unwrap_err();

        match err {
            DashboardError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("serial port closed"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_capture_plain_error_body() {
        let api = client(Router::new().route(
            "/api/stats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "busy"}))) }),
        ))
        .await;

        let err = api.stats().await.unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Status { status: 503, message: Some(ref m) } if m == "busy"
        ));
    }

    #[tokio::test]
    async fn should_report_status_without_message_for_unknown_route() {
        let api = client(Router::new()).await;

        let err = api.stats().await.unwrap_err();

        assert!(matches!(err, DashboardError::Status { status: 404, message: None }));
    }

    #[tokio::test]
    async fn should_report_decode_error_for_malformed_json() {
        let api = client(Router::new().route("/api/data", get(|| async { "not json" }))).await;

        let err = api.current_readings().await.unwrap_err();

        assert!(matches!(err, DashboardError::Decode(_)));
    }

    #[tokio::test]
    async fn should_report_missing_pump_state() {
        let api = client(Router::new().route(
            "/api/pump/status",
            get(|| async { Json(json!({"pin": 17})) }),
        ))
        .await;

        let err = api.pump_status().await.unwrap_err();

        assert!(matches!(err, DashboardError::MissingField("is_on")));
    }

    #[tokio::test]
    async fn should_report_transport_error_when_backend_is_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = ReqwestDashboardApi::new(&format!("http://{addr}"), None).unwrap();

        let err = api.pump_status().await.unwrap_err();

        assert!(matches!(err, DashboardError::Transport(_)));
    }

    #[tokio::test]
    async fn should_post_duration_to_pump_on() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let api = client(Router::new().route(
            "/api/pump/on",
            post(move |Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().unwrap().push(body);
                    Json(json!({"success": true, "message": "Pump turned ON for 30 seconds"}))
                }
            }),
        ))
        .await;

        let reply = api
            .send_pump_command(PumpCommand::new(PumpAction::On, Some(30)))
            .await
            .unwrap();

        assert_eq!(reply.message, "Pump turned ON for 30 seconds");
        assert_eq!(*seen.lock().unwrap(), vec![json!({"duration": 30})]);
    }

    #[tokio::test]
    async fn should_post_empty_object_to_pump_off() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let api = client(Router::new().route(
            "/api/pump/off",
            post(move |Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().unwrap().push(body);
                    Json(json!({"success": true, "message": "Pump turned OFF"}))
                }
            }),
        ))
        .await;

        api.send_pump_command(PumpCommand::new(PumpAction::Off, None))
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![json!({})]);
    }

    #[tokio::test]
    async fn should_send_limit_and_accept_string_fields_in_history() {
        let api = client(Router::new().route(
            "/api/history",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                let limit = query.get("limit").cloned().unwrap_or_default();
                Json(json!([{
                    "timestamp": "2024-03-05 14:07:00",
                    "temp": "21.5",
                    "humidity": "55.0",
                    "soil_moisture": "450",
                    "light_level": limit,
                    "pump_status": "OFF"
                }]))
            }),
        ))
        .await;

        let records = api.history(HistoryLimit::new(300)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].light_level, json!("300"));
    }

    #[tokio::test]
    async fn should_decode_stats_envelope() {
        let api = client(Router::new().route(
            "/api/stats",
            get(|| async {
                Json(json!({
                    "success": true,
                    "message": "Statistics retrieved",
                    "data": {
                        "total_records": 120,
                        "avg_temperature": 21.37,
                        "min_temperature": 18.2,
                        "max_temperature": 26.9,
                        "avg_soil_moisture": 455.0
                    }
                }))
            }),
        ))
        .await;

        let summary = api.stats().await.unwrap().into_summary().unwrap();

        assert_eq!(summary.total_records, Some(120));
        assert_eq!(summary.avg_temperature, Some(21.37));
    }

    #[test]
    fn should_trim_trailing_slash_from_base_url() {
        let api = ReqwestDashboardApi::new("http://plant.local:8000/", None).unwrap();

        assert_eq!(api.base_url(), "http://plant.local:8000");
        assert_eq!(api.url("/api/data"), "http://plant.local:8000/api/data");
    }
}
