//! Live service: current readings, pump status, pump control and the
//! connection badge.

use std::sync::{Mutex, PoisonError};

use agridash_domain::connection::ConnectionState;
use agridash_domain::error::DashboardError;
use agridash_domain::notification::Notification;
use agridash_domain::pump::{INDICATOR_ON_CLASS, PumpAction, PumpCommand, PumpReply, PumpStatus};
use agridash_domain::view::ElementId;

use crate::ports::{DashboardApi, DashboardView, Notifier};

/// Message shown when a pump command fails for any reason.
pub const PUMP_FAILURE_MESSAGE: &str = "Failed to control pump";

/// Application service behind the 2-second polling cycle and the pump buttons.
pub struct LiveService<A, V, N> {
    api: A,
    view: V,
    notifier: N,
    connection: Mutex<ConnectionState>,
}

impl<A, V, N> LiveService<A, V, N>
where
    A: DashboardApi,
    V: DashboardView,
    N: Notifier,
{
    /// Create a new service. The connection starts out disconnected.
    pub fn new(api: A, view: V, notifier: N) -> Self {
        Self {
            api,
            view,
            notifier,
            connection: Mutex::new(ConnectionState::Disconnected),
        }
    }

    /// Outcome of the most recent [`update_data`](Self::update_data).
    pub fn connection(&self) -> ConnectionState {
        *self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the connection badge.
    pub fn show_connection(&self, state: ConnectionState) {
        self.view.set_text(ElementId::ConnectionStatus, state.label());
        self.view
            .set_class(ElementId::ConnectionStatus, state.css_class(), true);
        self.view
            .set_class(ElementId::ConnectionStatus, state.opposite_class(), false);
    }

    /// One polling cycle.
    ///
    /// On success the four reading elements are rewritten and the pump
    /// status is refreshed before the badge turns connected. Any failure
    /// leaves the readings as they were and turns the badge disconnected.
    pub async fn update_data(&self) -> ConnectionState {
        let state = match self.api.current_readings().await {
            Ok(readings) => {
                for (element, text) in readings.display_values() {
                    self.view.set_text(element, &text);
                }
                self.update_pump_status().await;
                ConnectionState::Connected
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch current readings");
                ConnectionState::Disconnected
            }
        };

        *self.connection.lock().unwrap_or_else(PoisonError::into_inner) = state;
        self.show_connection(state);
        state
    }

    /// Refresh the pump indicator. Failures are logged and leave the
    /// indicator and the connection badge untouched.
    pub async fn update_pump_status(&self) -> Option<PumpStatus> {
        match self.api.pump_status().await {
            Ok(status) => {
                self.view
                    .set_class(ElementId::PumpIndicator, INDICATOR_ON_CLASS, status.is_on);
                self.view.set_text(ElementId::PumpStatusText, status.label());
                self.view.set_color(ElementId::PumpStatusText, status.color());
                Some(status)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch pump status");
                None
            }
        }
    }

    /// Switch the pump, optionally with an auto-off duration in seconds.
    ///
    /// The backend's message is shown as a success notification and the pump
    /// indicator is refreshed before this returns.
    ///
    /// # Errors
    ///
    /// Returns the [`DashboardError`] of the command request after showing
    /// an error notification.
    pub async fn pump_control(
        &self,
        action: PumpAction,
        duration_secs: Option<u32>,
    ) -> Result<PumpReply, DashboardError> {
        let command = PumpCommand::new(action, duration_secs);
        tracing::info!(%action, duration_secs = ?command.duration_secs(), "sending pump command");

        match self.api.send_pump_command(command).await {
            Ok(reply) => {
                self.notifier.notify(Notification::success(reply.message.clone()));
                self.update_pump_status().await;
                Ok(reply)
            }
            Err(err) => {
                tracing::error!(%action, error = %err, "pump command failed");
                self.notifier.notify(Notification::error(PUMP_FAILURE_MESSAGE));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeApi, RecordingNotifier, RecordingView, readings, unavailable};
    use agridash_domain::notification::NotificationLevel;
    use agridash_domain::pump::{PUMP_OFF_COLOR, PUMP_ON_COLOR};
    use agridash_domain::readings::{CurrentReadings, SensorValue};
    use std::sync::Arc;

    type Service = LiveService<Arc<FakeApi>, Arc<RecordingView>, Arc<RecordingNotifier>>;

    fn service() -> (Service, Arc<FakeApi>, Arc<RecordingView>, Arc<RecordingNotifier>) {
        let api = Arc::new(FakeApi::default());
        let view = Arc::new(RecordingView::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LiveService::new(Arc::clone(&api), Arc::clone(&view), Arc::clone(&notifier));
        (service, api, view, notifier)
    }

    fn on() -> PumpStatus {
        PumpStatus { is_on: true, pin: None }
    }

    #[tokio::test]
    async fn should_render_readings_with_one_decimal() {
        let (service, api, view, _) = service();
        api.push_current(Ok(readings(23.456, 61.0, 455.0, 712.26)));
        api.push_pump(Ok(on()));

        service.update_data().await;

        assert_eq!(view.text(ElementId::TempValue).as_deref(), Some("23.5"));
        assert_eq!(view.text(ElementId::HumValue).as_deref(), Some("61.0"));
        assert_eq!(view.text(ElementId::SoilValue).as_deref(), Some("455.0"));
        assert_eq!(view.text(ElementId::LightValue).as_deref(), Some("712.3"));
    }

    #[tokio::test]
    async fn should_render_placeholder_for_missing_readings() {
        let (service, api, view, _) = service();
        api.push_current(Ok(CurrentReadings {
            temp: Some(SensorValue::Number(20.0)),
            ..CurrentReadings::default()
        }));

        service.update_data().await;

        assert_eq!(view.text(ElementId::TempValue).as_deref(), Some("20.0"));
        assert_eq!(view.text(ElementId::HumValue).as_deref(), Some("--"));
        assert_eq!(view.text(ElementId::SoilValue).as_deref(), Some("--"));
        assert_eq!(view.text(ElementId::LightValue).as_deref(), Some("--"));
    }

    #[tokio::test]
    async fn should_track_most_recent_attempt_on_badge() {
        let (service, api, view, _) = service();
        api.push_current(Ok(readings(20.0, 50.0, 400.0, 600.0)));
        api.push_current(Err(unavailable()));
        api.push_current(Ok(readings(20.0, 50.0, 400.0, 600.0)));
        api.push_current(Err(unavailable()));

        for expected in [
            ConnectionState::Connected,
            ConnectionState::Disconnected,
            ConnectionState::Connected,
            ConnectionState::Disconnected,
        ] {
            assert_eq!(service.update_data().await, expected);
            assert_eq!(service.connection(), expected);
            assert_eq!(
                view.text(ElementId::ConnectionStatus).as_deref(),
                Some(expected.label())
            );
            assert!(view.has_class(ElementId::ConnectionStatus, expected.css_class()));
            assert!(!view.has_class(ElementId::ConnectionStatus, expected.opposite_class()));
        }
    }

    #[tokio::test]
    async fn should_keep_previous_readings_when_fetch_fails() {
        let (service, api, view, _) = service();
        api.push_current(Ok(readings(21.0, 50.0, 400.0, 600.0)));
        service.update_data().await;

        api.push_current(Err(unavailable()));
        service.update_data().await;

        assert_eq!(view.text(ElementId::TempValue).as_deref(), Some("21.0"));
    }

    #[tokio::test]
    async fn should_stay_connected_when_only_pump_status_fails() {
        let (service, api, view, _) = service();
        api.push_current(Ok(readings(21.0, 50.0, 400.0, 600.0)));

        let state = service.update_data().await;

        assert_eq!(state, ConnectionState::Connected);
        assert_eq!(view.text(ElementId::PumpStatusText), None);
        assert_eq!(api.calls(), vec![Call::Current, Call::PumpStatus]);
    }

    #[tokio::test]
    async fn should_skip_pump_status_when_readings_fail() {
        let (service, api, _, _) = service();

        service.update_data().await;

        assert_eq!(api.calls(), vec![Call::Current]);
    }

    #[tokio::test]
    async fn should_show_pump_state_on_indicator() {
        let (service, api, view, _) = service();
        api.push_pump(Ok(on()));
        api.push_pump(Ok(PumpStatus { is_on: false, pin: Some(17) }));

        service.update_pump_status().await;
        assert!(view.has_class(ElementId::PumpIndicator, "on"));
        assert_eq!(view.text(ElementId::PumpStatusText).as_deref(), Some("ON"));
        assert_eq!(view.color(ElementId::PumpStatusText), Some(PUMP_ON_COLOR));

        service.update_pump_status().await;
        assert!(!view.has_class(ElementId::PumpIndicator, "on"));
        assert_eq!(view.text(ElementId::PumpStatusText).as_deref(), Some("OFF"));
        assert_eq!(view.color(ElementId::PumpStatusText), Some(PUMP_OFF_COLOR));
    }

    #[tokio::test]
    async fn should_send_duration_and_refresh_status_after_pump_on() {
        let (service, api, view, notifier) = service();
        api.push_reply(Ok(PumpReply {
            message: "Pump turned ON for 30 seconds".to_string(),
            success: Some(true),
        }));
        api.push_pump(Ok(on()));

        let reply = service.pump_control(PumpAction::On, Some(30)).await.unwrap();

        assert_eq!(reply.message, "Pump turned ON for 30 seconds");
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::PumpCommand(command) => {
                assert_eq!(command.action(), PumpAction::On);
                assert_eq!(
                    serde_json::to_value(command.body()).unwrap(),
                    serde_json::json!({"duration": 30})
                );
            }
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(calls[1], Call::PumpStatus);
        assert_eq!(view.text(ElementId::PumpStatusText).as_deref(), Some("ON"));

        let seen = notifier.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, NotificationLevel::Success);
        assert_eq!(seen[0].message, "Pump turned ON for 30 seconds");
    }

    #[tokio::test]
    async fn should_send_empty_body_for_pump_off() {
        let (service, api, _, _) = service();
        api.push_reply(Ok(PumpReply {
            message: "Pump turned OFF".to_string(),
            success: None,
        }));

        service.pump_control(PumpAction::Off, Some(30)).await.unwrap();

        match &api.calls()[0] {
            Call::PumpCommand(command) => {
                assert_eq!(command.action(), PumpAction::Off);
                assert_eq!(serde_json::to_value(command.body()).unwrap(), serde_json::json!({}));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_notify_error_when_pump_command_fails() {
        let (service, api, _, notifier) = service();

        let result = service.pump_control(PumpAction::On, None).await;

        assert!(matches!(result, Err(DashboardError::Status { status: 503, .. })));
        assert_eq!(api.calls().len(), 1);
        let seen = notifier.seen();
        assert_eq!(seen[0].level, NotificationLevel::Error);
        assert_eq!(seen[0].message, PUMP_FAILURE_MESSAGE);
    }
}
