//! In-memory fakes of every port, shared by the service tests.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use agridash_domain::chart::ChartSpec;
use agridash_domain::error::{ChartError, DashboardError};
use agridash_domain::history::{HistoryLimit, HistoryRecord};
use agridash_domain::notification::Notification;
use agridash_domain::pump::{PumpCommand, PumpReply, PumpStatus};
use agridash_domain::readings::{CurrentReadings, SensorValue};
use agridash_domain::stats::{StatItem, StatsEnvelope};
use agridash_domain::status::SystemStatus;
use agridash_domain::view::{CanvasId, ElementId, Rgb};

use crate::ports::{ChartHandle, ChartRenderer, DashboardApi, DashboardView, Notifier};

/// A request observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Current,
    PumpStatus,
    PumpCommand(PumpCommand),
    History(HistoryLimit),
    Stats,
    SystemStatus,
}

pub fn unavailable() -> DashboardError {
    DashboardError::Status {
        status: 503,
        message: None,
    }
}

pub fn readings(temp: f64, hum: f64, soil: f64, light: f64) -> CurrentReadings {
    CurrentReadings {
        temp: Some(SensorValue::Number(temp)),
        hum: Some(SensorValue::Number(hum)),
        soil: Some(SensorValue::Number(soil)),
        light: Some(SensorValue::Number(light)),
        timestamp: None,
    }
}

pub fn history_rows(count: usize) -> Vec<HistoryRecord> {
    (0..count)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "timestamp": format!("2024-03-05 14:{:02}:00", i % 60),
                "temp": format!("{}.5", 20 + i),
                "humidity": "55.0",
                "soil_moisture": "450",
                "light_level": "700",
                "pump_status": "OFF"
            }))
            .unwrap()
        })
        .collect()
}

/// Scripted backend. Each queue is consumed front to back; an exhausted
/// queue answers with HTTP 503.
#[derive(Default)]
pub struct FakeApi {
    pub current: Mutex<VecDeque<Result<CurrentReadings, DashboardError>>>,
    pub pump: Mutex<VecDeque<Result<PumpStatus, DashboardError>>>,
    pub replies: Mutex<VecDeque<Result<PumpReply, DashboardError>>>,
    pub history: Mutex<VecDeque<Result<Vec<HistoryRecord>, DashboardError>>>,
    pub stats: Mutex<VecDeque<Result<StatsEnvelope, DashboardError>>>,
    calls: Mutex<Vec<Call>>,
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, DashboardError>>>) -> Result<T, DashboardError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(unavailable()))
}

impl FakeApi {
    pub fn push_current(&self, response: Result<CurrentReadings, DashboardError>) {
        self.current.lock().unwrap().push_back(response);
    }

    pub fn push_pump(&self, response: Result<PumpStatus, DashboardError>) {
        self.pump.lock().unwrap().push_back(response);
    }

    pub fn push_reply(&self, response: Result<PumpReply, DashboardError>) {
        self.replies.lock().unwrap().push_back(response);
    }

    pub fn push_history(&self, response: Result<Vec<HistoryRecord>, DashboardError>) {
        self.history.lock().unwrap().push_back(response);
    }

    pub fn push_stats(&self, response: Result<StatsEnvelope, DashboardError>) {
        self.stats.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DashboardApi for FakeApi {
    async fn current_readings(&self) -> Result<CurrentReadings, DashboardError> {
        self.record(Call::Current);
        pop(&self.current)
    }

    async fn pump_status(&self) -> Result<PumpStatus, DashboardError> {
        self.record(Call::PumpStatus);
        pop(&self.pump)
    }

    async fn send_pump_command(&self, command: PumpCommand) -> Result<PumpReply, DashboardError> {
        self.record(Call::PumpCommand(command));
        pop(&self.replies)
    }

    async fn history(&self, limit: HistoryLimit) -> Result<Vec<HistoryRecord>, DashboardError> {
        self.record(Call::History(limit));
        pop(&self.history)
    }

    async fn stats(&self) -> Result<StatsEnvelope, DashboardError> {
        self.record(Call::Stats);
        pop(&self.stats)
    }

    async fn system_status(&self) -> Result<SystemStatus, DashboardError> {
        self.record(Call::SystemStatus);
        Err(unavailable())
    }
}

#[derive(Debug, Default)]
struct ViewState {
    texts: HashMap<ElementId, String>,
    classes: HashMap<ElementId, BTreeSet<&'static str>>,
    colors: HashMap<ElementId, Rgb>,
    values: HashMap<ElementId, String>,
    stats: Vec<StatItem>,
}

/// View that remembers the last write to every element.
#[derive(Debug, Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn text(&self, element: ElementId) -> Option<String> {
        self.state.lock().unwrap().texts.get(&element).cloned()
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .classes
            .get(&element)
            .is_some_and(|set| set.contains(class))
    }

    pub fn color(&self, element: ElementId) -> Option<Rgb> {
        self.state.lock().unwrap().colors.get(&element).copied()
    }

    pub fn stats(&self) -> Vec<StatItem> {
        self.state.lock().unwrap().stats.clone()
    }
}

impl DashboardView for RecordingView {
    fn set_text(&self, element: ElementId, text: &str) {
        self.state
            .lock()
            .unwrap()
            .texts
            .insert(element, text.to_string());
    }

    fn set_class(&self, element: ElementId, class: &'static str, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        let set = state.classes.entry(element).or_default();
        if enabled {
            set.insert(class);
        } else {
            set.remove(class);
        }
    }

    fn set_color(&self, element: ElementId, color: Rgb) {
        self.state.lock().unwrap().colors.insert(element, color);
    }

    fn set_stats(&self, items: &[StatItem]) {
        self.state.lock().unwrap().stats = items.to_vec();
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.state.lock().unwrap().values.get(&element).cloned()
    }

    fn set_value(&self, element: ElementId, value: &str) {
        self.state
            .lock()
            .unwrap()
            .values
            .insert(element, value.to_string());
    }
}

#[derive(Debug, Default)]
struct ChartLogState {
    next_id: u32,
    rendered: Vec<(u32, CanvasId)>,
    destroyed: Vec<u32>,
}

/// Shared ledger of rendered and destroyed fake charts.
#[derive(Debug, Clone, Default)]
pub struct ChartLog {
    inner: Arc<Mutex<ChartLogState>>,
}

impl ChartLog {
    pub fn rendered(&self) -> Vec<(u32, CanvasId)> {
        self.inner.lock().unwrap().rendered.clone()
    }

    pub fn destroyed(&self) -> Vec<u32> {
        self.inner.lock().unwrap().destroyed.clone()
    }

    /// Charts rendered on `canvas` and not destroyed yet.
    pub fn live_on(&self, canvas: CanvasId) -> usize {
        let state = self.inner.lock().unwrap();
        state
            .rendered
            .iter()
            .filter(|(id, on)| *on == canvas && !state.destroyed.contains(id))
            .count()
    }
}

#[derive(Debug)]
pub struct FakeChart {
    pub id: u32,
    markup: String,
    log: ChartLog,
}

impl FakeChart {
    pub fn standalone(id: u32, log: &ChartLog) -> Self {
        Self {
            id,
            markup: format!("<svg data-chart=\"{id}\"/>"),
            log: log.clone(),
        }
    }
}

impl ChartHandle for FakeChart {
    fn markup(&self) -> &str {
        &self.markup
    }

    fn destroy(self) {
        self.log.inner.lock().unwrap().destroyed.push(self.id);
    }
}

/// Renderer producing [`FakeChart`]s; can be switched to fail.
#[derive(Debug, Default)]
pub struct FakeRenderer {
    pub log: ChartLog,
    pub fail: AtomicBool,
}

impl ChartRenderer for FakeRenderer {
    type Chart = FakeChart;

    fn render(&self, spec: &ChartSpec) -> Result<FakeChart, ChartError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChartError::Empty(spec.canvas.as_str()));
        }
        let mut state = self.log.inner.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.rendered.push((id, spec.canvas));
        drop(state);
        Ok(FakeChart::standalone(id, &self.log))
    }
}

/// Notifier that keeps every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
