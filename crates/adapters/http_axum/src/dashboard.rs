//! Server-side rendered dashboard page and its form handlers.

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use agridash_app::ports::{ChartHandle, ChartRenderer, DashboardApi};
use agridash_domain::history::HistoryLimit;
use agridash_domain::pump::PumpAction;
use agridash_domain::stats::StatItem;
use agridash_domain::view::{CanvasId, ElementId};

use crate::error::DashboardPageError;
use crate::state::AppState;

/// One option of the range selector.
pub struct RangeChoice {
    value: u32,
    selected: bool,
}

/// A notification on display.
pub struct ToastView {
    id: u32,
    level: &'static str,
    message: String,
}

/// The dashboard page.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    connection_text: String,
    connection_class: String,
    temp: String,
    hum: String,
    soil: String,
    light: String,
    pump_text: String,
    pump_class: String,
    pump_color: String,
    stats: Vec<StatItem>,
    range_choices: Vec<RangeChoice>,
    toasts: Vec<ToastView>,
}

fn range_choices(selected: HistoryLimit) -> Vec<RangeChoice> {
    let mut values = HistoryLimit::CHOICES.to_vec();
    if !values.contains(&selected.get()) {
        values.push(selected.get());
        values.sort_unstable();
    }
    values
        .into_iter()
        .map(|value| RangeChoice {
            value,
            selected: value == selected.get(),
        })
        .collect()
}

/// `GET /`: the whole dashboard.
pub async fn index<A, R>(
    State(state): State<AppState<A, R>>,
) -> Result<Html<String>, DashboardPageError>
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    let page = &state.page;
    let template = DashboardTemplate {
        refresh_seconds: state.refresh_seconds,
        connection_text: page.text(ElementId::ConnectionStatus),
        connection_class: page.class_list(ElementId::ConnectionStatus),
        temp: page.text(ElementId::TempValue),
        hum: page.text(ElementId::HumValue),
        soil: page.text(ElementId::SoilValue),
        light: page.text(ElementId::LightValue),
        pump_text: page.text(ElementId::PumpStatusText),
        pump_class: page.class_list(ElementId::PumpIndicator),
        pump_color: page
            .color(ElementId::PumpStatusText)
            .map_or_else(|| "inherit".to_string(), |color| color.to_string()),
        stats: page.stats(),
        range_choices: range_choices(state.history.selected_limit()),
        toasts: state
            .toasts
            .active()
            .into_iter()
            .map(|toast| ToastView {
                id: toast.id,
                level: toast.notification.level.as_str(),
                message: toast.notification.message,
            })
            .collect(),
    };
    Ok(Html(template.render()?))
}

/// `GET /charts/{canvas}`: the chart bound to a canvas, as SVG.
pub async fn chart<A, R>(
    State(state): State<AppState<A, R>>,
    Path(canvas): Path<String>,
) -> Result<Response, DashboardPageError>
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    let canvas: CanvasId = canvas.parse()?;
    let svg = state
        .history
        .with_chart(canvas, |chart| chart.markup().to_string())
        .ok_or(DashboardPageError::ChartNotReady(canvas))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
        .into_response())
}

/// Form data of the pump buttons.
#[derive(Debug, Default, Deserialize)]
pub struct PumpForm {
    /// Auto-off delay in seconds; blank means none.
    #[serde(default)]
    pub duration: Option<String>,
}

impl PumpForm {
    fn duration_secs(&self) -> Result<Option<u32>, DashboardPageError> {
        match self.duration.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| DashboardPageError::InvalidDuration(raw.to_string())),
        }
    }
}

/// `POST /pump/{action}`: switch the pump (PRG).
///
/// The outcome reaches the user as a toast on the next page load.
pub async fn pump<A, R>(
    State(state): State<AppState<A, R>>,
    Path(action): Path<String>,
    Form(form): Form<PumpForm>,
) -> Result<Redirect, DashboardPageError>
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    let action: PumpAction = action.parse()?;
    let duration = form.duration_secs()?;
    let _ = state.live.pump_control(action, duration).await;
    Ok(Redirect::to("/"))
}

/// Form data of the range selector.
#[derive(Debug, Deserialize)]
pub struct RangeForm {
    pub limit: String,
}

/// `POST /range`: select another history window and redraw (PRG).
pub async fn range<A, R>(
    State(state): State<AppState<A, R>>,
    Form(form): Form<RangeForm>,
) -> Result<Redirect, DashboardPageError>
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    let limit: HistoryLimit = form.limit.parse()?;
    let outcome = state.history.change_range(limit).await;
    tracing::debug!(%limit, ?outcome, "history range changed");
    Ok(Redirect::to("/"))
}

/// `POST /toasts/{id}/dismiss`: hide a notification (PRG).
pub async fn dismiss_toast<A, R>(
    State(state): State<AppState<A, R>>,
    Path(id): Path<u32>,
) -> Redirect
where
    A: DashboardApi + 'static,
    R: ChartRenderer + 'static,
{
    state.toasts.dismiss(id);
    Redirect::to("/")
}
