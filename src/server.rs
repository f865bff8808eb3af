use std::sync::Arc;

use academy_calendar::{
    filter_fees, to_ics, AcademyRepository, CalendarEvent, EventDraft, EventKind, FeeRecord,
    FeeStatus, FeeSummary, MonthGrid, YearMonth,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::cache::Cache;

pub const CALENDAR_NAME: &str = "Badminton Academy";

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AcademyRepository>,
    pub cache: Arc<Cache<String, String>>,
}

pub struct ApiError(academy_calendar::Error);

impl From<academy_calendar::Error> for ApiError {
    fn from(err: academy_calendar::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/calendar", get(handle_calendar))
        .route("/calendar-events", get(list_events).post(create_event))
        .route("/batches", get(list_batches))
        .route("/students", get(list_students))
        .route("/coaches", get(list_coaches))
        .route("/sessions", get(list_sessions))
        .route("/fees", get(list_fees))
        .route("/fees/summary", get(fee_summary))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Deserialize)]
struct CalendarQuery {
    year: Option<i32>,
    month: Option<u32>,
    selected: Option<NaiveDate>,
    #[serde(default)]
    json: bool,
}

async fn handle_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Response> {
    let today = today();
    let month = YearMonth::new(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month()),
    )?;

    let key = month.to_string();
    if !query.json {
        if let Some(body) = state.cache.get(&key).await {
            debug!("Cache hit for {key}");
            return Ok(ics_response(&body));
        }
    }

    let generation = state.cache.generation();
    let events = state.repository.events_between(
        Some(month.first_day()),
        month.date(month.days_in_month()),
        None,
    )?;
    let batches: Vec<_> = state
        .repository
        .batch_sessions()?
        .into_iter()
        .filter(|session| month.contains(session.date))
        .collect();

    if query.json {
        let grid = MonthGrid::build(month, today, query.selected, &events, &batches);
        return Ok(Json(grid).into_response());
    }

    let name = format!("{CALENDAR_NAME} {}", month.label());
    let rendered = to_ics(&name, &events, &batches).to_string();
    let body = Arc::clone(&state.cache)
        .insert_at(generation, key, rendered)
        .await;

    Ok(ics_response(&body))
}

fn ics_response(body: &str) -> Response {
    ([("content-type", "text/calendar")], body.to_owned()).into_response()
}

#[derive(Deserialize)]
struct EventsQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    event_type: Option<EventKind>,
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    let events =
        state
            .repository
            .events_between(query.start_date, query.end_date, query.event_type)?;
    Ok(Json(events))
}

async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> ApiResult<(StatusCode, Json<CalendarEvent>)> {
    let event = draft.to_event()?;
    state.repository.add_event(event.clone())?;
    state.cache.clear().await;
    info!("Added {} `{}` on {}", event.kind, event.name, event.date);
    Ok((StatusCode::CREATED, Json(event)))
}

async fn list_batches(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<academy_calendar::Batch>>> {
    Ok(Json(state.repository.batches()?))
}

async fn list_students(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<academy_calendar::Student>>> {
    Ok(Json(state.repository.students()?))
}

async fn list_coaches(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<academy_calendar::Coach>>> {
    Ok(Json(state.repository.coaches()?))
}

/// Academic terms, newest first.
async fn list_sessions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<academy_calendar::AcademySession>>> {
    let mut sessions = state.repository.academy_sessions()?;
    sessions.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    Ok(Json(sessions))
}

#[derive(Deserialize)]
struct FeesQuery {
    status: Option<FeeStatus>,
}

#[derive(Serialize)]
struct FeeEntry {
    #[serde(flatten)]
    record: FeeRecord,
    status: FeeStatus,
    outstanding: u64,
}

async fn list_fees(
    State(state): State<AppState>,
    Query(query): Query<FeesQuery>,
) -> ApiResult<Json<Vec<FeeEntry>>> {
    let today = today();
    let records = state.repository.fees()?;
    let entries = filter_fees(&records, query.status, today)
        .into_iter()
        .map(|record| FeeEntry {
            status: record.status(today),
            outstanding: record.outstanding(),
            record: record.clone(),
        })
        .collect();
    Ok(Json(entries))
}

async fn fee_summary(State(state): State<AppState>) -> ApiResult<Json<FeeSummary>> {
    let records = state.repository.fees()?;
    Ok(Json(FeeSummary::from_records(&records, today())))
}
