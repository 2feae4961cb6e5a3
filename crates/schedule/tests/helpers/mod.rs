#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use dulcevida_schedule::{
    Operation, RemoteSchedule, RemoteScheduleStore, SyncError, SyncInfo, SyncReporter,
};
use dulcevida_shared::{RawDaySchedule, WeekSchedule, Weekday};
use serde_json::{Value, json};
use tokio::sync::Notify;

pub const TOKEN: &str = "test-token";

/// In-memory remote store with per-operation failure switches.
#[derive(Default)]
pub struct FakeRemote {
    pub schedule: Mutex<Vec<RawDaySchedule>>,
    pub fail_fetch: AtomicBool,
    pub fail_replace: AtomicBool,
    pub fail_days: Mutex<HashSet<Weekday>>,
    pub gated_days: Mutex<HashSet<Weekday>>,
    pub entered: Notify,
    pub release: Notify,
    pub calls: AtomicUsize,
}

impl FakeRemote {
    pub fn with_schedule(raw: Vec<RawDaySchedule>) -> Arc<Self> {
        let remote = Self::default();
        *remote.schedule.lock().unwrap() = raw;
        Arc::new(remote)
    }

    pub fn fail_day(&self, day: Weekday) {
        self.fail_days.lock().unwrap().insert(day);
    }

    pub fn gate_day(&self, day: Weekday) {
        self.gated_days.lock().unwrap().insert(day);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn upsert(&self, day: Weekday, color: &str, color_name: &str) {
        let mut schedule = self.schedule.lock().unwrap();
        schedule.retain(|d| d.day.as_deref() != Some(day.as_ref()));
        schedule.push(RawDaySchedule::new(day.to_string(), color, color_name));
    }
}

fn info() -> SyncInfo {
    SyncInfo {
        updated_at: Some("2026-10-18 09:00:00".to_owned()),
        updated_by: Some("admin".to_owned()),
    }
}

#[async_trait]
impl RemoteScheduleStore for FakeRemote {
    async fn fetch(&self) -> Result<RemoteSchedule, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(SyncError::RemoteUnavailable("fetch disabled".to_owned()));
        }

        Ok(RemoteSchedule {
            schedule: self.schedule.lock().unwrap().clone(),
            info: info(),
        })
    }

    async fn patch_day(
        &self,
        day: Weekday,
        color: &str,
        color_name: &str,
    ) -> Result<SyncInfo, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gated = self.gated_days.lock().unwrap().contains(&day);
        if gated {
            self.entered.notify_one();
            self.release.notified().await;
        }

        if self.fail_days.lock().unwrap().contains(&day) {
            return Err(SyncError::RemoteUnavailable(format!("{day} rejected")));
        }

        self.upsert(day, color, color_name);

        Ok(info())
    }

    async fn replace(&self, schedule: &WeekSchedule) -> Result<SyncInfo, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(SyncError::RemoteUnavailable("replace disabled".to_owned()));
        }

        *self.schedule.lock().unwrap() = schedule.to_raw();

        Ok(info())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub failures: Mutex<Vec<(Operation, String)>>,
    pub successes: Mutex<Vec<(Operation, String)>>,
}

impl RecordingReporter {
    pub fn failures(&self) -> Vec<Operation> {
        self.failures.lock().unwrap().iter().map(|(op, _)| *op).collect()
    }

    pub fn successes(&self) -> Vec<Operation> {
        self.successes.lock().unwrap().iter().map(|(op, _)| *op).collect()
    }
}

impl SyncReporter for RecordingReporter {
    fn failure(&self, operation: Operation, error: &SyncError) {
        self.failures
            .lock()
            .unwrap()
            .push((operation, error.to_string()));
    }

    fn success(&self, operation: Operation, message: &str) {
        self.successes
            .lock()
            .unwrap()
            .push((operation, message.to_owned()));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Healthy,
    Failing,
    Garbage,
    Slow,
}

/// Stand-in for the dashboard backend served over real HTTP.
#[derive(Default)]
pub struct Backend {
    pub mode: Mutex<Mode>,
    pub schedule: Mutex<Vec<Value>>,
    pub requests: AtomicUsize,
    pub last_body: Mutex<Option<Value>>,
}

impl Backend {
    pub fn with_schedule(schedule: Vec<Value>) -> Arc<Self> {
        let backend = Self::default();
        *backend.schedule.lock().unwrap() = schedule;
        Arc::new(backend)
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn guard(&self, headers: &HeaderMap) -> Option<Response> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mode = *self.mode.lock().unwrap();
        match mode {
            Mode::Healthy => {}
            Mode::Failing => {
                return Some((StatusCode::INTERNAL_SERVER_ERROR, "database down").into_response());
            }
            Mode::Garbage => return Some((StatusCode::OK, "<html>oops</html>").into_response()),
            Mode::Slow => tokio::time::sleep(Duration::from_secs(2)).await,
        }

        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TOKEN}"));
        if !authorized {
            return Some(StatusCode::UNAUTHORIZED.into_response());
        }

        None
    }
}

async fn get_schedule(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if let Some(response) = backend.guard(&headers).await {
        return response;
    }

    let schedule = backend.schedule.lock().unwrap().clone();
    Json(json!({
        "success": true,
        "schedule": schedule,
        "updated_at": "2026-10-18 09:00:00",
        "updated_by": "admin",
    }))
    .into_response()
}

async fn patch_day(
    State(backend): State<Arc<Backend>>,
    Path(day): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = backend.guard(&headers).await {
        return response;
    }

    *backend.last_body.lock().unwrap() = Some(body.clone());
    {
        let mut schedule = backend.schedule.lock().unwrap();
        schedule.retain(|d| d["day"] != json!(day));
        schedule.push(json!({
            "day": day,
            "color": body["color"],
            "colorName": body["colorName"],
        }));
    }

    Json(json!({
        "success": true,
        "day": day,
        "color": body["color"],
        "colorName": body["colorName"],
        "updatedAt": "2026-10-18 10:00:00",
        "updatedBy": "admin",
    }))
    .into_response()
}

async fn post_schedule(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = backend.guard(&headers).await {
        return response;
    }

    *backend.last_body.lock().unwrap() = Some(body.clone());
    *backend.schedule.lock().unwrap() = body["schedule"].as_array().cloned().unwrap_or_default();

    Json(json!({
        "success": true,
        "updatedAt": "2026-10-18 11:00:00",
        "updatedBy": "admin",
    }))
    .into_response()
}

/// Serve `backend` on an ephemeral port and return the API base url.
pub async fn spawn_backend(backend: Arc<Backend>) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let api = Router::new()
        .route("/schedule", get(get_schedule).post(post_schedule))
        .route("/schedule/{day}", patch(patch_day))
        .with_state(backend);
    let app = Router::new().nest("/api/v1", api);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}/api/v1"))
}
