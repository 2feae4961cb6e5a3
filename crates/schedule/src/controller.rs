use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use dulcevida_shared::{DaySchedule, WeekSchedule, Weekday, normalize};
use strum::Display;

use crate::{
    DEFAULT_CACHE_KEY, LocalCache, Operation, RemoteScheduleStore, SyncError, SyncInfo,
    SyncReporter,
};

#[derive(Display, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum LoadSource {
    Remote,
    Cache,
    Default,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub schedule: WeekSchedule,
    pub source: LoadSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Ok,
    Failed,
}

impl UpdateOutcome {
    pub fn is_ok(self) -> bool {
        matches!(self, UpdateOutcome::Ok)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Ok,
    FailedButCached,
}

impl SaveOutcome {
    pub fn is_ok(self) -> bool {
        matches!(self, SaveOutcome::Ok)
    }
}

/// Optimistic day edit whose PATCH has not resolved yet.
struct PendingEdit {
    revision: u64,
    color: String,
    color_name: String,
}

#[derive(Default)]
struct State {
    schedule: WeekSchedule,
    info: SyncInfo,
    pending: HashMap<Weekday, PendingEdit>,
    next_revision: u64,
}

impl State {
    fn clear_pending(&mut self, day: Weekday, revision: u64) {
        if self
            .pending
            .get(&day)
            .is_some_and(|edit| edit.revision == revision)
        {
            self.pending.remove(&day);
        }
    }
}

/// Owns the in-memory weekly schedule and keeps it in step with the remote
/// store and the local cache.
///
/// Every operation mutates the schedule only in synchronous sections; the
/// lock is never held across a remote call, so operations may be driven
/// concurrently from a shared `Arc`.
pub struct ScheduleSyncController<R, C> {
    remote: R,
    cache: C,
    reporter: Arc<dyn SyncReporter>,
    cache_key: String,
    state: Mutex<State>,
}

impl<R: RemoteScheduleStore, C: LocalCache> ScheduleSyncController<R, C> {
    /// Controller holding the default schedule. Nothing is fetched until
    /// [`load`](Self::load) runs.
    pub fn new(remote: R, cache: C, reporter: Arc<dyn SyncReporter>) -> Self {
        Self {
            remote,
            cache,
            reporter,
            cache_key: DEFAULT_CACHE_KEY.to_owned(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    /// Build the controller and run the initial [`load`](Self::load).
    pub async fn start(
        remote: R,
        cache: C,
        reporter: Arc<dyn SyncReporter>,
    ) -> (Self, LoadOutcome) {
        let controller = Self::new(remote, cache, reporter);
        let outcome = controller.load().await;

        (controller, outcome)
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn snapshot(&self) -> WeekSchedule {
        self.state().schedule.clone()
    }

    pub fn sync_info(&self) -> SyncInfo {
        self.state().info.clone()
    }

    pub fn today(&self) -> DaySchedule {
        self.state().schedule.get(Weekday::today()).clone()
    }

    /// Fetch the authoritative schedule, falling back to the cache and then
    /// to the default table. Never fails.
    #[tracing::instrument(skip(self), fields(key = %self.cache_key))]
    pub async fn load(&self) -> LoadOutcome {
        let (schedule, source, info) = match self.remote.fetch().await {
            Ok(remote) => (
                normalize(remote.schedule),
                LoadSource::Remote,
                Some(remote.info),
            ),
            Err(err) => {
                self.reporter.failure(Operation::Load, &err);
                let (schedule, source) = self.read_cache();
                (schedule, source, None)
            }
        };

        let schedule = self.install(schedule, info);
        if source == LoadSource::Remote {
            self.persist(&schedule);
        }
        tracing::info!(source = %source, "schedule loaded");

        LoadOutcome { schedule, source }
    }

    /// Restore the cached schedule, or the default table, without contacting
    /// the remote store. Used before pushing local work.
    #[tracing::instrument(skip(self), fields(key = %self.cache_key))]
    pub fn load_cached(&self) -> LoadOutcome {
        let (schedule, source) = self.read_cache();
        let schedule = self.install(schedule, None);
        tracing::info!(source = %source, "schedule restored");

        LoadOutcome { schedule, source }
    }

    /// Apply a color to `day` immediately, then confirm it remotely. A
    /// rejected edit is undone by reloading the whole schedule.
    #[tracing::instrument(skip(self))]
    pub async fn update_day(&self, day: Weekday, color: &str, color_name: &str) -> UpdateOutcome {
        if color.trim().is_empty() || color_name.trim().is_empty() {
            let err =
                SyncError::InvalidInput(format!("color and color name are required for {day}"));
            self.reporter.failure(Operation::UpdateDay, &err);
            return UpdateOutcome::Failed;
        }

        let revision = {
            let mut state = self.state();
            state.schedule.set_color(day, color, color_name);
            state.next_revision += 1;
            let revision = state.next_revision;
            state.pending.insert(
                day,
                PendingEdit {
                    revision,
                    color: color.to_owned(),
                    color_name: color_name.to_owned(),
                },
            );
            revision
        };

        match self.remote.patch_day(day, color, color_name).await {
            Ok(info) => {
                let schedule = {
                    let mut state = self.state();
                    state.clear_pending(day, revision);
                    state.info = info;
                    state.schedule.clone()
                };
                self.persist(&schedule);
                self.reporter.success(
                    Operation::UpdateDay,
                    &format!("{} set to {color_name}", day.display_name()),
                );

                UpdateOutcome::Ok
            }
            Err(err) => {
                self.reporter.failure(Operation::UpdateDay, &err);
                self.state().clear_pending(day, revision);
                tracing::warn!(%day, revision, "reloading schedule after rejected update");
                self.load().await;

                UpdateOutcome::Failed
            }
        }
    }

    /// Replace the remote schedule with the in-memory one. Local edits are
    /// cached whether or not the remote accepts them.
    #[tracing::instrument(skip(self))]
    pub async fn save_all(&self) -> SaveOutcome {
        let schedule = self.snapshot();
        let result = self.remote.replace(&schedule).await;

        let current = {
            let mut state = self.state();
            if let Ok(info) = &result {
                state.info = info.clone();
            }
            state.schedule.clone()
        };
        self.persist(&current);

        match result {
            Ok(_) => {
                self.reporter.success(Operation::SaveAll, "schedule saved");
                SaveOutcome::Ok
            }
            Err(err) => {
                self.reporter.failure(Operation::SaveAll, &err);
                SaveOutcome::FailedButCached
            }
        }
    }

    /// Restore the default table locally. The remote store is not contacted.
    #[tracing::instrument(skip(self))]
    pub fn reset_to_default(&self) -> WeekSchedule {
        let schedule = WeekSchedule::default();
        {
            let mut state = self.state();
            state.pending.clear();
            state.schedule = schedule.clone();
        }
        self.persist(&schedule);
        self.reporter
            .success(Operation::ResetToDefault, "schedule reset to defaults");

        schedule
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_cache(&self) -> (WeekSchedule, LoadSource) {
        match self.cache.get(&self.cache_key) {
            Ok(Some(raw)) => (normalize(raw), LoadSource::Cache),
            Ok(None) => (WeekSchedule::default(), LoadSource::Default),
            Err(err) => {
                tracing::warn!(key = %self.cache_key, error = %err, "unreadable schedule cache");
                (WeekSchedule::default(), LoadSource::Default)
            }
        }
    }

    /// Make `schedule` the in-memory state, keeping edits still in flight.
    fn install(&self, mut schedule: WeekSchedule, info: Option<SyncInfo>) -> WeekSchedule {
        let mut state = self.state();
        for (day, edit) in &state.pending {
            schedule.set_color(*day, edit.color.as_str(), edit.color_name.as_str());
        }
        if let Some(info) = info {
            state.info = info;
        }
        state.schedule = schedule.clone();

        schedule
    }

    fn persist(&self, schedule: &WeekSchedule) {
        if let Err(err) = self.cache.set(&self.cache_key, schedule) {
            tracing::warn!(key = %self.cache_key, error = %err, "failed to cache schedule");
        }
    }
}
