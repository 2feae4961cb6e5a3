use std::sync::Arc;

use async_trait::async_trait;
use dulcevida_shared::{RawDaySchedule, WeekSchedule, Weekday};
use serde::{Deserialize, Serialize};

use crate::SyncError;

/// Who last touched the schedule on the server, and when.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncInfo {
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(default, alias = "updated_by")]
    pub updated_by: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteSchedule {
    pub schedule: Vec<RawDaySchedule>,
    pub info: SyncInfo,
}

/// Authoritative store for the weekly schedule.
#[async_trait]
pub trait RemoteScheduleStore: Send + Sync {
    async fn fetch(&self) -> Result<RemoteSchedule, SyncError>;

    async fn patch_day(
        &self,
        day: Weekday,
        color: &str,
        color_name: &str,
    ) -> Result<SyncInfo, SyncError>;

    async fn replace(&self, schedule: &WeekSchedule) -> Result<SyncInfo, SyncError>;
}

#[async_trait]
impl<T: RemoteScheduleStore + ?Sized> RemoteScheduleStore for Arc<T> {
    async fn fetch(&self) -> Result<RemoteSchedule, SyncError> {
        (**self).fetch().await
    }

    async fn patch_day(
        &self,
        day: Weekday,
        color: &str,
        color_name: &str,
    ) -> Result<SyncInfo, SyncError> {
        (**self).patch_day(day, color, color_name).await
    }

    async fn replace(&self, schedule: &WeekSchedule) -> Result<SyncInfo, SyncError> {
        (**self).replace(schedule).await
    }
}
