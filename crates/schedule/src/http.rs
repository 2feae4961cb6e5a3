use std::time::Duration;

use async_trait::async_trait;
use dulcevida_shared::{RawDaySchedule, WeekSchedule, Weekday};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::{RemoteSchedule, RemoteScheduleStore, SyncError, SyncInfo};

/// Supplies the bearer credential for every request.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchResponse {
    success: bool,
    schedule: Vec<RawDaySchedule>,
    #[serde(flatten)]
    info: SyncInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResponse {
    success: bool,
    #[serde(flatten)]
    info: SyncInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchDayBody<'a> {
    color: &'a str,
    color_name: &'a str,
}

#[derive(Serialize)]
struct ReplaceBody<'a> {
    schedule: &'a WeekSchedule,
}

/// [`RemoteScheduleStore`] backed by the dashboard REST API.
///
/// `base_url` is the API root; requests go to `{base_url}/schedule`.
pub struct HttpScheduleStore<T: TokenSource = StaticToken> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenSource> HttpScheduleStore<T> {
    pub fn new(base_url: &str, timeout: Duration, tokens: T) -> dulcevida_shared::Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| dulcevida_shared::Error::Server(format!("invalid base url: {e}")))?;
        if parsed.cannot_be_a_base() {
            dulcevida_shared::bail!("invalid base url: {base_url}");
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| dulcevida_shared::Error::Unknown(e.into()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
        })
    }

    fn schedule_url(&self) -> String {
        format!("{}/schedule", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, SyncError> {
        let token = self
            .tokens
            .token()
            .filter(|t| !t.is_empty())
            .ok_or(SyncError::MissingCredential)?;

        Ok(request.bearer_auth(token))
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, SyncError> {
        let request = self.authorize(request)?;
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteUnavailable(format!("status {status}: {text}")));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl<T: TokenSource> RemoteScheduleStore for HttpScheduleStore<T> {
    async fn fetch(&self) -> Result<RemoteSchedule, SyncError> {
        let response: FetchResponse = self.send(self.client.get(self.schedule_url())).await?;
        if !response.success {
            return Err(SyncError::RemoteUnavailable(
                "schedule fetch was not successful".to_owned(),
            ));
        }

        tracing::debug!(entries = response.schedule.len(), "schedule fetched");

        Ok(RemoteSchedule {
            schedule: response.schedule,
            info: response.info,
        })
    }

    async fn patch_day(
        &self,
        day: Weekday,
        color: &str,
        color_name: &str,
    ) -> Result<SyncInfo, SyncError> {
        let request = self
            .client
            .patch(format!("{}/{day}", self.schedule_url()))
            .json(&PatchDayBody { color, color_name });

        let response: WriteResponse = self.send(request).await?;
        if !response.success {
            return Err(SyncError::RemoteUnavailable(format!(
                "update of {day} was not successful"
            )));
        }

        Ok(response.info)
    }

    async fn replace(&self, schedule: &WeekSchedule) -> Result<SyncInfo, SyncError> {
        let request = self
            .client
            .post(self.schedule_url())
            .json(&ReplaceBody { schedule });

        let response: WriteResponse = self.send(request).await?;
        if !response.success {
            return Err(SyncError::RemoteUnavailable(
                "schedule save was not successful".to_owned(),
            ));
        }

        Ok(response.info)
    }
}
