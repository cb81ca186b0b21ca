use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, SecondsFormat, Utc};
use ironlog_schema::{ShealthExercise, ShealthExerciseList};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::SyncResolvedConfig;
use crate::error::{IronlogError, IsRetryable};
use crate::utils::logging::debug_json_preview;

/// Read side of the health-platform exercise API.
pub struct ShealthApi;

impl ShealthApi {
    fn retry_policy(cfg: &SyncResolvedConfig) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_max_times(cfg.retry_max_times)
            .with_jitter()
    }

    pub(crate) fn exercise_url(
        cfg: &SyncResolvedConfig,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Url, IronlogError> {
        let base = format!("{}/exercise", cfg.api_url.as_str().trim_end_matches('/'));
        Ok(Url::parse_with_params(
            &base,
            &[
                ("start_time", from.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("end_time", to.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("time_zone", cfg.time_zone.clone()),
            ],
        )?)
    }

    async fn fetch_once(
        http_client: &reqwest::Client,
        url: &Url,
        access_token: &str,
    ) -> Result<Vec<ShealthExercise>, IronlogError> {
        let resp = http_client
            .get(url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            if status.is_server_error() {
                debug!(%status, url = %url, "exercise API server error");
            }
            return Err(IronlogError::UpstreamStatus(status));
        }

        let bytes = resp.bytes().await?;
        let list: ShealthExerciseList = serde_json::from_slice(&bytes)?;
        Ok(list.exercises)
    }

    /// Fetches the vendor workouts in `[from, to]`.
    ///
    /// Transient failures (5xx, 429, timeouts) are retried with exponential backoff. A 401 comes
    /// back as `UpstreamStatus(401)` so the caller can refresh and try once more.
    pub async fn fetch_workouts(
        cfg: &SyncResolvedConfig,
        http_client: &reqwest::Client,
        access_token: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ShealthExercise>, IronlogError> {
        let url = Self::exercise_url(cfg, from, to)?;

        let exercises = (|| Self::fetch_once(http_client, &url, access_token))
            .retry(Self::retry_policy(cfg))
            .when(|e: &IronlogError| e.is_retryable())
            .notify(|err: &IronlogError, dur: Duration| {
                warn!("exercise API retrying after error {err}, sleeping {dur:?}");
            })
            .await?;

        debug_json_preview(&exercises, |preview| {
            debug!(count = exercises.len(), "exercise API payload:\n{preview}");
        });
        Ok(exercises)
    }

    pub fn is_unauthorized(err: &IronlogError) -> bool {
        matches!(err, IronlogError::UpstreamStatus(StatusCode::UNAUTHORIZED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use chrono::TimeZone;

    #[test]
    fn exercise_url_has_window_and_time_zone() {
        let cfg = SyncConfig {
            api_url: Url::parse("http://127.0.0.1:9/v1/").unwrap(),
            time_zone: "Europe/Berlin".into(),
            ..SyncConfig::default()
        }
        .resolve();
        let from = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 3, 8, 12, 30, 0).unwrap();

        let url = ShealthApi::exercise_url(&cfg, from, to).unwrap();
        assert_eq!(url.path(), "/v1/exercise");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("start_time".into(), "2026-03-01T00:00:00.000Z".into()),
                ("end_time".into(), "2026-03-08T12:30:00.000Z".into()),
                ("time_zone".into(), "Europe/Berlin".into()),
            ]
        );
    }
}
