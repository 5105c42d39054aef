use crate::application::state_sync::SummaryFetch;
use crate::domain::errors::{AppError, FetchResult};
use crate::domain::logging::{get_logger, LogComponent};
use crate::domain::summary::{DailyReport, WorldSummary};
use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

pub const SUMMARY_URL: &str = "/data/daily_reports/summary.json";
pub const REPORT_TODAY_URL: &str = "/data/daily_reports/today.json";
pub const REPORT_1DAY_AGO_URL: &str = "/data/daily_reports/-1day.json";

/// Request timeout. After this the page load is abandoned; no retry.
const FETCH_TIMEOUT_MS: u32 = 5000;

/// Simple REST client for the static daily-report feeds.
#[derive(Debug, Clone, Default)]
pub struct SummaryHttpClient;

impl SummaryHttpClient {
    pub fn new() -> Self {
        Self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        get_logger().info(
            LogComponent::Infrastructure("SummaryAPI"),
            &format!("📊 Fetching {url}"),
        );

        let request = async {
            let response = Request::get(url)
                .send()
                .await
                .map_err(|e| AppError::NetworkError(format!("request to {url} failed: {e:?}")))?;
            if !response.ok() {
                return Err(AppError::NetworkError(format!(
                    "HTTP error {} for {url}",
                    response.status()
                )));
            }
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::ParseError(format!("invalid JSON from {url}: {e:?}")))
        };
        let timeout = TimeoutFuture::new(FETCH_TIMEOUT_MS);
        pin_mut!(request);

        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                Err(AppError::TimeoutError(format!("the request for {url} timed out")))
            }
        }
    }

    /// Both daily reports the treemap needs: today plus one day ago.
    pub async fn fetch_daily_reports(&self) -> FetchResult<(DailyReport, DailyReport)> {
        let today = self.get_json::<DailyReport>(REPORT_TODAY_URL).await?;
        let one_day_ago = self.get_json::<DailyReport>(REPORT_1DAY_AGO_URL).await?;
        Ok((today, one_day_ago))
    }
}

impl SummaryFetch for SummaryHttpClient {
    async fn fetch_summary(&self) -> FetchResult<WorldSummary> {
        self.get_json(SUMMARY_URL).await
    }
}
