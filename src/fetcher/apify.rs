// apify.rs
use crate::domain::Listing;
use crate::fetcher::{FetchError, FetchOutcome, ListingSource};
use reqwest::blocking::Client;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";
const USER_AGENT: &str = concat!("deal_finder/", env!("CARGO_PKG_VERSION"));

/// Reads the dataset of the last run of an Apify actor task.
pub struct ApifyClient {
    client: Client,
    base_url: Url,
    task_id: String,
    token: String,
}

impl ApifyClient {
    pub fn new(task_id: &str, token: &str) -> Result<Self, FetchError> {
        Self::with_base_url(task_id, token, DEFAULT_BASE_URL)
    }

    /// Point the client at another host (a mock server in tests).
    pub fn with_base_url(task_id: &str, token: &str, base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            base_url,
            task_id: task_id.to_string(),
            token: token.to_string(),
        })
    }

    /// `{base}/v2/actor-tasks/{task}/runs/last/dataset/items?token={token}`
    pub fn items_url(&self) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "v2",
                "actor-tasks",
                self.task_id.as_str(),
                "runs",
                "last",
                "dataset",
                "items",
            ]);
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }

    pub fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError> {
        let url = self.items_url()?;

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        serde_json::from_str::<Vec<Listing>>(&text).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl ListingSource for ApifyClient {
    fn fetch(&self) -> FetchOutcome {
        tracing::info!(task_id = %self.task_id, "fetching latest dataset items");

        match self.fetch_listings() {
            Ok(listings) => {
                tracing::info!(count = listings.len(), "dataset items received");
                FetchOutcome::Success(listings)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset fetch failed");
                FetchOutcome::Failure(e)
            }
        }
    }
}
