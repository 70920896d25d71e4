use crate::config::Config;
use crate::domain::{filter_deals, Deal};
use crate::fetcher::{ApifyClient, FetchError, ListingSource};
use crate::mailer::{DigestSender, MailerError, SendGridMailer};
use crate::mailings::{send_digest, DigestOutcome};
use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("data source client: {0}")]
    Fetcher(#[from] FetchError),

    #[error("mail client: {0}")]
    Mailer(#[from] MailerError),
}

/// Everything a request needs. Shared read-only across server workers.
pub struct App {
    pub config: Config,
    source: Box<dyn ListingSource>,
    sender: Box<dyn DigestSender>,
}

/// One fetch -> filter cycle.
pub struct PipelineRun {
    pub checked_at: DateTime<Local>,
    pub fetch_error: Option<FetchError>,
    pub fetched: usize,
    pub deals: Vec<Deal>,
}

impl App {
    pub fn new(
        config: Config,
        source: Box<dyn ListingSource>,
        sender: Box<dyn DigestSender>,
    ) -> Self {
        Self {
            config,
            source,
            sender,
        }
    }

    /// Wire up the Apify source and SendGrid sender from `config`.
    pub fn from_config(config: Config) -> Result<Self, StartupError> {
        let source = ApifyClient::new(&config.apify_task_id, &config.apify_token)?;
        let sender = SendGridMailer::new(&config.sendgrid_api_key)?;
        Ok(Self::new(config, Box::new(source), Box::new(sender)))
    }

    pub fn run_pipeline(&self) -> PipelineRun {
        let checked_at = Local::now();

        let outcome = self.source.fetch();
        let fetched = outcome.listings().len();
        let deals = filter_deals(outcome.listings(), self.config.discount_threshold);

        tracing::info!(
            fetched,
            deals = deals.len(),
            threshold = self.config.discount_threshold,
            "pipeline run complete"
        );

        PipelineRun {
            checked_at,
            fetch_error: outcome.into_error(),
            fetched,
            deals,
        }
    }

    pub fn send_digest(&self, deals: &[Deal]) -> Result<DigestOutcome, MailerError> {
        send_digest(self.sender.as_ref(), &self.config, deals)
    }
}

impl PipelineRun {
    /// The source answered with at least one record.
    pub fn has_data(&self) -> bool {
        self.fetch_error.is_none() && self.fetched > 0
    }
}
