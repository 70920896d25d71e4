use crate::app::App;
use crate::config::Config;
use crate::domain::{Deal, Listing};
use crate::fetcher::{FetchError, FetchOutcome, ListingSource};
use crate::mailer::{DigestSender, MailerError};
use crate::mailings::DigestMessage;
use astra::Response;
use serde_json::Map;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_config() -> Config {
    Config {
        apify_task_id: "user~zillow-task".into(),
        apify_token: "apify-token".into(),
        discount_threshold: 0.25,
        sendgrid_api_key: "SG.test".into(),
        alert_email_to: "alerts@example.com".into(),
        alert_email_from: "deals@example.com".into(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        max_workers: 1,
        log_level: "debug".into(),
    }
}

pub fn sample_listing(address: &str, url: &str, price: f64, zestimate: f64) -> Listing {
    Listing {
        price: Some(price),
        zestimate: Some(zestimate),
        detail_url: Some(url.to_string()),
        address: Some(address.to_string()),
        days_on_zillow: Some(7.0),
        extra: Map::new(),
    }
}

pub fn sample_deal(address: &str, url: &str, price: f64, discount_pct: f64) -> Deal {
    Deal {
        address: address.to_string(),
        detail_url: url.to_string(),
        price,
        zestimate: price / (1.0 - discount_pct),
        days_on_zillow: None,
        discount_pct,
        extra: Map::new(),
    }
}

/// Listing source that replays a canned answer and counts calls.
pub struct FakeSource {
    answer: Result<Vec<Listing>, u16>,
    calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn ok(listings: Vec<Listing>) -> Self {
        Self {
            answer: Ok(listings),
            calls: Arc::default(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            answer: Err(code),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ListingSource for FakeSource {
    fn fetch(&self) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(listings) => FetchOutcome::Success(listings.clone()),
            Err(code) => FetchOutcome::Failure(FetchError::Status(*code)),
        }
    }
}

/// Digest sender that keeps every message instead of mailing it.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<DigestMessage>>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<DigestMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl DigestSender for RecordingSender {
    fn send(&self, message: &DigestMessage) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::ApiError {
                status: 401,
                body: "invalid api key".into(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn test_app(source: FakeSource, sender: RecordingSender) -> App {
    App::new(test_config(), Box::new(source), Box::new(sender))
}

pub fn body_string(mut resp: Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}
