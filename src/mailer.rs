// src/mailer.rs

use crate::mailings::DigestMessage;
use reqwest::blocking::Client;
use serde::Serialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com/";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid mail API URL: {0}")]
    InvalidUrl(String),
}

/// Anything that can deliver a rendered digest.
pub trait DigestSender: Send + Sync {
    fn send(&self, message: &DigestMessage) -> Result<(), MailerError>;
}

pub struct SendGridMailer {
    api_key: String,
    base_url: Url,
    client: Client,
}

#[derive(Serialize)]
struct SendGridAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct SendGridPersonalization<'a> {
    to: Vec<SendGridAddress<'a>>,
}

#[derive(Serialize)]
struct SendGridContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendGridPayload<'a> {
    personalizations: Vec<SendGridPersonalization<'a>>,
    from: SendGridAddress<'a>,
    subject: &'a str,
    content: Vec<SendGridContent<'a>>,
}

impl<'a> SendGridPayload<'a> {
    fn from_message(message: &'a DigestMessage) -> Self {
        Self {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridAddress { email: &message.to }],
            }],
            from: SendGridAddress {
                email: &message.from,
            },
            subject: &message.subject,
            content: vec![SendGridContent {
                content_type: "text/html",
                value: &message.html,
            }],
        }
    }
}

impl SendGridMailer {
    pub fn new(api_key: &str) -> Result<Self, MailerError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, MailerError> {
        let base_url =
            Url::parse(base_url).map_err(|e| MailerError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url,
            client,
        })
    }

    fn send_url(&self) -> Result<Url, MailerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MailerError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v3", "mail", "send"]);
        Ok(url)
    }
}

impl DigestSender for SendGridMailer {
    fn send(&self, message: &DigestMessage) -> Result<(), MailerError> {
        let payload = SendGridPayload::from_message(message);

        let resp = self
            .client
            .post(self.send_url()?)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MailerError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
