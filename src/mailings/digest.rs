// src/mailings/digest.rs

use crate::config::Config;
use crate::domain::Deal;
use crate::mailer::{DigestSender, MailerError};
use crate::templates::components::money;
use maud::{html, Markup};

pub const DIGEST_SUBJECT: &str = "🏠 New Real Estate Deals Alert";

/// A rendered digest, ready for whichever sender is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestOutcome {
    NothingToSend,
    Sent { count: usize },
}

pub fn render_digest(deals: &[Deal], threshold_percent: i64) -> Markup {
    html! {
        h3 { "Real Estate Deals—" (threshold_percent) "%+ Below Market" }
        ul {
            @for deal in deals {
                li {
                    a href=(deal.detail_url) { (deal.address) }
                    ": " (money(deal.price)) " (~" (deal.discount_percent()) "% below market)"
                }
            }
        }
    }
}

/// Email the current deals to the alert recipient.
///
/// Nothing is sent for an empty deal list.
pub fn send_digest(
    sender: &dyn DigestSender,
    config: &Config,
    deals: &[Deal],
) -> Result<DigestOutcome, MailerError> {
    if deals.is_empty() {
        tracing::info!("no deals, digest not sent");
        return Ok(DigestOutcome::NothingToSend);
    }

    let message = DigestMessage {
        from: config.alert_email_from.clone(),
        to: config.alert_email_to.clone(),
        subject: DIGEST_SUBJECT.to_string(),
        html: render_digest(deals, config.threshold_percent()).into_string(),
    };

    sender.send(&message).inspect_err(|e| {
        tracing::error!(error = %e, "digest delivery failed");
    })?;

    tracing::info!(count = deals.len(), to = %config.alert_email_to, "digest sent");
    Ok(DigestOutcome::Sent { count: deals.len() })
}
