// src/domain/deal.rs

use crate::domain::listing::Listing;
use serde_json::{Map, Value};

/// A complete listing whose asking price undercuts its Zestimate by at least
/// the configured threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub address: String,
    pub detail_url: String,
    pub price: f64,
    pub zestimate: f64,
    pub days_on_zillow: Option<f64>,
    /// `1 - price / zestimate`
    pub discount_pct: f64,
    pub extra: Map<String, Value>,
}

impl Deal {
    /// Discount as a whole percentage, ties rounded to even (62.5 -> 62).
    pub fn discount_percent(&self) -> i64 {
        (self.discount_pct * 100.0).round_ties_even() as i64
    }
}

/// Fraction by which `price` undercuts `zestimate`.
///
/// Returns `None` when the Zestimate is zero, negative or not finite, since
/// the ratio has no meaning there.
pub fn discount_pct(price: f64, zestimate: f64) -> Option<f64> {
    if !zestimate.is_finite() || zestimate <= 0.0 {
        return None;
    }
    let pct = 1.0 - price / zestimate;
    pct.is_finite().then_some(pct)
}

/// Keep complete listings discounted by at least `threshold`, largest
/// discount first. Equal discounts keep their input order.
pub fn filter_deals(listings: &[Listing], threshold: f64) -> Vec<Deal> {
    let mut deals: Vec<Deal> = listings
        .iter()
        .filter(|listing| listing.is_complete())
        .filter_map(|listing| {
            let price = listing.price?;
            let zestimate = listing.zestimate?;
            let detail_url = listing.detail_url.as_ref()?;
            let address = listing.address.as_ref()?;

            Some(Deal {
                address: address.clone(),
                detail_url: detail_url.clone(),
                price,
                zestimate,
                days_on_zillow: listing.days_on_zillow,
                discount_pct: discount_pct(price, zestimate)?,
                extra: listing.extra.clone(),
            })
        })
        .filter(|deal| deal.discount_pct >= threshold)
        .collect();

    // sort_by is stable
    deals.sort_by(|a, b| b.discount_pct.total_cmp(&a.discount_pct));
    deals
}
