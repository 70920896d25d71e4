use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One property record from the scraper dataset.
///
/// Only the fields the deal filter and the dashboard need are typed; every
/// other key the scraper emits is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub zestimate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub days_on_zillow: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Listing {
    /// True when every field the deal filter depends on is present.
    pub fn is_complete(&self) -> bool {
        self.price.is_some()
            && self.zestimate.is_some()
            && self.detail_url.is_some()
            && self.address.is_some()
    }
}

/// Scrapers are inconsistent about prices: `300000`, `"300000"` and
/// `"$300,000"` all show up. Anything else is treated as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | ' '))
                .collect();
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}
