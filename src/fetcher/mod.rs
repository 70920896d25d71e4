mod apify;
mod fetch_error;

pub use apify::ApifyClient;
pub use fetch_error::FetchError;

use crate::domain::Listing;

/// Result of one fetch: either the latest batch of listings or the reason
/// the source could not deliver it.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(Vec<Listing>),
    Failure(FetchError),
}

impl FetchOutcome {
    /// Listings on success, empty on failure.
    pub fn listings(&self) -> &[Listing] {
        match self {
            FetchOutcome::Success(listings) => listings,
            FetchOutcome::Failure(_) => &[],
        }
    }

    pub fn into_error(self) -> Option<FetchError> {
        match self {
            FetchOutcome::Success(_) => None,
            FetchOutcome::Failure(e) => Some(e),
        }
    }
}

/// Anything that can hand over the latest batch of listings.
pub trait ListingSource: Send + Sync {
    fn fetch(&self) -> FetchOutcome;
}
