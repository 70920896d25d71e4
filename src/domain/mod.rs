pub mod deal;
pub mod listing;

pub use deal::{filter_deals, Deal};
pub use listing::Listing;
