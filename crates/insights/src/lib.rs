//! Campaign and insight data access — the provider seam, an in-memory
//! snapshot store, and time-range tokens.

pub mod provider;
pub mod snapshot;
pub mod time_range;

pub use provider::InsightsProvider;
pub use snapshot::{normalize_account_id, AccountSnapshot, CampaignSnapshot, SnapshotProvider};
pub use time_range::TimeRange;
