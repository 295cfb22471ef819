//! Domain types: hierarchy entities, keyword rows, identifiers, date ranges.

pub mod date_range;
pub mod entity;
pub mod ids;

pub use date_range::DateRange;
pub use entity::{Account, AdGroup, Campaign, Entity, EntityStatus, Keyword, KeywordPage};
pub use ids::{AccountId, AdGroupId, CampaignId, KeywordId};
