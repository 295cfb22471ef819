use serde::{Deserialize, Serialize};
use std::fmt;

use super::keyword_query::KeywordQuery;
use crate::domain::{AccountId, CampaignId};

/// Identity of one cacheable remote read: entity scope plus parameters.
///
/// Two requests with equal keys are the same request; the fetch cache keeps at
/// most one in flight per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKey {
    Accounts,
    /// `None` lists every campaign (layout without an account tier).
    Campaigns { account: Option<AccountId> },
    AdGroups { campaign: CampaignId },
    Keywords(KeywordQuery),
}

impl QueryKey {
    /// Request path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            QueryKey::Accounts => "/account".to_string(),
            QueryKey::Campaigns { account: None } => "/campaign".to_string(),
            QueryKey::Campaigns { account: Some(id) } => format!("/campaign/{id}"),
            QueryKey::AdGroups { campaign } => format!("/adgroup/{campaign}"),
            QueryKey::Keywords(q) => q.path(),
        }
    }

    /// Resource noun for messages ("Error loading {noun}").
    pub fn resource(&self) -> &'static str {
        match self {
            QueryKey::Accounts => "accounts",
            QueryKey::Campaigns { .. } => "campaigns",
            QueryKey::AdGroups { .. } => "ad groups",
            QueryKey::Keywords(_) => "keywords",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_resource_layout() {
        assert_eq!(QueryKey::Accounts.path(), "/account");
        assert_eq!(QueryKey::Campaigns { account: None }.path(), "/campaign");
        assert_eq!(
            QueryKey::Campaigns { account: Some(AccountId(3)) }.path(),
            "/campaign/3"
        );
        assert_eq!(QueryKey::AdGroups { campaign: CampaignId(9) }.path(), "/adgroup/9");
    }

    #[test]
    fn parent_id_is_part_of_identity() {
        let a = QueryKey::AdGroups { campaign: CampaignId(1) };
        let b = QueryKey::AdGroups { campaign: CampaignId(2) };
        assert_ne!(a, b);
    }
}
