//! Account hierarchy entities and the keyword row type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ids::{
    lenient_f64, lenient_opt_i64, lenient_u64, AccountId, AdGroupId, CampaignId, KeywordId,
};

/// Serving status of an account, campaign or ad group.
///
/// The backend only guarantees `ENABLED`; every other value is kept verbatim
/// so it can be shown as-is in the status badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EntityStatus {
    #[default]
    Enabled,
    Other(String),
}

impl EntityStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, EntityStatus::Enabled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityStatus::Enabled => "ENABLED",
            EntityStatus::Other(s) => s,
        }
    }
}

impl From<&str> for EntityStatus {
    fn from(s: &str) -> Self {
        if s == "ENABLED" {
            EntityStatus::Enabled
        } else {
            EntityStatus::Other(s.to_string())
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EntityStatus::from(raw.as_str()))
    }
}

/// Something that can be offered in a cascading selector.
pub trait Entity: Clone {
    /// Singular label shown above the control, e.g. "Ad Group".
    const LABEL: &'static str;
    /// Plural noun used in error messages, e.g. "ad groups".
    const PLURAL: &'static str;
    /// Text of the empty "no value" option.
    const PLACEHOLDER: &'static str;

    fn raw_id(&self) -> i64;
    fn name(&self) -> &str;
    fn status(&self) -> &EntityStatus;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub status: EntityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: AdGroupId,
    pub name: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub campaign_id: Option<i64>,
}

impl Entity for Account {
    const LABEL: &'static str = "Account";
    const PLURAL: &'static str = "accounts";
    const PLACEHOLDER: &'static str = "Select an account";

    fn raw_id(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> &EntityStatus {
        &self.status
    }
}

impl Entity for Campaign {
    const LABEL: &'static str = "Campaign";
    const PLURAL: &'static str = "campaigns";
    const PLACEHOLDER: &'static str = "Select a campaign";

    fn raw_id(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> &EntityStatus {
        &self.status
    }
}

impl Entity for AdGroup {
    const LABEL: &'static str = "Ad Group";
    const PLURAL: &'static str = "ad groups";
    const PLACEHOLDER: &'static str = "Select an ad group";

    fn raw_id(&self) -> i64 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> &EntityStatus {
        &self.status
    }
}

/// One keyword row with its server-computed average quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub id: KeywordId,
    pub keyword: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_qs: f64,
}

impl Keyword {
    /// Quality score as shown in the table: two decimal places.
    pub fn avg_qs_display(&self) -> String {
        format!("{:.2}", self.avg_qs)
    }
}

/// One page of keyword results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordPage {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip_keeps_unknown_values() {
        let s: EntityStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(s, EntityStatus::Other("PAUSED".into()));
        assert!(!s.is_enabled());
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"PAUSED\"");

        let e: EntityStatus = serde_json::from_str("\"ENABLED\"").unwrap();
        assert!(e.is_enabled());
    }

    #[test]
    fn campaign_parses_string_ids() {
        let json = r#"{"id":"12","name":"Brand","status":"ENABLED","accountId":"3"}"#;
        let c: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, CampaignId(12));
        assert_eq!(c.account_id, Some(3));
    }

    #[test]
    fn ad_group_without_parent_field() {
        let json = r#"{"id":5,"name":"Exact","status":"REMOVED"}"#;
        let g: AdGroup = serde_json::from_str(json).unwrap();
        assert_eq!(g.campaign_id, None);
        assert_eq!(g.status.as_str(), "REMOVED");
    }

    #[test]
    fn keyword_formats_two_decimals() {
        let json = r#"{"id":"1","keyword":"running shoes","avgQs":"7.456"}"#;
        let k: Keyword = serde_json::from_str(json).unwrap();
        assert_eq!(k.avg_qs_display(), "7.46");

        let k = Keyword { id: KeywordId(2), keyword: "x".into(), avg_qs: 7.0 };
        assert_eq!(k.avg_qs_display(), "7.00");
    }

    #[test]
    fn keyword_page_accepts_string_counts() {
        let json = r#"{"keywords":[],"total":"95","page":"1","limit":10}"#;
        let page: KeywordPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 95);
        assert_eq!(page.limit, 10);
    }
}
