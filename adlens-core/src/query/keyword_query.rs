use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::sort::SortState;
use crate::domain::date_range::query_date;
use crate::domain::AdGroupId;

/// Fully-resolved parameters for one `/keyword/{adGroupId}` request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordQuery {
    pub ad_group_id: AdGroupId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: SortState,
}

impl KeywordQuery {
    pub fn new(ad_group_id: AdGroupId, start: NaiveDate, end: NaiveDate, limit: u32) -> Self {
        Self {
            ad_group_id,
            start,
            end,
            page: 1,
            limit,
            search: None,
            sort: SortState::Unsorted,
        }
    }

    /// Query parameters in wire order; unset optionals are omitted.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("start", query_date(self.start)),
            ("end", query_date(self.end)),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(field) = self.sort.field() {
            params.push(("sortField", field.as_param().to_string()));
        }
        if let Some(direction) = self.sort.direction() {
            params.push(("sortDirection", direction.as_param().to_string()));
        }
        params
    }

    /// Request path relative to the API base URL, query string included.
    pub fn path(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.params() {
            serializer.append_pair(name, &value);
        }
        format!("/keyword/{}?{}", self.ad_group_id, serializer.finish())
    }
}
