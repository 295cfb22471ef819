//! Results view driven end to end against an in-memory backend.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use adlens_core::api::{fetch, ApiError, DashboardApi};
use adlens_core::config::LayoutConfig;
use adlens_core::domain::{
    Account, AccountId, AdGroup, AdGroupId, Campaign, CampaignId, DateRange, EntityStatus,
    Keyword, KeywordId, KeywordPage,
};
use adlens_core::fetch::Caches;
use adlens_core::query::{KeywordQuery, QueryKey};
use adlens_core::results::{EmptyReason, KeywordBrowser, ResultsView};
use adlens_core::selection::Selection;

/// Records every request path and serves a fixed keyword total.
struct FakeApi {
    total: u64,
    requests: Mutex<Vec<String>>,
}

impl FakeApi {
    fn new(total: u64) -> Self {
        Self { total, requests: Mutex::new(Vec::new()) }
    }

    fn record(&self, key: &QueryKey) {
        self.requests.lock().unwrap().push(key.path());
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl DashboardApi for FakeApi {
    fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.record(&QueryKey::Accounts);
        Ok(vec![Account { id: AccountId(1), name: "Acme".into(), status: EntityStatus::Enabled }])
    }

    fn campaigns(&self, account: Option<AccountId>) -> Result<Vec<Campaign>, ApiError> {
        self.record(&QueryKey::Campaigns { account });
        Ok(vec![])
    }

    fn ad_groups(&self, campaign: CampaignId) -> Result<Vec<AdGroup>, ApiError> {
        self.record(&QueryKey::AdGroups { campaign });
        Ok(vec![])
    }

    fn keywords(&self, query: &KeywordQuery) -> Result<KeywordPage, ApiError> {
        self.record(&QueryKey::Keywords(query.clone()));
        let first = u64::from(query.page - 1) * u64::from(query.limit);
        let rows = self.total.saturating_sub(first).min(u64::from(query.limit));
        Ok(KeywordPage {
            keywords: (0..rows)
                .map(|i| Keyword {
                    id: KeywordId((first + i) as i64),
                    keyword: format!("keyword {}", first + i),
                    avg_qs: 7.25,
                })
                .collect(),
            total: self.total,
            page: u64::from(query.page),
            limit: u64::from(query.limit),
        })
    }
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn selected(layout: LayoutConfig) -> Selection {
    let mut s = Selection::new(layout, DateRange::empty());
    s.set_account(Some(Account { id: AccountId(1), name: "Acme".into(), status: EntityStatus::Enabled }));
    s.set_campaign(Some(Campaign {
        id: CampaignId(2),
        name: "Brand".into(),
        status: EntityStatus::Enabled,
        account_id: Some(1),
    }));
    s.set_ad_group(Some(AdGroup {
        id: AdGroupId(42),
        name: "Shoes".into(),
        status: EntityStatus::Enabled,
        campaign_id: Some(2),
    }));
    s.set_date_range(DateRange::new(jan(1), jan(31)));
    s
}

/// One composer pass: adopt scope, dispatch if needed, run the request inline.
fn sync(api: &FakeApi, selection: &Selection, browser: &mut KeywordBrowser, caches: &mut Caches) {
    browser.set_scope(selection.eligibility().results);
    if let Some(key) = browser.key() {
        if caches.begin(&key, false) {
            let result = fetch(api, &key);
            caches.complete(key, result);
        }
    }
}

fn current_view(browser: &KeywordBrowser, caches: &Caches) -> ResultsView {
    let state = browser.key().and_then(|k| caches.keywords.get(&k));
    browser.view(state)
}

#[test]
fn given_group_42_and_january_when_synced_then_exact_request_and_no_data_message() {
    let api = FakeApi::new(0);
    let selection = selected(LayoutConfig::default());
    let mut browser = KeywordBrowser::new(selection.layout());
    let mut caches = Caches::default();

    sync(&api, &selection, &mut browser, &mut caches);

    assert_eq!(
        api.requests(),
        vec!["/keyword/42?start=2024-01-01&end=2024-01-31&page=1&limit=50".to_string()]
    );
    let view = current_view(&browser, &caches);
    assert_eq!(view, ResultsView::Empty(EmptyReason::NoData));
    assert_eq!(
        EmptyReason::NoData.message(),
        "There is no keyword data for the selected date range."
    );
}

#[test]
fn given_95_rows_at_10_per_page_then_ten_pages_and_last_page_has_five() {
    let api = FakeApi::new(95);
    let selection = selected(LayoutConfig::compact());
    let mut browser = KeywordBrowser::new(selection.layout());
    let mut caches = Caches::default();
    sync(&api, &selection, &mut browser, &mut caches);

    while browser.next_page(95) {
        sync(&api, &selection, &mut browser, &mut caches);
    }
    match current_view(&browser, &caches) {
        ResultsView::Rows { keywords, pagination } => {
            assert_eq!(pagination.total_pages(), 10);
            assert_eq!(pagination.page, 10);
            assert!(!pagination.has_next());
            assert_eq!(keywords.len(), 5);
            assert_eq!(pagination.showing(), (91, 95));
        }
        other => panic!("unexpected view {other:?}"),
    }
    assert_eq!(api.requests().len(), 10);
}

#[test]
fn given_single_character_search_then_no_request_is_made() {
    let api = FakeApi::new(3);
    let selection = selected(LayoutConfig::default());
    let mut browser = KeywordBrowser::new(selection.layout());
    let mut caches = Caches::default();
    sync(&api, &selection, &mut browser, &mut caches);
    assert_eq!(api.requests().len(), 1);

    let t0 = Instant::now();
    browser.search_push('a', t0);
    browser.tick(t0 + Duration::from_millis(501));
    sync(&api, &selection, &mut browser, &mut caches);

    assert_eq!(api.requests().len(), 1);
    assert_eq!(
        current_view(&browser, &caches),
        ResultsView::Empty(EmptyReason::SearchTooShort)
    );
}

#[test]
fn given_repeated_syncs_then_each_key_is_requested_once() {
    let api = FakeApi::new(10);
    let selection = selected(LayoutConfig::default());
    let mut browser = KeywordBrowser::new(selection.layout());
    let mut caches = Caches::default();
    for _ in 0..3 {
        sync(&api, &selection, &mut browser, &mut caches);
    }
    assert_eq!(api.requests().len(), 1);
}

#[test]
fn given_new_ad_group_then_stale_page_is_not_shown() {
    let api = FakeApi::new(10);
    let mut selection = selected(LayoutConfig::default());
    let mut browser = KeywordBrowser::new(selection.layout());
    let mut caches = Caches::default();
    sync(&api, &selection, &mut browser, &mut caches);

    selection.set_ad_group(Some(AdGroup {
        id: AdGroupId(43),
        name: "Boots".into(),
        status: EntityStatus::Enabled,
        campaign_id: Some(2),
    }));
    browser.set_scope(selection.eligibility().results);
    let key = browser.key().unwrap();
    caches.begin(&key, false);

    // The old page is still cached, but the view reads only the current key.
    assert_eq!(current_view(&browser, &caches), ResultsView::Loading);
}
