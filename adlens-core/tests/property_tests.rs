//! Property tests for selection and query invariants.
//!
//! Uses proptest to verify:
//! 1. Cascade clearing: after any action sequence no child outlives its parent change
//! 2. Eligibility: child gates are enabled exactly when the parent is selected
//! 3. Sort cycle: three toggles of one column return to unsorted
//! 4. Pagination: the clamped page always lies in [1, pages]

use proptest::prelude::*;
use adlens_core::config::LayoutConfig;
use adlens_core::domain::{
    Account, AccountId, AdGroup, AdGroupId, Campaign, CampaignId, DateRange, EntityStatus,
};
use adlens_core::query::pagination::{clamp_page, total_pages};
use adlens_core::query::{SortField, SortState};
use adlens_core::selection::{Selection, Tier};

// ── Strategies (proptest) ────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Action {
    Account(Option<i64>),
    Campaign(Option<i64>),
    AdGroup(Option<i64>),
}

fn arb_action() -> impl Strategy<Value = Action> {
    let id = proptest::option::of(1..5_i64);
    prop_oneof![
        id.clone().prop_map(Action::Account),
        id.clone().prop_map(Action::Campaign),
        id.prop_map(Action::AdGroup),
    ]
}

fn arb_field() -> impl Strategy<Value = SortField> {
    prop_oneof![Just(SortField::Keyword), Just(SortField::AvgQs)]
}

fn account(id: i64) -> Account {
    Account { id: AccountId(id), name: format!("A{id}"), status: EntityStatus::Enabled }
}

fn campaign(id: i64) -> Campaign {
    Campaign {
        id: CampaignId(id),
        name: format!("C{id}"),
        status: EntityStatus::Enabled,
        account_id: None,
    }
}

fn group(id: i64) -> AdGroup {
    AdGroup {
        id: AdGroupId(id),
        name: format!("G{id}"),
        status: EntityStatus::Enabled,
        campaign_id: None,
    }
}

fn apply(selection: &mut Selection, action: &Action) {
    match action {
        Action::Account(id) => selection.set_account(id.map(account)),
        Action::Campaign(id) => selection.set_campaign(id.map(campaign)),
        Action::AdGroup(id) => selection.set_ad_group(id.map(group)),
    }
}

// ── 1. Cascade clearing ──────────────────────────────────────────────

proptest! {
    #[test]
    fn account_or_campaign_change_clears_descendants(
        actions in proptest::collection::vec(arb_action(), 1..30)
    ) {
        let mut s = Selection::new(LayoutConfig::default(), DateRange::empty());
        for action in &actions {
            apply(&mut s, action);
            match action {
                Action::Account(_) => {
                    prop_assert!(s.campaign().is_none());
                    prop_assert!(s.ad_group().is_none());
                }
                Action::Campaign(_) => prop_assert!(s.ad_group().is_none()),
                Action::AdGroup(id) => prop_assert_eq!(s.selected_id(Tier::AdGroup), *id),
            }
        }
    }
}

// ── 2. Eligibility tracks parents ────────────────────────────────────

proptest! {
    #[test]
    fn child_gate_enabled_iff_parent_selected(
        actions in proptest::collection::vec(arb_action(), 0..30)
    ) {
        let layout = LayoutConfig::default();
        let mut s = Selection::new(layout, DateRange::empty());
        for action in &actions {
            apply(&mut s, action);
        }
        let e = s.eligibility();
        prop_assert!(e.account.is_enabled());
        prop_assert_eq!(e.campaign.is_enabled(), s.account().is_some());
        prop_assert_eq!(e.ad_group.is_enabled(), s.campaign().is_some());
        prop_assert_eq!(e.date_enabled, s.ad_group().is_some());
    }
}

// ── 3. Sort cycle ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn three_toggles_return_to_unsorted(start in arb_field(), field in arb_field()) {
        let initial = SortState::Unsorted.toggle(start);
        let once = initial.toggle(field);
        if start == field {
            prop_assert_eq!(once, SortState::Descending(field));
            prop_assert_eq!(once.toggle(field), SortState::Unsorted);
        } else {
            prop_assert_eq!(once, SortState::Ascending(field));
            prop_assert_eq!(once.toggle(field).toggle(field), SortState::Unsorted);
        }
    }
}

// ── 4. Pagination ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn clamped_page_in_range(page in 0..1000_u32, total in 0..100_000_u64, limit in prop_oneof![Just(10_u32), Just(50)]) {
        let pages = total_pages(total, limit);
        let clamped = clamp_page(page, pages);
        prop_assert!(clamped >= 1);
        prop_assert!(clamped <= pages.max(1));
    }
}
