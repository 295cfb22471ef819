//! Selection State Controller.
//!
//! Owns the current account, campaign, ad group and date range. Mutations
//! apply the cascade synchronously and then recompute [`Eligibility`], so a
//! composer that reads eligibility right after a mutation never sees a
//! child scoped to a stale parent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::domain::{Account, AdGroup, AdGroupId, Campaign, DateRange, Entity};
use crate::query::QueryKey;

/// One level of the entity hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Account,
    Campaign,
    AdGroup,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Account, Tier::Campaign, Tier::AdGroup];

    /// The tier this one is scoped by, if any, under `layout`.
    pub fn parent(self, layout: &LayoutConfig) -> Option<Tier> {
        match self {
            Tier::Account => None,
            Tier::Campaign if layout.account_tier => Some(Tier::Account),
            Tier::Campaign => None,
            Tier::AdGroup => Some(Tier::Campaign),
        }
    }

    /// Whether the tier has a control at all under `layout`.
    pub fn is_shown(self, layout: &LayoutConfig) -> bool {
        !matches!(self, Tier::Account) || layout.account_tier
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Account => Account::LABEL,
            Tier::Campaign => Campaign::LABEL,
            Tier::AdGroup => AdGroup::LABEL,
        }
    }

    /// Prompt shown on children while this tier has no selection.
    pub fn missing_prompt(self) -> &'static str {
        match self {
            Tier::Account => "Select an account first",
            Tier::Campaign => "Select a campaign first",
            Tier::AdGroup => "Select an ad group first",
        }
    }
}

/// Whether a tier's selector may load and accept input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierGate {
    /// Not part of this layout.
    Hidden,
    /// Parent missing; no fetch is issued.
    Disabled { prompt: &'static str },
    /// Options come from `key`.
    Enabled { key: QueryKey },
}

impl TierGate {
    pub fn key(&self) -> Option<&QueryKey> {
        match self {
            TierGate::Enabled { key } => Some(key),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, TierGate::Enabled { .. })
    }
}

/// Everything the results view needs from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultsScope {
    pub ad_group: AdGroupId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Derived view of what may load, recomputed after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub account: TierGate,
    pub campaign: TierGate,
    pub ad_group: TierGate,
    pub date_enabled: bool,
    pub results: Option<ResultsScope>,
}

impl Eligibility {
    pub fn gate(&self, tier: Tier) -> &TierGate {
        match tier {
            Tier::Account => &self.account,
            Tier::Campaign => &self.campaign,
            Tier::AdGroup => &self.ad_group,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    layout: LayoutConfig,
    account: Option<Account>,
    campaign: Option<Campaign>,
    ad_group: Option<AdGroup>,
    date_range: DateRange,
    revision: u64,
    eligibility: Eligibility,
}

impl Selection {
    pub fn new(layout: LayoutConfig, date_range: DateRange) -> Self {
        let mut selection = Self {
            layout,
            account: None,
            campaign: None,
            ad_group: None,
            date_range,
            revision: 0,
            eligibility: Eligibility {
                account: TierGate::Hidden,
                campaign: TierGate::Hidden,
                ad_group: TierGate::Hidden,
                date_enabled: false,
                results: None,
            },
        };
        selection.eligibility = selection.compute();
        selection
    }

    /// Replace the account. Campaign and ad group are always cleared.
    pub fn set_account(&mut self, account: Option<Account>) {
        self.account = account;
        self.campaign = None;
        self.ad_group = None;
        self.changed();
    }

    /// Replace the campaign. The ad group is always cleared.
    pub fn set_campaign(&mut self, campaign: Option<Campaign>) {
        self.campaign = campaign;
        self.ad_group = None;
        self.changed();
    }

    pub fn set_ad_group(&mut self, ad_group: Option<AdGroup>) {
        self.ad_group = ad_group;
        self.changed();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
        self.changed();
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    pub fn ad_group(&self) -> Option<&AdGroup> {
        self.ad_group.as_ref()
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Bumped on every mutation, including no-op ones.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    /// Raw id of the selection at `tier`.
    pub fn selected_id(&self, tier: Tier) -> Option<i64> {
        match tier {
            Tier::Account => self.account.as_ref().map(Entity::raw_id),
            Tier::Campaign => self.campaign.as_ref().map(Entity::raw_id),
            Tier::AdGroup => self.ad_group.as_ref().map(Entity::raw_id),
        }
    }

    fn changed(&mut self) {
        self.revision += 1;
        self.eligibility = self.compute();
    }

    fn compute(&self) -> Eligibility {
        let gate = |tier: Tier| -> TierGate {
            if !tier.is_shown(&self.layout) {
                return TierGate::Hidden;
            }
            if let Some(parent) = tier.parent(&self.layout) {
                if self.selected_id(parent).is_none() {
                    return TierGate::Disabled {
                        prompt: parent.missing_prompt(),
                    };
                }
            }
            let key = match tier {
                Tier::Account => QueryKey::Accounts,
                Tier::Campaign => QueryKey::Campaigns {
                    account: if self.layout.account_tier {
                        self.account.as_ref().map(|a| a.id)
                    } else {
                        None
                    },
                },
                Tier::AdGroup => match self.campaign.as_ref() {
                    Some(c) => QueryKey::AdGroups { campaign: c.id },
                    None => {
                        return TierGate::Disabled {
                            prompt: Tier::Campaign.missing_prompt(),
                        }
                    }
                },
            };
            TierGate::Enabled { key }
        };

        let date_enabled = !self.layout.account_tier || self.ad_group.is_some();
        let results = match (self.ad_group.as_ref(), self.date_range.bounds()) {
            (Some(group), Some((start, end))) => Some(ResultsScope {
                ad_group: group.id,
                start,
                end,
            }),
            _ => None,
        };

        Eligibility {
            account: gate(Tier::Account),
            campaign: gate(Tier::Campaign),
            ad_group: gate(Tier::AdGroup),
            date_enabled,
            results,
        }
    }
}
