//! Render model shared by the account, campaign and ad group selectors.

use crate::domain::ids::coerce_id;
use crate::domain::Entity;
use crate::fetch::FetchState;
use crate::selection::TierGate;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorView<T> {
    Hidden,
    Disabled { prompt: &'static str },
    Loading,
    Failed { message: String },
    Ready { options: Vec<T> },
}

impl<T: Entity> SelectorView<T> {
    /// Combine the tier gate with the cache entry for its current key.
    ///
    /// An enabled gate with no cache entry yet reads as `Loading`; the
    /// composer dispatches the fetch in the same pass.
    pub fn derive(gate: &TierGate, state: Option<&FetchState<Vec<T>>>) -> Self {
        match gate {
            TierGate::Hidden => SelectorView::Hidden,
            TierGate::Disabled { prompt } => SelectorView::Disabled { prompt: *prompt },
            TierGate::Enabled { .. } => match state {
                None | Some(FetchState::Loading) => SelectorView::Loading,
                Some(FetchState::Failed(_)) => SelectorView::Failed {
                    message: load_error::<T>(),
                },
                Some(FetchState::Ready(options)) => SelectorView::Ready {
                    options: options.clone(),
                },
            },
        }
    }

    /// Only a ready list can be opened or chosen from.
    pub fn accepts_input(&self) -> bool {
        matches!(self, SelectorView::Ready { .. })
    }

    pub fn options(&self) -> &[T] {
        match self {
            SelectorView::Ready { options } => options,
            _ => &[],
        }
    }

    /// Rows of the open list: the "no value" entry followed by every option.
    pub fn choices(&self) -> Vec<Choice> {
        let mut rows = vec![Choice {
            value: String::new(),
            label: T::PLACEHOLDER.to_string(),
            enabled: None,
        }];
        rows.extend(self.options().iter().map(|o| Choice {
            value: o.raw_id().to_string(),
            label: o.name().to_string(),
            enabled: Some(o.status().is_enabled()),
        }));
        rows
    }
}

/// One row of an open selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Raw control value; empty for the "no value" row.
    pub value: String,
    pub label: String,
    /// Status badge; `None` on the "no value" row.
    pub enabled: Option<bool>,
}

pub fn load_error<T: Entity>() -> String {
    format!("Error loading {}", T::PLURAL)
}

/// Map a raw control value back to the option with that numeric id.
///
/// The empty value, a non-numeric value and an id not in `options` all
/// resolve to `None`.
pub fn resolve_choice<T: Entity>(options: &[T], raw: &str) -> Option<T> {
    let id = coerce_id(raw)?;
    options.iter().find(|o| o.raw_id() == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::domain::{AdGroup, AdGroupId, Campaign, CampaignId, EntityStatus};
    use crate::query::QueryKey;

    fn campaigns() -> Vec<Campaign> {
        vec![
            Campaign {
                id: CampaignId(3),
                name: "Brand".into(),
                status: EntityStatus::Enabled,
                account_id: Some(1),
            },
            Campaign {
                id: CampaignId(11),
                name: "Generic".into(),
                status: EntityStatus::Other("PAUSED".into()),
                account_id: Some(1),
            },
        ]
    }

    #[test]
    fn resolves_by_numeric_id() {
        let opts = campaigns();
        assert_eq!(resolve_choice(&opts, "11").map(|c| c.name), Some("Generic".into()));
        assert_eq!(resolve_choice(&opts, " 3 ").map(|c| c.id), Some(CampaignId(3)));
    }

    #[test]
    fn unknown_or_empty_values_resolve_to_none() {
        let opts = campaigns();
        assert!(resolve_choice(&opts, "").is_none());
        assert!(resolve_choice(&opts, "99").is_none());
        assert!(resolve_choice(&opts, "abc").is_none());
    }

    #[test]
    fn view_follows_gate_then_cache() {
        let gate = TierGate::Disabled { prompt: "Select a campaign first" };
        let view = SelectorView::<AdGroup>::derive(&gate, None);
        assert_eq!(view, SelectorView::Disabled { prompt: "Select a campaign first" });
        assert!(!view.accepts_input());

        let gate = TierGate::Enabled { key: QueryKey::AdGroups { campaign: CampaignId(1) } };
        assert_eq!(SelectorView::<AdGroup>::derive(&gate, None), SelectorView::Loading);

        let failed = FetchState::Failed(ApiError::Network("down".into()));
        assert_eq!(
            SelectorView::<AdGroup>::derive(&gate, Some(&failed)),
            SelectorView::Failed { message: "Error loading ad groups".into() }
        );

        let ready = FetchState::Ready(vec![AdGroup {
            id: AdGroupId(5),
            name: "Shoes".into(),
            status: EntityStatus::Enabled,
            campaign_id: Some(1),
        }]);
        let view = SelectorView::derive(&gate, Some(&ready));
        assert!(view.accepts_input());
        assert_eq!(view.options().len(), 1);
    }

    #[test]
    fn choices_start_with_no_value_row() {
        let view = SelectorView::Ready { options: campaigns() };
        let rows = view.choices();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value, "");
        assert_eq!(rows[0].label, "Select a campaign");
        assert_eq!(rows[2].enabled, Some(false));
        assert_eq!(resolve_choice(view.options(), &rows[0].value), None);
    }
}
