//! AdLens Core: domain types, remote data client, selection controller and
//! the view models behind the keyword dashboard.
//!
//! - Domain types (accounts, campaigns, ad groups, keywords, date ranges)
//! - `DashboardApi` trait with a blocking HTTP implementation
//! - Selection State Controller with the account → campaign → ad group cascade
//! - Selector and results view models, sort FSM, pagination, search debounce
//! - Per-key fetch cache
//! - Configuration and logging setup

pub mod api;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod logging;
pub mod query;
pub mod results;
pub mod selection;
pub mod selector;

#[cfg(test)]
mod tests {
    use super::*;

    /// Everything that crosses the worker channel must be `Send`.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<query::QueryKey>();
        require_sync::<query::QueryKey>();
        require_send::<api::Payload>();
        require_sync::<api::Payload>();
        require_send::<api::ApiError>();
        require_sync::<api::ApiError>();
        require_send::<api::HttpApi>();
        require_sync::<api::HttpApi>();
        require_send::<selection::Selection>();
        require_send::<results::KeywordBrowser>();
    }

    /// `DashboardApi` stays object-safe so the worker can hold `Arc<dyn DashboardApi>`.
    #[test]
    fn dashboard_api_is_object_safe() {
        fn _takes(api: &dyn api::DashboardApi) -> Result<Vec<domain::Account>, api::ApiError> {
            api.accounts()
        }
    }
}
