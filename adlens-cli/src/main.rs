//! adlens CLI: read the dashboard backend from the command line.
//!
//! Commands:
//! - `accounts`: list accounts
//! - `campaigns`: list campaigns, optionally scoped to one account
//! - `ad-groups`: list the ad groups of a campaign
//! - `keywords`: fetch one page of keyword metrics for an ad group
//! - `config check`: print the resolved configuration

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use adlens_core::api::{DashboardApi, HttpApi};
use adlens_core::config::{DashboardConfig, ALLOWED_PAGE_SIZES};
use adlens_core::domain::{AccountId, AdGroupId, CampaignId, DateRange, Entity, KeywordPage};
use adlens_core::logging;
use adlens_core::query::{KeywordQuery, Pagination, SearchTerm, SortField, SortState};
use adlens_core::results::EmptyReason;

#[derive(Parser)]
#[command(name = "adlens", version, about = "adlens CLI: keyword analytics backend reader")]
struct Cli {
    /// Path to adlens.toml (defaults to ./adlens.toml, then the config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accounts.
    Accounts,
    /// List campaigns.
    Campaigns {
        /// Only campaigns of this account.
        #[arg(long)]
        account: Option<i64>,
    },
    /// List the ad groups of a campaign.
    AdGroups {
        /// Campaign id.
        campaign: i64,
    },
    /// Fetch one page of keywords for an ad group.
    Keywords {
        /// Ad group id.
        ad_group: i64,

        /// Start date (YYYY-MM-DD). Defaults to 30 days ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Rows per page (10 or 50). Defaults to the configured layout.
        #[arg(long)]
        limit: Option<u32>,

        /// Keyword text filter (at least two characters).
        #[arg(long)]
        search: Option<String>,

        /// Sort column.
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,

        /// Sort descending instead of ascending.
        #[arg(long, default_value_t = false, requires = "sort")]
        desc: bool,
    },
    /// Configuration commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Resolve and print the configuration, failing if it is invalid.
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortColumn {
    Keyword,
    AvgQs,
}

impl From<SortColumn> for SortField {
    fn from(col: SortColumn) -> Self {
        match col {
            SortColumn::Keyword => SortField::Keyword,
            SortColumn::AvgQs => SortField::AvgQs,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())
        .context("failed to load dashboard configuration")?;
    logging::init_stderr(&config.logging.level).context("failed to initialise logging")?;
    debug!(base_url = %config.api.base_url, source = ?config.source, "configuration loaded");

    if let Commands::Config { action: ConfigAction::Check } = cli.command {
        print_config(&config);
        return Ok(());
    }

    let api = HttpApi::new(config.api.clone()).context("failed to build API client")?;

    match cli.command {
        Commands::Accounts => {
            let accounts = api.accounts().context("failed to list accounts")?;
            print_entities(&accounts, cli.json)
        }
        Commands::Campaigns { account } => {
            let campaigns = api
                .campaigns(account.map(AccountId))
                .context("failed to list campaigns")?;
            print_entities(&campaigns, cli.json)
        }
        Commands::AdGroups { campaign } => {
            let groups = api
                .ad_groups(CampaignId(campaign))
                .with_context(|| format!("failed to list ad groups of campaign {campaign}"))?;
            print_entities(&groups, cli.json)
        }
        Commands::Keywords {
            ad_group,
            start,
            end,
            page,
            limit,
            search,
            sort,
            desc,
        } => {
            let limit = limit.unwrap_or(config.layout.page_size);
            let query = build_query(ad_group, start, end, page, limit, search, sort, desc)?;
            let Some(query) = query else {
                println!("{}", EmptyReason::SearchTooShort.message());
                return Ok(());
            };
            debug!(path = %query.path(), "fetching keywords");
            let page = api
                .keywords(&query)
                .with_context(|| format!("failed to fetch keywords for ad group {ad_group}"))?;
            print_keywords(&query, &page, cli.json)
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Build the keyword query; `None` when the search term is too short to send.
#[allow(clippy::too_many_arguments)]
fn build_query(
    ad_group: i64,
    start: Option<String>,
    end: Option<String>,
    page: u32,
    limit: u32,
    search: Option<String>,
    sort: Option<SortColumn>,
    desc: bool,
) -> Result<Option<KeywordQuery>> {
    if !ALLOWED_PAGE_SIZES.contains(&limit) {
        bail!("--limit must be one of {:?}, got {limit}", ALLOWED_PAGE_SIZES);
    }
    if page == 0 {
        bail!("--page starts at 1");
    }

    let today = chrono::Local::now().date_naive();
    let default_range = DateRange::last_30_days(today);
    let (default_start, default_end) = default_range
        .bounds()
        .context("default date range is incomplete")?;

    let start = parse_date(start.as_deref(), "--start")?.unwrap_or(default_start);
    let end = parse_date(end.as_deref(), "--end")?.unwrap_or(default_end);
    if start > end {
        bail!("--start {start} is after --end {end}");
    }

    let mut query = KeywordQuery::new(AdGroupId(ad_group), start, end, limit);
    query.page = page;
    query.sort = match sort.map(SortField::from) {
        None => SortState::Unsorted,
        Some(field) if desc => SortState::Descending(field),
        Some(field) => SortState::Ascending(field),
    };

    match SearchTerm::classify(search.as_deref().unwrap_or_default()) {
        SearchTerm::None => {}
        SearchTerm::TooShort => return Ok(None),
        SearchTerm::Filter(text) => query.search = Some(text),
    }
    Ok(Some(query))
}

fn parse_date(raw: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("{flag} expects YYYY-MM-DD, got {s:?}"))
    })
    .transpose()
}

fn print_config(config: &DashboardConfig) {
    println!("=== Configuration ===");
    match &config.source {
        Some(path) => println!("Source:       {}", path.display()),
        None => println!("Source:       (defaults and environment)"),
    }
    println!("API base URL: {}", config.api.base_url);
    println!("Timeout:      {}s", config.api.timeout.as_secs());
    println!("Account tier: {}", config.layout.account_tier);
    println!("Search/sort:  {}", config.layout.search_and_sort);
    println!("Page size:    {}", config.layout.page_size);
    println!("Log level:    {}", config.logging.level);
    match &config.logging.file {
        Some(path) => println!("Log file:     {}", path.display()),
        None => println!("Log file:     {}", logging::default_log_path().display()),
    }
}

fn print_entities<T: Entity + Serialize>(items: &[T], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("No {} found.", T::PLURAL);
        return Ok(());
    }

    let width = items
        .iter()
        .map(|i| i.name().chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    println!("{:>8}  {:<width$}  {:<8}", "ID", "Name", "Status");
    println!("{}", "-".repeat(8 + 2 + width + 2 + 8));
    for item in items {
        println!(
            "{:>8}  {:<width$}  {:<8}",
            item.raw_id(),
            item.name(),
            item.status().as_str()
        );
    }
    Ok(())
}

fn print_keywords(query: &KeywordQuery, page: &KeywordPage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    if page.keywords.is_empty() {
        let reason = if query.search.is_some() {
            EmptyReason::NoSearchMatches
        } else {
            EmptyReason::NoData
        };
        println!("{}", reason.message());
        return Ok(());
    }

    let width = page
        .keywords
        .iter()
        .map(|k| k.keyword.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);
    println!("{:<width$}  {:>17}", "Keyword", SortField::AvgQs.header());
    println!("{}", "-".repeat(width + 2 + 17));
    for row in &page.keywords {
        println!("{:<width$}  {:>17}", row.keyword, row.avg_qs_display());
    }

    let pagination = Pagination::new(query.page, query.limit, page.total);
    let (first, last) = pagination.showing();
    println!();
    println!(
        "Showing {first} to {last} of {} results  |  Page {} of {}",
        pagination.total,
        pagination.page,
        pagination.total_pages()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_keyword_flags() {
        let cli = Cli::try_parse_from([
            "adlens", "keywords", "42", "--start", "2024-01-01", "--end", "2024-01-31",
            "--sort", "avg-qs", "--desc", "--limit", "10",
        ])
        .unwrap();
        let Commands::Keywords { ad_group, sort, desc, limit, .. } = cli.command else {
            panic!("expected keywords command");
        };
        assert_eq!(ad_group, 42);
        assert!(matches!(sort, Some(SortColumn::AvgQs)));
        assert!(desc);
        assert_eq!(limit, Some(10));
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Cli::try_parse_from(["adlens", "keywords", "42", "--desc"]).is_err());
    }

    #[test]
    fn query_path_carries_every_parameter() {
        let query = build_query(
            42,
            Some("2024-01-01".into()),
            Some("2024-01-31".into()),
            2,
            10,
            Some(" shoes ".into()),
            Some(SortColumn::Keyword),
            true,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            query.path(),
            "/keyword/42?start=2024-01-01&end=2024-01-31&page=2&limit=10\
             &search=shoes&sortField=keyword&sortDirection=desc"
        );
    }

    #[test]
    fn single_character_search_is_not_sent() {
        let query = build_query(
            42,
            Some("2024-01-01".into()),
            Some("2024-01-31".into()),
            1,
            50,
            Some("a".into()),
            None,
            false,
        )
        .unwrap();
        assert!(query.is_none());
    }

    #[test]
    fn rejects_bad_arguments() {
        let bad_limit = build_query(1, None, None, 1, 25, None, None, false);
        assert!(bad_limit.is_err());

        let inverted = build_query(
            1,
            Some("2024-02-01".into()),
            Some("2024-01-01".into()),
            1,
            50,
            None,
            None,
            false,
        );
        assert!(inverted.is_err());

        let bad_date = build_query(1, Some("01/02/2024".into()), None, 1, 50, None, None, false);
        assert!(bad_date.is_err());
    }
}
