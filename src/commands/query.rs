use anyhow::Result;

use hashpulse::config::Config;

use super::{open_service, parse_category, parse_platform, print_json};

/// Filters shared by the report commands
#[derive(Debug, Default)]
pub struct ReportFilters {
    pub platform: Option<String>,
    pub category: Option<String>,
    pub days: Option<u32>,
}

pub fn trend(config: &Config, hashtag: &str, platform: Option<&str>, days: Option<u32>) -> Result<()> {
    let service = open_service(config)?;
    let report = service.compute_trend(hashtag, parse_platform(platform)?, days)?;
    print_json(&report)
}

pub fn predict(config: &Config, hashtag: &str, platform: Option<&str>) -> Result<()> {
    let service = open_service(config)?;
    let report = service.compute_predictions(hashtag, parse_platform(platform)?)?;
    print_json(&report)
}

pub fn growth(
    config: &Config,
    platform: Option<&str>,
    category: Option<&str>,
    days: Option<u32>,
) -> Result<()> {
    let service = open_service(config)?;
    let report = service.compute_growth_ranking(
        parse_platform(platform)?,
        parse_category(category)?,
        days,
    )?;
    print_json(&report)
}

pub fn trending(
    config: &Config,
    platform: Option<&str>,
    category: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let service = open_service(config)?;
    let records = service.trending(parse_platform(platform)?, parse_category(category)?, limit)?;
    print_json(&records)
}

pub fn report_categories(config: &Config, filters: &ReportFilters) -> Result<()> {
    let service = open_service(config)?;
    let stats = service.category_report(parse_platform(filters.platform.as_deref())?, filters.days)?;
    print_json(&stats)
}

pub fn report_platforms(config: &Config, filters: &ReportFilters) -> Result<()> {
    let service = open_service(config)?;
    print_json(&service.platform_report(filters.days)?)
}

pub fn report_sentiment(config: &Config, filters: &ReportFilters) -> Result<()> {
    let service = open_service(config)?;
    let overview = service.sentiment_report(
        parse_platform(filters.platform.as_deref())?,
        parse_category(filters.category.as_deref())?,
        filters.days,
    )?;
    print_json(&overview)
}

pub fn report_overview(config: &Config) -> Result<()> {
    let service = open_service(config)?;
    print_json(&service.overview()?)
}
