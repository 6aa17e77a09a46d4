use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use site_search_core::config::AppConfig;
use site_search_core::{filter_sites, sites, SiteRecord, Titled};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct FilterReport {
    pub query: Option<String>,
    pub total: usize,
    pub matched: usize,
    pub sites: Vec<SiteRecord>,
}

/// Loads the site list (flag wins over config) and filters it by title.
pub fn run_filter(
    cfg: &AppConfig,
    sites_path: Option<&str>,
    query: Option<&str>,
) -> Result<FilterReport> {
    let path = sites_path
        .or(cfg.sites.path.as_deref())
        .ok_or_else(|| anyhow!("no site list given; pass --sites or set sites.path"))?;
    let all = sites::load_sites(Path::new(path)).with_context(|| format!("loading {path}"))?;

    let mut matched = filter_sites(&all, query);
    let count = matched.len();
    if let Some(max) = cfg.search.max_results {
        matched.truncate(max);
    }
    info!("{} of {} site(s) match", count, all.len());

    Ok(FilterReport {
        query: query.map(str::to_string),
        total: all.len(),
        matched: count,
        sites: matched,
    })
}

pub fn render_titles(report: &FilterReport) -> String {
    if report.sites.is_empty() {
        return "No sites found".to_string();
    }
    let mut lines: Vec<String> = report
        .sites
        .iter()
        .map(|s| s.title().unwrap_or("(untitled)").to_string())
        .collect();
    if report.sites.len() < report.matched {
        lines.push(format!(
            "... {} more",
            report.matched - report.sites.len()
        ));
    }
    lines.join("\n")
}

/// Text or pretty JSON, as printed by `site-search filter`.
pub fn render(report: &FilterReport, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(render_titles(report))
    }
}
