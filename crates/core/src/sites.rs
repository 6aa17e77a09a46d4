use crate::error::{Result, SiteSearchError};
use crate::models::SiteRecord;
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads a JSON array of site objects.
pub fn load_sites(path: &Path) -> Result<Vec<SiteRecord>> {
    let content = fs::read_to_string(path).map_err(|source| SiteSearchError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let sites = parse_sites(&content)?;
    info!("Loaded {} site(s) from {}", sites.len(), path.display());
    Ok(sites)
}

pub fn parse_sites(content: &str) -> Result<Vec<SiteRecord>> {
    Ok(serde_json::from_str(content)?)
}
