//! Core library: site records, title filtering, module settings, config.

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod settings;
pub mod sites;

pub use error::{FieldError, Result, SettingsError, SiteSearchError};
pub use models::{SiteRecord, Titled};
pub use search::{filter_sites, matching, SiteQuery};
