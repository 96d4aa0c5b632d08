//! Run configuration
//!
//! Every value the pipeline depends on is carried here so a run can be
//! pointed at a different provider, service, endpoint, or database
//! without code changes. Defaults reproduce the published AWS EC2
//! pricing endpoints.

use std::path::PathBuf;

/// Base URL the region index's relative document paths are joined onto
pub const DEFAULT_BASE_URL: &str = "https://pricing.us-east-1.amazonaws.com";

/// Region index document URL
pub const DEFAULT_INDEX_URL: &str =
    "https://pricing.us-east-1.amazonaws.com/offers/v1.0/aws/AmazonEC2/current/region_index.json";

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://awsprice.db?mode=rwc";

/// Default staging directory for downloaded documents
pub const DEFAULT_STAGING_DIR: &str = "./price-list";

/// What to do when a fetched region document fails to decode.
///
/// Fetch failures always skip the region; decode failures are a separate
/// policy choice because a malformed document may indicate upstream
/// format drift that should stop the run rather than silently thin out
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeFailurePolicy {
    /// Abort the whole run on the first malformed region document
    #[default]
    Fatal,
    /// Log the region and continue with the rest of the index
    SkipRegion,
}

/// Resolved configuration for one sync run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub base_url: String,
    pub index_url: String,
    pub database_url: String,
    pub staging_dir: PathBuf,
    pub provider_name: String,
    pub service_name: String,
    /// Term class to ingest; other classes in the document are ignored
    pub term_class: String,
    pub on_decode_failure: DecodeFailurePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            provider_name: "AWS".to_string(),
            service_name: "AmazonEC2".to_string(),
            term_class: "OnDemand".to_string(),
            on_decode_failure: DecodeFailurePolicy::default(),
        }
    }
}

impl SyncConfig {
    /// Full URL for a region's pricing document given its relative path
    pub fn document_url(&self, relative: &str) -> String {
        format!("{}{}", self.base_url, relative)
    }

    /// Staging file path for a region's downloaded document
    pub fn staging_path(&self, region_code: &str) -> PathBuf {
        self.staging_dir.join(format!("{region_code}.json"))
    }
}
