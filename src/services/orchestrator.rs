//! Run orchestration
//!
//! Reads the region index, resolves the provider/service singletons, and
//! drives per-region fetch -> stage -> decode -> process -> cleanup.
//! Regions run sequentially; a failed region fetch skips that region,
//! everything else follows the error taxonomy in the module docs of
//! `types::error`.

use crate::config::{DecodeFailurePolicy, SyncConfig};
use crate::fetch::Fetcher;
use crate::services::region::{RegionOutcome, RegionProcessor};
use crate::store::PriceStore;
use crate::types::{PricingDocument, RegionIndex, Result, SyncError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Drives one full sync run over all regions in the index
pub struct Orchestrator<'a> {
    fetcher: &'a dyn Fetcher,
    store: &'a dyn PriceStore,
    config: &'a SyncConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, store: &'a dyn PriceStore, config: &'a SyncConfig) -> Self {
        Self {
            fetcher,
            store,
            config,
        }
    }

    /// Run the full pipeline. Fatal errors (index fetch/decode, staging
    /// directory creation, storage failures outside per-record upserts)
    /// abort the run; per-region and per-record failures are logged and
    /// skipped.
    pub async fn run(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.staging_dir).await?;

        let bytes = self.fetcher.fetch(&self.config.index_url).await?;
        let index: RegionIndex = serde_json::from_slice(&bytes)?;
        info!(regions = index.regions.len(), "region index loaded");

        let provider_id = self
            .store
            .get_or_create_provider(&self.config.provider_name)
            .await?;
        let service_id = self
            .store
            .get_or_create_service(&self.config.service_name, provider_id)
            .await?;

        for entry in index.regions.values() {
            let region_code = entry.region_code.as_str();
            let region_id = self
                .store
                .get_or_create_region(region_code, service_id)
                .await?;

            let url = self.config.document_url(&entry.current_version_url);
            let bytes = match self.fetcher.fetch(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(region = region_code, url = %url, error = %e, "document fetch failed; skipping region");
                    continue;
                }
            };

            let staging_path = self.config.staging_path(region_code);
            tokio::fs::write(&staging_path, &bytes).await?;

            let result = self.process_staged(region_code, region_id, &staging_path).await;

            // The staging file is scoped to this region's pass; removal
            // failure is logged, not treated as an error.
            if let Err(e) = tokio::fs::remove_file(&staging_path).await {
                warn!(region = region_code, path = %staging_path.display(), error = %e, "failed to remove staging file");
            } else {
                debug!(region = region_code, "staging file removed");
            }

            match result {
                Ok(outcome) => self.log_outcome(region_code, outcome),
                Err(SyncError::Decode(e)) => match self.config.on_decode_failure {
                    DecodeFailurePolicy::SkipRegion => {
                        warn!(region = region_code, error = %e, "malformed pricing document; skipping region");
                        continue;
                    }
                    DecodeFailurePolicy::Fatal => return Err(SyncError::Decode(e)),
                },
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn process_staged(
        &self,
        region_code: &str,
        region_id: i64,
        path: &Path,
    ) -> Result<RegionOutcome> {
        let bytes = tokio::fs::read(path).await?;
        let doc: PricingDocument = serde_json::from_slice(&bytes)?;
        RegionProcessor::new(self.store, &self.config.term_class)
            .process(region_code, region_id, &doc)
            .await
    }

    fn log_outcome(&self, region_code: &str, outcome: RegionOutcome) {
        info!(
            region = region_code,
            skus = outcome.skus_upserted,
            skus_failed = outcome.skus_failed,
            terms = outcome.terms_upserted,
            terms_failed = outcome.terms_failed,
            term_groups_skipped = outcome.term_groups_skipped,
            "region processed"
        );
    }
}
