//! Per-region processing
//!
//! Drives flatten -> normalize -> upsert for one decoded pricing
//! document. Individual record failures are logged and skipped; SKUs are
//! always persisted before terms so term groups can resolve their owning
//! SKU within the same pass.

use crate::services::flattener::{flatten_products, terms_for_class};
use crate::services::normalizer::{normalize_sku, normalize_term};
use crate::store::PriceStore;
use crate::types::{PricingDocument, Result};
use tracing::{debug, info, warn};

/// Per-record counters for one region pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegionOutcome {
    pub skus_upserted: usize,
    pub skus_failed: usize,
    pub terms_upserted: usize,
    pub terms_failed: usize,
    /// Term groups dropped because their SKU code resolved to no row
    pub term_groups_skipped: usize,
}

/// Processes one region's decoded document against the store
pub struct RegionProcessor<'a> {
    store: &'a dyn PriceStore,
    term_class: &'a str,
}

impl<'a> RegionProcessor<'a> {
    pub fn new(store: &'a dyn PriceStore, term_class: &'a str) -> Self {
        Self { store, term_class }
    }

    /// Upsert all products and the selected term class for `region_code`.
    ///
    /// Never fails on a per-record store error; the returned counters
    /// record what was skipped. `region_id` is the storage identifier of
    /// the already-created region row.
    pub async fn process(
        &self,
        region_code: &str,
        region_id: i64,
        doc: &PricingDocument,
    ) -> Result<RegionOutcome> {
        let mut outcome = RegionOutcome::default();

        for product in flatten_products(doc) {
            let sku = normalize_sku(product, region_id);
            match self.store.upsert_sku(&sku).await {
                Ok(_) => {
                    debug!(region = region_code, sku = %sku.code, "sku upserted");
                    outcome.skus_upserted += 1;
                }
                Err(e) => {
                    warn!(region = region_code, sku = %sku.code, error = %e, "sku upsert failed; skipping");
                    outcome.skus_failed += 1;
                }
            }
        }

        let Some(groups) = terms_for_class(doc, self.term_class) else {
            info!(region = region_code, term_class = self.term_class, "no terms for class");
            return Ok(outcome);
        };

        for (sku_code, offers) in groups {
            let sku_id = match self.store.lookup_sku_id(sku_code).await {
                Ok(Some(id)) => id,
                Ok(None) => {
                    warn!(region = region_code, sku = %sku_code, "no persisted sku for term group; skipping");
                    outcome.term_groups_skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(region = region_code, sku = %sku_code, error = %e, "sku lookup failed; skipping term group");
                    outcome.term_groups_skipped += 1;
                    continue;
                }
            };

            for detail in offers.values() {
                let term = normalize_term(detail, sku_id);
                match self.store.upsert_term(&term).await {
                    Ok(_) => outcome.terms_upserted += 1,
                    Err(e) => {
                        warn!(
                            region = region_code,
                            sku = %sku_code,
                            offer_term = %term.offer_term_code,
                            error = %e,
                            "term upsert failed; skipping"
                        );
                        outcome.terms_failed += 1;
                    }
                }
            }
        }

        Ok(outcome)
    }
}
