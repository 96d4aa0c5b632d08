//! Wire structures for the AWS pricing documents
//!
//! Mirrors the published JSON shapes verbatim: the region index maps
//! arbitrary region keys to per-region document locations, and each
//! region document carries a flat `products` map plus a three-level
//! `terms` map (term class -> SKU key -> offer-term key).

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level region index document
#[derive(Debug, Deserialize)]
pub struct RegionIndex {
    #[serde(default)]
    pub regions: HashMap<String, RegionEntry>,
}

/// One region index entry
#[derive(Debug, Deserialize)]
pub struct RegionEntry {
    #[serde(rename = "regionCode")]
    pub region_code: String,
    /// Path to the region's current pricing document, relative to the base URL
    #[serde(rename = "currentVersionUrl")]
    pub current_version_url: String,
}

/// Per-region pricing document
#[derive(Debug, Deserialize)]
pub struct PricingDocument {
    #[serde(default)]
    pub products: HashMap<String, Product>,
    /// term class -> SKU key -> offer-term key -> detail
    #[serde(default)]
    pub terms: HashMap<String, HashMap<String, HashMap<String, TermDetail>>>,
}

/// One product entry. Attributes are free-form string pairs with
/// inconsistent casing and presence; normalization handles defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub sku: String,
    #[serde(rename = "productFamily", default)]
    pub product_family: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// One offer-term entry. `priceDimensions` is present in the source
/// documents but not consumed by this pipeline, so it is not declared.
#[derive(Debug, Clone, Deserialize)]
pub struct TermDetail {
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "offerTermCode", default)]
    pub offer_term_code: String,
    #[serde(rename = "termAttributes", default)]
    pub term_attributes: TermAttributes,
}

/// Commitment attributes of an offer term
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermAttributes {
    #[serde(rename = "LeaseContractLength", default)]
    pub lease_contract_length: String,
    #[serde(rename = "PurchaseOption", default)]
    pub purchase_option: String,
    #[serde(rename = "OfferingClass", default)]
    pub offering_class: String,
}
