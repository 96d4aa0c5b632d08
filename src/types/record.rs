//! Normalized records handed to the store
//!
//! Flat rows with explicit foreign keys, produced by the normalizer from
//! the nested document structures.

/// One normalized SKU row. `code` is the natural key; re-ingesting the
/// same code updates the existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuRecord {
    pub code: String,
    pub product_family: String,
    pub vcpu: i64,
    pub operating_system: String,
    pub instance_type: String,
    pub storage: String,
    pub network: String,
    pub instance_sku: String,
    pub processor: String,
    pub usage_type: String,
    pub region_id: i64,
}

/// One normalized offer-term row, keyed by (sku_id, offer_term_code).
/// Creation/modification timestamps and the disabled flag take
/// storage-side defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TermRecord {
    pub sku_id: i64,
    pub offer_term_code: String,
    pub lease_contract_length: String,
    pub purchase_option: String,
    pub offering_class: String,
}
