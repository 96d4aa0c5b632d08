//! Record normalization
//!
//! Maps the free-form attribute dictionaries of the source documents
//! into fixed-shape records. Missing or unparseable values default
//! rather than fail: vCPU falls back to 0, strings to "". This lenient
//! policy is deliberate and matches the source data, where attribute
//! presence varies by product family.

use crate::types::{Product, SkuRecord, TermDetail, TermRecord};
use std::collections::HashMap;

/// Attribute keys extracted from product records. Casing follows the
/// source documents, which mix camelCase and lowercase.
const ATTR_VCPU: &str = "vcpu";
const ATTR_OPERATING_SYSTEM: &str = "operatingSystem";
const ATTR_INSTANCE_TYPE: &str = "instanceType";
const ATTR_STORAGE: &str = "storage";
const ATTR_NETWORK: &str = "networkPerformance";
const ATTR_INSTANCE_SKU: &str = "instancesku";
const ATTR_PROCESSOR: &str = "physicalProcessor";
const ATTR_USAGE_TYPE: &str = "usagetype";

/// Normalize one product record into a SKU row owned by `region_id`
pub fn normalize_sku(product: &Product, region_id: i64) -> SkuRecord {
    let attrs = &product.attributes;
    SkuRecord {
        code: product.sku.clone(),
        product_family: product.product_family.clone(),
        vcpu: parse_vcpu(attrs),
        operating_system: attr(attrs, ATTR_OPERATING_SYSTEM),
        instance_type: attr(attrs, ATTR_INSTANCE_TYPE),
        storage: attr(attrs, ATTR_STORAGE),
        network: attr(attrs, ATTR_NETWORK),
        instance_sku: attr(attrs, ATTR_INSTANCE_SKU),
        processor: attr(attrs, ATTR_PROCESSOR),
        usage_type: attr(attrs, ATTR_USAGE_TYPE),
        region_id,
    }
}

/// Normalize one offer-term detail into a term row owned by `sku_id`
pub fn normalize_term(detail: &TermDetail, sku_id: i64) -> TermRecord {
    TermRecord {
        sku_id,
        offer_term_code: detail.offer_term_code.clone(),
        lease_contract_length: detail.term_attributes.lease_contract_length.clone(),
        purchase_option: detail.term_attributes.purchase_option.clone(),
        offering_class: detail.term_attributes.offering_class.clone(),
    }
}

fn attr(attrs: &HashMap<String, String>, key: &str) -> String {
    attrs.get(key).cloned().unwrap_or_default()
}

fn parse_vcpu(attrs: &HashMap<String, String>) -> i64 {
    attrs
        .get(ATTR_VCPU)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
