//! Document flattening
//!
//! Converts the nested "map of maps" pricing document into the shapes
//! the rest of the pipeline consumes: an order-irrelevant product
//! sequence and, for one term class, a SKU-keyed map of offer terms.
//! Pure transformation, no side effects.

use crate::types::{PricingDocument, Product, TermDetail};
use std::collections::HashMap;

/// Flatten the products map into a sequence of product records.
/// The opaque map keys duplicate each product's embedded SKU code and
/// are discarded.
pub fn flatten_products(doc: &PricingDocument) -> Vec<&Product> {
    doc.products.values().collect()
}

/// Offer terms for one term class, as SKU key -> (offer-term key -> detail).
/// Returns `None` when the document has no entry for the class; classes
/// other than the requested one are ignored.
pub fn terms_for_class<'a>(
    doc: &'a PricingDocument,
    term_class: &str,
) -> Option<&'a HashMap<String, HashMap<String, TermDetail>>> {
    doc.terms.get(term_class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> PricingDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flatten_products_yields_all_entries() {
        let doc = document(
            r#"{
                "products": {
                    "A": {"sku": "A", "productFamily": "Compute Instance"},
                    "B": {"sku": "B", "productFamily": "Storage"},
                    "C": {"sku": "C"}
                }
            }"#,
        );
        let products = flatten_products(&doc);
        assert_eq!(products.len(), 3);
        let mut codes: Vec<&str> = products.iter().map(|p| p.sku.as_str()).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_flatten_products_empty_document() {
        let doc = document("{}");
        assert!(flatten_products(&doc).is_empty());
    }

    #[test]
    fn test_terms_for_class_selects_only_requested_class() {
        let doc = document(
            r#"{
                "terms": {
                    "OnDemand": {
                        "A": {"A.X": {"sku": "A", "offerTermCode": "X"}}
                    },
                    "Reserved": {
                        "A": {"A.Y": {"sku": "A", "offerTermCode": "Y"}},
                        "B": {"B.Z": {"sku": "B", "offerTermCode": "Z"}}
                    }
                }
            }"#,
        );
        let on_demand = terms_for_class(&doc, "OnDemand").unwrap();
        assert_eq!(on_demand.len(), 1);
        assert_eq!(on_demand["A"]["A.X"].offer_term_code, "X");
    }

    #[test]
    fn test_terms_for_class_missing_class() {
        let doc = document(r#"{"terms": {"Reserved": {}}}"#);
        assert!(terms_for_class(&doc, "OnDemand").is_none());
    }

    #[test]
    fn test_terms_for_class_counts_offer_entries() {
        // Two SKUs, three offer terms total under OnDemand
        let doc = document(
            r#"{
                "terms": {
                    "OnDemand": {
                        "A": {
                            "A.X": {"sku": "A", "offerTermCode": "X"},
                            "A.Y": {"sku": "A", "offerTermCode": "Y"}
                        },
                        "B": {"B.X": {"sku": "B", "offerTermCode": "X"}}
                    }
                }
            }"#,
        );
        let groups = terms_for_class(&doc, "OnDemand").unwrap();
        let total: usize = groups.values().map(|offers| offers.len()).sum();
        assert_eq!(total, 3);
    }
}
