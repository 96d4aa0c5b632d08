//! awsprice: batch ETL for AWS EC2 pricing documents
//!
//! Discovers per-region pricing documents from the published region
//! index, flattens the nested product/term maps, and upserts normalized
//! rows into a relational schema. One run per invocation; idempotent on
//! natural keys.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod services;
pub mod store;
pub mod types;
