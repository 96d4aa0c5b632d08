//! Relational store for the pricing schema
//!
//! Five tables: providers -> services -> regions -> skus -> terms.
//! Provider, Service, Region, and SKU rows are get-or-created by natural
//! key so repeated runs never duplicate them; terms are upserted on
//! (sku_id, offer_term_code) with `modified_at` refreshed on re-ingest.

use crate::types::{Result, SkuRecord, TermRecord};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

/// Typed upsert/lookup operations the pipeline needs. The trait seam
/// lets tests substitute failing or in-memory doubles for the database.
#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn get_or_create_provider(&self, name: &str) -> Result<i64>;
    async fn get_or_create_service(&self, name: &str, provider_id: i64) -> Result<i64>;
    async fn get_or_create_region(&self, code: &str, service_id: i64) -> Result<i64>;
    /// Idempotent on `sku.code`; an existing row is updated in place
    async fn upsert_sku(&self, sku: &SkuRecord) -> Result<i64>;
    async fn lookup_sku_id(&self, code: &str) -> Result<Option<i64>>;
    /// Idempotent on `(term.sku_id, term.offer_term_code)`
    async fn upsert_term(&self, term: &TermRecord) -> Result<i64>;
}

/// Store backed by a SQLite database via sqlx
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to the database at `url` (e.g. `sqlite://awsprice.db?mode=rwc`).
    ///
    /// A single connection is enough: all store operations in a run are
    /// strictly sequential.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Ensure the five relational tables exist before any upsert runs
    pub async fn init_schema(&self) -> Result<()> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS providers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                provider_name TEXT NOT NULL UNIQUE
            )",
            "CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                service_name TEXT NOT NULL UNIQUE,
                provider_id INTEGER NOT NULL REFERENCES providers(id)
            )",
            "CREATE TABLE IF NOT EXISTS regions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                region_code TEXT NOT NULL UNIQUE,
                service_id INTEGER NOT NULL REFERENCES services(id)
            )",
            "CREATE TABLE IF NOT EXISTS skus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sku_code TEXT NOT NULL UNIQUE,
                product_family TEXT NOT NULL DEFAULT '',
                vcpu INTEGER NOT NULL DEFAULT 0,
                operating_system TEXT NOT NULL DEFAULT '',
                instance_type TEXT NOT NULL DEFAULT '',
                storage TEXT NOT NULL DEFAULT '',
                network TEXT NOT NULL DEFAULT '',
                instance_sku TEXT NOT NULL DEFAULT '',
                processor TEXT NOT NULL DEFAULT '',
                usage_type TEXT NOT NULL DEFAULT '',
                region_id INTEGER NOT NULL REFERENCES regions(id)
            )",
            "CREATE TABLE IF NOT EXISTS terms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sku_id INTEGER NOT NULL REFERENCES skus(id),
                offer_term_code TEXT NOT NULL,
                lease_contract_length TEXT NOT NULL DEFAULT '',
                purchase_option TEXT NOT NULL DEFAULT '',
                offering_class TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                modified_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                disabled INTEGER NOT NULL DEFAULT 0,
                UNIQUE (sku_id, offer_term_code)
            )",
        ];
        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Underlying pool, for test assertions
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn get_or_create(
        &self,
        select_sql: &str,
        insert_sql: &str,
        key: &str,
        parent_id: Option<i64>,
    ) -> Result<i64> {
        if let Some(row) = sqlx::query(select_sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(row.get("id"));
        }
        let mut insert = sqlx::query(insert_sql).bind(key);
        if let Some(parent) = parent_id {
            insert = insert.bind(parent);
        }
        let inserted = insert.fetch_one(&self.pool).await?;
        Ok(inserted.get("id"))
    }
}

#[async_trait]
impl PriceStore for SqliteStore {
    async fn get_or_create_provider(&self, name: &str) -> Result<i64> {
        self.get_or_create(
            "SELECT id FROM providers WHERE provider_name = ?1",
            "INSERT INTO providers (provider_name) VALUES (?1) RETURNING id",
            name,
            None,
        )
        .await
    }

    async fn get_or_create_service(&self, name: &str, provider_id: i64) -> Result<i64> {
        self.get_or_create(
            "SELECT id FROM services WHERE service_name = ?1",
            "INSERT INTO services (service_name, provider_id) VALUES (?1, ?2) RETURNING id",
            name,
            Some(provider_id),
        )
        .await
    }

    async fn get_or_create_region(&self, code: &str, service_id: i64) -> Result<i64> {
        self.get_or_create(
            "SELECT id FROM regions WHERE region_code = ?1",
            "INSERT INTO regions (region_code, service_id) VALUES (?1, ?2) RETURNING id",
            code,
            Some(service_id),
        )
        .await
    }

    async fn upsert_sku(&self, sku: &SkuRecord) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO skus (sku_code, product_family, vcpu, operating_system,
                               instance_type, storage, network, instance_sku,
                               processor, usage_type, region_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT (sku_code) DO UPDATE SET
                 product_family = excluded.product_family,
                 vcpu = excluded.vcpu,
                 operating_system = excluded.operating_system,
                 instance_type = excluded.instance_type,
                 storage = excluded.storage,
                 network = excluded.network,
                 instance_sku = excluded.instance_sku,
                 processor = excluded.processor,
                 usage_type = excluded.usage_type,
                 region_id = excluded.region_id
             RETURNING id",
        )
        .bind(&sku.code)
        .bind(&sku.product_family)
        .bind(sku.vcpu)
        .bind(&sku.operating_system)
        .bind(&sku.instance_type)
        .bind(&sku.storage)
        .bind(&sku.network)
        .bind(&sku.instance_sku)
        .bind(&sku.processor)
        .bind(&sku.usage_type)
        .bind(sku.region_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("id"))
    }

    async fn lookup_sku_id(&self, code: &str) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT id FROM skus WHERE sku_code = ?1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("id")))
    }

    async fn upsert_term(&self, term: &TermRecord) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO terms (sku_id, offer_term_code, lease_contract_length,
                                purchase_option, offering_class)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (sku_id, offer_term_code) DO UPDATE SET
                 lease_contract_length = excluded.lease_contract_length,
                 purchase_option = excluded.purchase_option,
                 offering_class = excluded.offering_class,
                 modified_at = CURRENT_TIMESTAMP
             RETURNING id",
        )
        .bind(term.sku_id)
        .bind(&term.offer_term_code)
        .bind(&term.lease_contract_length)
        .bind(&term.purchase_option)
        .bind(&term.offering_class)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("id"))
    }
}
