use crate::config::{
    DecodeFailurePolicy, SyncConfig, DEFAULT_BASE_URL, DEFAULT_DATABASE_URL, DEFAULT_INDEX_URL,
    DEFAULT_STAGING_DIR,
};
use crate::fetch::HttpFetcher;
use crate::services::Orchestrator;
use crate::store::SqliteStore;
use clap::Parser;
use std::path::PathBuf;

/// AWS pricing document ingestion job
#[derive(Parser)]
#[command(name = "awsprice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Base URL joined with the index's relative document paths
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Region index document URL
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    /// Directory for staging downloaded documents
    #[arg(long, default_value = DEFAULT_STAGING_DIR)]
    staging_dir: PathBuf,

    /// Provider record name
    #[arg(long, default_value = "AWS")]
    provider: String,

    /// Service record name
    #[arg(long, default_value = "AmazonEC2")]
    service: String,

    /// Term class to ingest; other classes are ignored
    #[arg(long, default_value = "OnDemand")]
    term_class: String,

    /// Skip regions whose pricing document fails to decode instead of
    /// aborting the run
    #[arg(long)]
    skip_bad_documents: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.into_config();

        let store = SqliteStore::connect(&config.database_url).await?;
        store.init_schema().await?;

        let fetcher = HttpFetcher::new()?;
        Orchestrator::new(&fetcher, &store, &config).run().await?;
        Ok(())
    }

    fn into_config(self) -> SyncConfig {
        SyncConfig {
            base_url: self.base_url,
            index_url: self.index_url,
            database_url: self.database_url,
            staging_dir: self.staging_dir,
            provider_name: self.provider,
            service_name: self.service,
            term_class: self.term_class,
            on_decode_failure: if self.skip_bad_documents {
                DecodeFailurePolicy::SkipRegion
            } else {
                DecodeFailurePolicy::Fatal
            },
        }
    }
}
