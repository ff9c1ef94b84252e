use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_ledger::application::{PaymentEngine, QueryResolver};
use payment_ledger::config::Config;
use payment_ledger::domain::account::Account;
use payment_ledger::domain::ports::SharedLedgerStore;
use payment_ledger::infrastructure::in_memory::InMemoryLedger;
use payment_ledger::interfaces::http::{self, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("payment_ledger=info")),
        )
        .init();

    let store = build_store(&config).await?;
    let store_timeout = Duration::from_millis(config.store_timeout_ms);

    let state = AppState {
        engine: Arc::new(PaymentEngine::new(store.clone(), store_timeout)),
        resolver: Arc::new(QueryResolver::new(store, store_timeout)),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .into_diagnostic()?;
    http::serve(state, listener).await.into_diagnostic()?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<SharedLedgerStore> {
    if let Some(path) = &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            use payment_ledger::infrastructure::rocksdb::RocksDbLedger;

            let ledger = RocksDbLedger::open(path).into_diagnostic()?;
            for seed in &config.seed_account {
                ledger
                    .put_account(Account::new(seed.account_id.clone(), seed.balance))
                    .await
                    .into_diagnostic()?;
                tracing::info!(account_id = %seed.account_id, balance = %seed.balance, "seeded account");
            }
            return Ok(Arc::new(ledger));
        }

        #[cfg(not(feature = "storage-rocksdb"))]
        {
            let _ = path;
            return Err(miette::miette!(
                "--db-path requires building with the storage-rocksdb feature"
            ));
        }
    }

    let ledger = InMemoryLedger::new();
    for seed in &config.seed_account {
        ledger
            .put_account(Account::new(seed.account_id.clone(), seed.balance))
            .await
            .into_diagnostic()?;
        tracing::info!(account_id = %seed.account_id, balance = %seed.balance, "seeded account");
    }
    Ok(Arc::new(ledger))
}
