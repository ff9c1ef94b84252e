use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Process configuration, from flags or environment.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Creates or resets an account at startup, as an `id=balance` pair
    /// (e.g. `acc_001=100.0`). Repeatable. Accounts are otherwise
    /// provisioned out of band.
    #[arg(long = "seed-account", value_parser = parse_seed_account)]
    pub seed_account: Vec<SeedAccount>,

    /// Upper bound for a single store operation, in milliseconds.
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = 5000)]
    pub store_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub account_id: String,
    pub balance: Decimal,
}

fn parse_seed_account(raw: &str) -> Result<SeedAccount, String> {
    let (account_id, balance) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=balance, got {raw:?}"))?;
    if account_id.is_empty() {
        return Err(format!("expected id=balance, got {raw:?}"));
    }
    let balance = Decimal::from_str(balance.trim())
        .map_err(|err| format!("invalid balance in {raw:?}: {err}"))?;
    Ok(SeedAccount {
        account_id: account_id.to_string(),
        balance,
    })
}
