use crate::cli::Args;
use anyhow::Context;
use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod cli;
pub mod errors;
pub mod model;
pub mod schema;
pub mod store;

/// Initializes logging and the database pool from parsed arguments.
///
/// This is the composition root for the embedding application (web layer,
/// background grading workers); everything else in the crate takes the
/// returned pool explicitly.
pub fn init_store(args: &Args) -> anyhow::Result<Pool> {
    init_tracing(&args.log_level).context("Failed to initialize tracing")?;

    info!("Initializing database pool...");
    let pool = init_pool(&args.connection_str, args.db_pool_max_size)
        .context("Failed to initialize database pool")?;

    Ok(pool)
}

pub fn init_pool(conn_str: &str, max_size: u32) -> anyhow::Result<Pool> {
    let manager = Manager::new(conn_str, Runtime::Tokio1);
    let pool = Pool::builder(manager).max_size(max_size as usize).build()?;
    Ok(pool)
}

pub fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::try_new(log_level)?).init();
    Ok(())
}
