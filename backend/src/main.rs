//! Ticket ledger entry-point: loads settings, opens storage and serves the API.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use ticket_ledger::inbound::http::health::HealthState;
use ticket_ledger::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Open the pool and apply migrations when a database URL is configured.
async fn connect_storage(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url() else {
        info!("no database URL configured; using in-memory storage");
        return Ok(None);
    };
    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(io::Error::other)?;
    Ok(Some(pool))
}

/// Load settings from CLI arguments layered over `TICKETS_*` variables.
fn load_settings<I>(args: I) -> io::Result<AppSettings>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    AppSettings::load_from_iter(args)
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool) = connect_storage(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "ticket ledger listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
