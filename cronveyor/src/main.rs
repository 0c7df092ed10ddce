mod actions;

use std::sync::Arc;

use log::{error, info};
use tokio_util::sync::CancellationToken;

use cronveyor_actions::registry::print_actions;
use cronveyor_config::parse_config;
use cronveyor_database::{initialize_database, sqlite::SqliteDb};
use cronveyor_models::errors::SendableError;
use cronveyor_scheduler::run_dispatcher;
use cronveyor_utilities::startup;

#[tokio::main]
async fn main() -> Result<(), SendableError> {
    startup::startup("Cronveyor")?;

    info!("Parse config");
    let config = parse_config()?;

    info!("Initialize database pool");
    let pool = Arc::new(SqliteDb::new(&config.database).await?);
    initialize_database(&pool).await?;

    info!("Register actions");
    let registry = Arc::new(actions::builtin_actions());
    print_actions(&registry);

    let shutdown = CancellationToken::new();

    info!("Initialize dispatcher");
    let mut dispatcher_task = {
        let pool = pool.clone();
        let config = config.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move { run_dispatcher(&pool, registry, &config, shutdown).await })
    };

    info!("Initialization complete!");

    tokio::select! {
        result = &mut dispatcher_task => {
            result??;
            error!("Dispatcher exited before shutdown was requested");
            return Err("dispatcher exited before shutdown was requested".into());
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal. Shutting down...");
            shutdown.cancel();
        }
    }

    dispatcher_task.await??;

    info!("Application shutdown complete.");
    Ok(())
}
