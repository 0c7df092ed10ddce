use std::sync::Arc;

use interfaces::TaskSource;
use log::info;

use cronveyor_models::errors::SendableError;

pub mod interfaces;
mod mappers;
pub mod postgres;
pub mod sqlite;

pub async fn initialize_database(pool: &Arc<impl TaskSource>) -> Result<(), SendableError> {
    info!("Creating task tables if missing");
    pool.create_task_definitions_table().await?;
    pool.create_task_runs_table().await?;
    Ok(())
}
