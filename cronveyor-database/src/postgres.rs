use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cronveyor_models::core::{TaskDefinition, TaskRun};
use cronveyor_models::errors::SendableError;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, Executor, PgPool,
};

use crate::interfaces::TaskSource;
use crate::mappers;

pub struct PostgresDb {
    pub pool: PgPool,
}

impl PostgresDb {
    pub async fn new(connection_str: &str) -> Result<Self, SendableError> {
        let mut options = PgConnectOptions::from_str(connection_str)?;
        options.log_statements(log::LevelFilter::Debug);
        options.log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(1));

        let pool = PgPoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }
}

impl TaskSource for PostgresDb {
    async fn create_task_definitions_table(&self) -> Result<(), SendableError> {
        self.pool
            .execute(
                "CREATE TABLE IF NOT EXISTS task_definitions (
                    id BIGINT PRIMARY KEY,
                    name TEXT NOT NULL,
                    cron_expression TEXT NOT NULL,
                    app_name TEXT NOT NULL,
                    action_name TEXT NOT NULL,
                    enabled BOOLEAN NOT NULL,
                    created_at BIGINT NULL,
                    updated_at BIGINT NULL
                )",
            )
            .await?;
        Ok(())
    }

    async fn create_task_runs_table(&self) -> Result<(), SendableError> {
        self.pool
            .execute(
                "CREATE TABLE IF NOT EXISTS task_runs (
                    id BIGSERIAL PRIMARY KEY,
                    task_name TEXT NOT NULL,
                    start_time BIGINT NOT NULL,
                    duration_ms BIGINT NOT NULL,
                    success BOOLEAN NOT NULL,
                    message TEXT NULL
                )",
            )
            .await?;
        Ok(())
    }

    async fn upsert_task(&self, task: &TaskDefinition) -> Result<(), SendableError> {
        self.pool
            .execute(
                sqlx::query(
                    "INSERT INTO task_definitions (
                        id, name, cron_expression, app_name, action_name, enabled, created_at, updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    ON CONFLICT (id) DO UPDATE SET
                        name = EXCLUDED.name,
                        cron_expression = EXCLUDED.cron_expression,
                        app_name = EXCLUDED.app_name,
                        action_name = EXCLUDED.action_name,
                        enabled = EXCLUDED.enabled,
                        created_at = EXCLUDED.created_at,
                        updated_at = EXCLUDED.updated_at",
                )
                .bind(task.id)
                .bind(&task.name)
                .bind(&task.cron_expression)
                .bind(&task.app_name)
                .bind(&task.action_name)
                .bind(task.enabled)
                .bind(task.created_at.map(|dt| dt.timestamp()))
                .bind(task.updated_at.map(|dt| dt.timestamp())),
            )
            .await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: i64) -> Result<(), SendableError> {
        self.pool
            .execute(sqlx::query("DELETE FROM task_definitions WHERE id = $1").bind(task_id))
            .await?;
        Ok(())
    }

    async fn fetch_tasks_by_app(&self, app_name: &str) -> Result<Vec<TaskDefinition>, SendableError> {
        let rows = sqlx::query(
            "SELECT id, name, cron_expression, app_name, action_name, enabled, created_at, updated_at
             FROM task_definitions WHERE app_name = $1",
        )
        .bind(app_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(mappers::pg_row_to_task_definition).collect())
    }

    async fn fetch_task_runs(&self, start: i64, end: i64) -> Result<Vec<TaskRun>, SendableError> {
        let rows = sqlx::query(
            "SELECT id, task_name, start_time, duration_ms, success, message
             FROM task_runs WHERE start_time >= $1 AND start_time <= $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(mappers::pg_row_to_task_run).collect())
    }

    async fn log_task_run(
        &self,
        task_name: &str,
        start_time: DateTime<Utc>,
        duration_ms: i64,
        success: bool,
        message: Option<&str>,
    ) -> Result<(), SendableError> {
        self.pool
            .execute(
                sqlx::query(
                    "INSERT INTO task_runs (task_name, start_time, duration_ms, success, message)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(task_name)
                .bind(start_time.timestamp())
                .bind(duration_ms)
                .bind(success)
                .bind(message),
            )
            .await?;
        Ok(())
    }
}
