use std::time::Duration;

use chrono::{DateTime, Utc};
use cronveyor_models::core::{TaskDefinition, TaskRun};
use cronveyor_models::errors::SendableError;
use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions, Executor, SqlitePool};

use crate::interfaces::TaskSource;
use crate::mappers;

pub struct SqliteDb {
    pub pool: SqlitePool,
}

impl SqliteDb {
    pub async fn new(filename: &str) -> Result<Self, SendableError> {
        let mut options = SqliteConnectOptions::new()
            .filename(filename)
            .create_if_missing(true);
        options
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(1));
        let pool = SqlitePool::connect_with(options).await?;
        Ok(SqliteDb { pool })
    }
}

impl TaskSource for SqliteDb {
    async fn create_task_definitions_table(&self) -> Result<(), SendableError> {
        self.pool
            .execute(
                "CREATE TABLE IF NOT EXISTS task_definitions (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            cron_expression TEXT NOT NULL,
            app_name TEXT NOT NULL,
            action_name TEXT NOT NULL,
            enabled BOOLEAN NOT NULL,
            created_at INTEGER,
            updated_at INTEGER
        )",
            )
            .await?;
        Ok(())
    }

    async fn create_task_runs_table(&self) -> Result<(), SendableError> {
        self.pool
            .execute(
                "CREATE TABLE IF NOT EXISTS task_runs (
                id INTEGER PRIMARY KEY,
                task_name TEXT NOT NULL,
                start_time INTEGER NOT NULL,
                duration_ms INTEGER NOT NULL,
                success BOOLEAN NOT NULL,
                message TEXT
            )",
            )
            .await?;
        Ok(())
    }

    async fn upsert_task(&self, task: &TaskDefinition) -> Result<(), SendableError> {
        self.pool.execute(sqlx::query(
            "INSERT INTO task_definitions (id, name, cron_expression, app_name, action_name, enabled, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                cron_expression = excluded.cron_expression,
                app_name = excluded.app_name,
                action_name = excluded.action_name,
                enabled = excluded.enabled,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at",
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.cron_expression)
        .bind(&task.app_name)
        .bind(&task.action_name)
        .bind(task.enabled)
        .bind(task.created_at.map(|dt| dt.timestamp()))
        .bind(task.updated_at.map(|dt| dt.timestamp())))
        .await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: i64) -> Result<(), SendableError> {
        self.pool
            .execute(sqlx::query("DELETE FROM task_definitions WHERE id = ?").bind(task_id))
            .await?;
        Ok(())
    }

    async fn fetch_tasks_by_app(&self, app_name: &str) -> Result<Vec<TaskDefinition>, SendableError> {
        let rows = sqlx::query(
            "SELECT id, name, cron_expression, app_name, action_name, enabled, created_at, updated_at
             FROM task_definitions WHERE app_name = ?",
        )
        .bind(app_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(mappers::sqlite_row_to_task_definition)
            .collect())
    }

    async fn fetch_task_runs(&self, start: i64, end: i64) -> Result<Vec<TaskRun>, SendableError> {
        let rows = sqlx::query(
            "SELECT id, task_name, start_time, duration_ms, success, message
             FROM task_runs WHERE start_time >= ? AND start_time <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(mappers::sqlite_row_to_task_run).collect())
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
                     VALUES (?, ?, ?, ?, ?)",
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
