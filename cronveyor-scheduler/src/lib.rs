mod cron;
mod invoker;
mod registry;

pub use cron::CronSchedule;
pub use invoker::TaskInvoker;
pub use registry::TaskRegistry;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use log::{debug, error, info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cronveyor_actions::ActionRegistry;
use cronveyor_config::Config;
use cronveyor_database::interfaces::TaskSource;
use cronveyor_models::core::TaskDefinition;
use cronveyor_models::errors::SendableError;

pub async fn run_dispatcher<S: TaskSource>(
    source: &Arc<S>,
    actions: Arc<ActionRegistry>,
    config: &Config,
    shutdown: CancellationToken,
) -> Result<(), SendableError> {
    let registry = TaskRegistry::load(source, &config.app_name).await?;
    let handles = start_task_timers(source, actions, config, &registry, &shutdown);

    shutdown.cancelled().await;
    info!("Dispatcher received shutdown signal");
    wait_for_timers(handles, Duration::from_secs(config.shutdown_grace_seconds)).await;
    info!("Dispatcher stopped");
    Ok(())
}

// Registration runs sequentially on the caller's task, so the
// scheduled-vs-found bookkeeping needs no synchronization.
fn start_task_timers<S: TaskSource>(
    source: &Arc<S>,
    actions: Arc<ActionRegistry>,
    config: &Config,
    registry: &TaskRegistry,
    shutdown: &CancellationToken,
) -> Vec<JoinHandle<()>> {
    let invoker = Arc::new(TaskInvoker::new(actions));
    let limiter = Arc::new(Semaphore::new(config.max_concurrent_runs));

    let mut handles = Vec::new();
    for task in registry.definitions() {
        if !task.enabled {
            debug!("Task {} `{}` is disabled, no timer registered", task.id, task.name);
            continue;
        }
        let schedule = match CronSchedule::parse(&task.cron_expression) {
            Ok(schedule) => schedule,
            Err(err) => {
                error!("Skipping task {} `{}`: {}", task.id, task.name, err);
                continue;
            }
        };
        handles.push(tokio::spawn(run_task_timer(
            task.clone(),
            schedule,
            Arc::clone(&invoker),
            Arc::clone(source),
            Arc::clone(&limiter),
            shutdown.clone(),
        )));
    }

    info!(
        "Registered {} timer(s) out of {} definition(s) found",
        handles.len(),
        registry.len()
    );
    handles
}

async fn run_task_timer<S: TaskSource>(
    task: TaskDefinition,
    schedule: CronSchedule,
    invoker: Arc<TaskInvoker>,
    source: Arc<S>,
    limiter: Arc<Semaphore>,
    shutdown: CancellationToken,
) {
    let mut next_fire = match schedule.next_fire_time(Utc::now()) {
        Ok(instant) => instant,
        Err(err) => {
            error!("Timer for task `{}` could not start: {}", task.name, err);
            return;
        }
    };
    debug!("Task `{}` first fires at {}", task.name, next_fire);

    loop {
        let wait = (next_fire - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }

        let permit = tokio::select! {
            _ = shutdown.cancelled() => break,
            permit = limiter.acquire() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };
        fire(&task, &invoker, &source).await;
        drop(permit);

        if shutdown.is_cancelled() {
            break;
        }

        // The next instant comes from the previous scheduled instant, not
        // from the completion time, so slow invocations do not drift the
        // schedule. Instants that passed while the invocation ran are
        // skipped: single-fire, no catch-up burst.
        next_fire = match schedule.next_fire_time(next_fire) {
            Ok(instant) => instant,
            Err(err) => {
                error!("Timer for task `{}` lost its schedule: {}", task.name, err);
                break;
            }
        };
        let now = Utc::now();
        if next_fire <= now {
            next_fire = match schedule.next_fire_time(now) {
                Ok(instant) => instant,
                Err(err) => {
                    error!("Timer for task `{}` lost its schedule: {}", task.name, err);
                    break;
                }
            };
        }
    }

    debug!("Timer for task `{}` stopped", task.name);
}

async fn fire<S: TaskSource>(task: &TaskDefinition, invoker: &TaskInvoker, source: &Arc<S>) {
    let started_at = Utc::now();
    let clock = std::time::Instant::now();
    let result = invoker.invoke(task).await;
    let duration_ms = clock.elapsed().as_millis() as i64;

    let message = match &result {
        Ok(()) => {
            info!("Task `{}` completed in {}ms", task.name, duration_ms);
            None
        }
        Err(err) => {
            error!("Task `{}` firing failed: {}", task.name, err);
            Some(err.to_string())
        }
    };

    if let Err(err) = source
        .log_task_run(
            &task.name,
            started_at,
            duration_ms,
            result.is_ok(),
            message.as_deref(),
        )
        .await
    {
        warn!("Could not record run of task `{}`: {}", task.name, err);
    }
}

async fn wait_for_timers(mut handles: Vec<JoinHandle<()>>, grace: Duration) {
    if handles.is_empty() {
        return;
    }
    if tokio::time::timeout(grace, join_all(handles.iter_mut()))
        .await
        .is_err()
    {
        let stuck = handles.iter().filter(|handle| !handle.is_finished()).count();
        warn!(
            "Shutdown grace period of {}s expired, abandoning {} in-flight timer(s)",
            grace.as_secs(),
            stuck
        );
        for handle in &handles {
            handle.abort();
        }
    }
}
