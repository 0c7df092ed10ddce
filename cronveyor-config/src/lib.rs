use clap::Parser;

use cronveyor_models::errors::SendableError;

#[derive(Parser, Debug, Clone)]
pub struct Config {
    #[arg(long, default_value = "cronveyor")]
    pub app_name: String,

    #[arg(long, default_value = "tasks.db")]
    pub database: String,

    #[arg(long, default_value_t = 4)]
    pub max_concurrent_runs: usize,

    #[arg(long, default_value_t = 30)]
    pub shutdown_grace_seconds: u64,
}

pub fn parse_config() -> Result<Config, SendableError> {
    let config = Config::try_parse()?;
    if config.max_concurrent_runs == 0 {
        return Err("--max-concurrent-runs must be at least 1".into());
    }
    Ok(config)
}
