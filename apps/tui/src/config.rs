use crate::domain::PhaseMode;
use crate::engine::{ClockCommand, Engine};
use crate::engine::time_source::{parse_time_string, TimeEntryError, TimeValue};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_TICK_MS: u64 = 33;
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEOCLOCK_TICK_MS must be a whole number of milliseconds, got '{0}'")]
    TickRate(String),
    #[error("GEOCLOCK_SEED must be an unsigned integer, got '{0}'")]
    Seed(String),
    #[error("GEOCLOCK_PHASE must be one of auto, geo, tri, got '{0}'")]
    Phase(String),
    #[error("GEOCLOCK_TIME '{value}' is not a valid time: {source}")]
    StartTime {
        value: String,
        #[source]
        source: TimeEntryError,
    },
}

/// Runtime settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub tick_rate_ms: u64,
    pub seed: Option<u64>,
    pub start_phase: PhaseMode,
    pub start_time: Option<TimeValue>,
    pub log_file: Option<PathBuf>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_MS,
            seed: None,
            start_phase: PhaseMode::Auto,
            start_time: None,
            log_file: None,
        }
    }
}

impl ClockConfig {
    /// Loads `.env` (if any) and then reads the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup("GEOCLOCK_TICK_MS")) {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::TickRate(raw.clone()))?;
            config.tick_rate_ms = ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        }

        if let Some(raw) = non_empty(lookup("GEOCLOCK_SEED")) {
            config.seed = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Seed(raw.clone()))?,
            );
        }

        if let Some(raw) = non_empty(lookup("GEOCLOCK_PHASE")) {
            config.start_phase = PhaseMode::parse(&raw).ok_or(ConfigError::Phase(raw))?;
        }

        if let Some(raw) = non_empty(lookup("GEOCLOCK_TIME")) {
            config.start_time = Some(parse_time_string(&raw).map_err(|source| {
                ConfigError::StartTime {
                    value: raw.clone(),
                    source,
                }
            })?);
        }

        config.log_file = non_empty(lookup("GEOCLOCK_LOG_FILE")).map(PathBuf::from);

        Ok(config)
    }

    /// Configured seed, or one derived from the wall clock.
    pub fn seed_or_now(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
            nanos.unsigned_abs()
        })
    }

    /// Engine seeded and positioned according to this configuration.
    pub fn build_engine(&self) -> Engine {
        let mut engine = Engine::new(self.seed_or_now());
        if let Some(time) = self.start_time {
            engine.set_manual_time(time);
        }
        engine.apply(ClockCommand::PhaseSelect(self.start_phase), 0);
        engine
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether debug logging was requested through the environment.
pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
