//! Config module.

mod drivers;

use std::{env, str::FromStr, time::Duration};

pub use drivers::{DispatchDriver, DriverError};

/// Default inactivity timeout for VCS commands, in seconds.
pub const DEFAULT_VCS_TIMEOUT: u64 = 20 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Form field carrying the JSON push payload.
    pub payload_field: String,
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Controller channel driver.
    pub driver: DispatchDriver,
    /// Build controller address, as `host:port`.
    pub master_address: String,
    /// Change source username.
    pub username: String,
    /// Change source password.
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct VcsConfig {
    /// Path or name of the git executable.
    pub git_executable: String,
    /// Kill a command after this many seconds without output.
    pub timeout: u64,
    /// Kill a command after this many seconds, whatever its output.
    pub max_time: Option<u64>,
    /// Name of the source marker file, relative to the build base directory.
    pub sourcedata_filename: String,
}

impl VcsConfig {
    /// Inactivity timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Overall wall time bound as a duration.
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server options.
    pub server: ServerConfig,
    /// Dispatch options.
    pub dispatch: DispatchConfig,
    /// VCS options.
    pub vcs: VcsConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, DriverError> {
        Ok(Config {
            server: ServerConfig {
                bind_ip: env_to_str("BUILDHOOK_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("BUILDHOOK_SERVER_BIND_PORT", 8010),
                workers_count: env_to_optional_u16("BUILDHOOK_SERVER_WORKERS_COUNT", None),
                payload_field: env_to_str("BUILDHOOK_SERVER_PAYLOAD_FIELD", "payload"),
            },
            dispatch: DispatchConfig {
                driver: DispatchDriver::from_str(&env_to_str("BUILDHOOK_DISPATCH_DRIVER", "tcp"))?,
                master_address: env_to_str("BUILDHOOK_DISPATCH_MASTER_ADDRESS", "localhost:9989"),
                username: env_to_str("BUILDHOOK_DISPATCH_USERNAME", "change"),
                password: env_to_str("BUILDHOOK_DISPATCH_PASSWORD", ""),
            },
            vcs: VcsConfig {
                git_executable: env_to_str("BUILDHOOK_VCS_GIT_EXECUTABLE", "git"),
                timeout: env_to_u64("BUILDHOOK_VCS_TIMEOUT", DEFAULT_VCS_TIMEOUT),
                max_time: env_to_optional_u64("BUILDHOOK_VCS_MAX_TIME", None),
                sourcedata_filename: env_to_str(
                    "BUILDHOOK_VCS_SOURCEDATA_FILENAME",
                    ".buildhook-sourcedata",
                ),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BUILDHOOK_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("BUILDHOOK_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("BUILDHOOK_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Config, DriverError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u64(name: &str, default: Option<u64>) -> Option<u64> {
    env::var(name)
        .map(|e| e.parse::<u64>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn vcs_durations() {
        let config = VcsConfig {
            git_executable: "git".into(),
            timeout: 30,
            max_time: Some(90),
            sourcedata_filename: ".buildhook-sourcedata".into(),
        };

        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_time(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn missing_variable_uses_default() {
        assert_eq!(
            env_to_str("BUILDHOOK_TEST_SURELY_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
        assert_eq!(env_to_optional_u64("BUILDHOOK_TEST_SURELY_UNSET_VARIABLE", None), None);
    }
}
