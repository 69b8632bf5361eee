//! Validation utilities.

use std::fmt::Write;

use buildhook_config::{Config, DispatchDriver};
use buildhook_models::ControllerAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

#[inline]
fn _missing(error: &mut String, name: &str) {
    error.push('\n');
    let _ = write!(error, "  - Missing env. var.: {}", name);
}

#[inline]
fn _invalid(error: &mut String, name: &str, reason: &str) {
    error.push('\n');
    let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
}

fn into_result(error: String) -> Result<(), ValidationError> {
    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration shared by every command.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "BUILDHOOK_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "BUILDHOOK_SERVER_BIND_PORT");
    }
    if config.server.payload_field.is_empty() {
        _missing(&mut error, "BUILDHOOK_SERVER_PAYLOAD_FIELD");
    }

    // Check VCS configuration
    if config.vcs.git_executable.is_empty() {
        _missing(&mut error, "BUILDHOOK_VCS_GIT_EXECUTABLE");
    }
    if config.vcs.timeout == 0 {
        _invalid(&mut error, "BUILDHOOK_VCS_TIMEOUT", "must be positive");
    }
    if config.vcs.max_time == Some(0) {
        _invalid(&mut error, "BUILDHOOK_VCS_MAX_TIME", "must be positive");
    }
    if config.vcs.sourcedata_filename.is_empty() {
        _missing(&mut error, "BUILDHOOK_VCS_SOURCEDATA_FILENAME");
    }

    into_result(error)
}

/// Validate what the change hook server needs to reach the controller.
pub fn validate_dispatch_configuration(config: &Config) -> Result<(), ValidationError> {
    let mut error = String::new();

    if let Err(e) = config.dispatch.master_address.parse::<ControllerAddress>() {
        _invalid(
            &mut error,
            "BUILDHOOK_DISPATCH_MASTER_ADDRESS",
            &e.to_string(),
        );
    }

    if config.dispatch.driver == DispatchDriver::Tcp {
        if config.dispatch.username.is_empty() {
            _missing(&mut error, "BUILDHOOK_DISPATCH_USERNAME");
        }
        if config.dispatch.password.is_empty() {
            _missing(&mut error, "BUILDHOOK_DISPATCH_PASSWORD");
        }
    }

    into_result(error)
}
