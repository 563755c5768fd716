//! Runtime bootstrap: configuration, telemetry and skill assembly.

use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use chime_config::Config;
use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::{error, info};

use crate::skill::Skill;
use crate::stream::StreamHandler;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the skill configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when any configuration source is invalid.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// Result of a successful bootstrap.
#[derive(Debug)]
pub struct Runtime {
    config: Config,
    handler: StreamHandler,
    telemetry: TelemetryHandle,
}

impl Runtime {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Handles one request from `reader`, writing the response to `writer`.
    ///
    /// Failures are logged and mapped to the process exit status.
    pub fn run<R: Read, W: Write>(&self, reader: R, writer: W) -> ExitCode {
        match self.handler.handle(reader, writer) {
            Ok(_) => ExitCode::SUCCESS,
            Err(failure) => {
                error!(
                    target: BOOTSTRAP_TARGET,
                    event = "request_failed",
                    status = failure.exit_status(),
                    error = %failure,
                    "request handling failed"
                );
                ExitCode::from(failure.exit_status())
            }
        }
    }
}

/// Loads configuration, initialises telemetry and builds the standard skill.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration or telemetry fail.
pub fn bootstrap_with(loader: &dyn ConfigLoader) -> Result<Runtime, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let handler = StreamHandler::new(Skill::from_config(&config));
    info!(
        target: BOOTSTRAP_TARGET,
        event = "bootstrap_succeeded",
        verify_skill_id = config.skill_id().is_some(),
        recover_errors = config.recover_errors(),
        "skill ready"
    );

    Ok(Runtime {
        config,
        handler,
        telemetry,
    })
}
