//! Behavioural tests for layered configuration loading.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use chime_config::{
    Config, LogFormat, default_log_filter, default_log_format, default_tell_time_intent,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const OVERRIDDEN_KEYS: &[&str] = &[
    "CHIME_LOG_FILTER",
    "CHIME_LOG_FORMAT",
    "CHIME_SKILL_ID",
    "CHIME_RECOVER_ERRORS",
    "CHIME_TELL_TIME_INTENT",
];

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        let harness = Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("chime")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: guard,
        };
        // Start every scenario from a clean environment.
        for key in OVERRIDDEN_KEYS {
            harness.clear_env(key);
        }
        harness
    }

    fn write_config(&self, contents: &str) {
        let path = self.temp_dir.path().join("chime.toml");
        if let Err(error) = fs::write(&path, contents) {
            panic!("failed to write configuration: {error}");
        }

        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn remember(&self, key: &str) {
        let previous = std::env::var_os(key);
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn set_env(&self, key: &str, value: &str) {
        self.remember(key);
        // Environment mutation is `unsafe` in edition 2024. The harness holds
        // the env mutex and restores overrides in `Drop`.
        unsafe { std::env::set_var(key, value) };
    }

    fn clear_env(&self, key: &str) {
        self.remember(key);
        unsafe { std::env::remove_var(key) };
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => {
                *self.loaded.borrow_mut() = Some(config);
            }
            Err(error) => {
                *self.error.borrow_mut() = Some(error.to_string());
            }
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();

        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }

        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the log filter to {filter}")]
fn given_configuration_file(harness: &Harness, filter: String) {
    harness.write_config(&format!("log_filter = \"{}\"\n", strip_quotes(&filter)));
}

#[given("a malformed configuration file")]
fn given_malformed_configuration_file(harness: &Harness) {
    harness.write_config("log_filter = \n");
}

#[given("a configuration file enabling error recovery")]
fn given_file_enables_recovery(harness: &Harness) {
    harness.write_config("recover_errors = true\n");
}

#[given("a configuration file setting the tell-time intent to {intent}")]
fn given_file_tell_time_intent(harness: &Harness, intent: String) {
    harness.write_config(&format!("tell_time_intent = \"{}\"\n", strip_quotes(&intent)));
}

#[given("the environment sets error recovery to {enabled}")]
fn given_environment_recovery(harness: &Harness, enabled: String) {
    harness.set_env("CHIME_RECOVER_ERRORS", strip_quotes(&enabled));
}

#[given("the environment overrides the tell-time intent to {intent}")]
fn given_environment_tell_time_intent(harness: &Harness, intent: String) {
    harness.set_env("CHIME_TELL_TIME_INTENT", strip_quotes(&intent));
}

#[given("the environment sets the log format to {format}")]
fn given_environment_log_format(harness: &Harness, format: String) {
    harness.set_env("CHIME_LOG_FORMAT", strip_quotes(&format));
}

#[given("the environment overrides the log filter to {filter}")]
fn given_environment_filter(harness: &Harness, filter: String) {
    harness.set_env("CHIME_LOG_FILTER", strip_quotes(&filter));
}

#[given("the environment sets the skill ID to {skill_id}")]
fn given_environment_skill_id(harness: &Harness, skill_id: String) {
    harness.set_env("CHIME_SKILL_ID", strip_quotes(&skill_id));
}

#[when("the CLI sets the log filter to {filter}")]
fn when_cli_override(harness: &Harness, filter: String) {
    harness.push_cli_arg("--log-filter");
    harness.push_cli_arg(strip_quotes(&filter));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the log filter to {filter}")]
fn then_resolved_filter(harness: &Harness, filter: String) {
    let config = harness.loaded_config();
    assert_eq!(config.log_filter(), strip_quotes(&filter));
}

#[then("loading the configuration resolves the skill ID to {skill_id}")]
fn then_resolved_skill_id(harness: &Harness, skill_id: String) {
    let config = harness.loaded_config();
    assert_eq!(config.skill_id(), Some(strip_quotes(&skill_id)));
}

#[then("loading the configuration enables error recovery")]
fn then_recovery_enabled(harness: &Harness) {
    assert!(harness.loaded_config().recover_errors());
}

#[then("loading the configuration disables error recovery")]
fn then_recovery_disabled(harness: &Harness) {
    assert!(!harness.loaded_config().recover_errors());
}

#[then("loading the configuration resolves the tell-time intent to {intent}")]
fn then_resolved_tell_time_intent(harness: &Harness, intent: String) {
    let config = harness.loaded_config();
    assert_eq!(config.tell_time_intent(), strip_quotes(&intent));
}

#[then("loading the configuration uses the {format} log format")]
fn then_resolved_log_format(harness: &Harness, format: String) {
    let expected = match LogFormat::from_str(strip_quotes(&format)) {
        Ok(parsed) => parsed,
        Err(error) => panic!("scenario names an unknown log format: {error}"),
    };
    assert_eq!(harness.loaded_config().log_format(), expected);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.loaded_config();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.skill_id(), None);
    assert!(!config.recover_errors());
    assert_eq!(config.tell_time_intent(), default_tell_time_intent());
}

#[then("loading the configuration fails")]
fn then_load_fails(harness: &Harness) {
    harness.load();
    assert!(
        harness.error.borrow().is_some(),
        "expected the malformed configuration to be rejected"
    );
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply when nothing is configured"
)]
fn defaults_apply(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file overrides the defaults"
)]
fn file_overrides_defaults(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Command-line flags override the environment"
)]
fn cli_overrides_environment(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The skill ID can be supplied through the environment"
)]
fn skill_id_from_environment(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A malformed configuration file fails the load"
)]
fn malformed_file_fails(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file enables error recovery"
)]
fn file_enables_recovery(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment enables error recovery"
)]
fn environment_enables_recovery(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment disables error recovery enabled by the file"
)]
fn environment_disables_file_recovery(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file sets the tell-time intent"
)]
fn file_sets_tell_time_intent(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the tell-time intent from the file"
)]
fn environment_overrides_tell_time_intent(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment selects the log format"
)]
fn environment_selects_log_format(harness: Harness) {
    drop(harness);
}
