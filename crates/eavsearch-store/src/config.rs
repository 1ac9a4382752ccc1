//! Database connection settings
//!
//! Settings live in a YAML mapping (`db.yaml` by default) with the keys
//! `host`, `port`, `user`, `passwd` and `db`. When the file is absent or
//! incomplete an interactive run collects the settings from the operator
//! and offers to save them; an automated run fails.
//!
//! ## Logging Ownership
//!
//! `load_or_prompt` owns the `load_config` start/end/end_error events.
//! Setting values are never logged.

use crate::errors::{io_error, yaml_error, Result};
use eavsearch_core::errors::SearchError;
use eavsearch_core::prompt::{PromptSpec, Prompter};
use eavsearch_core::{log_op_end, log_op_error, log_op_start};
use eavsearch_core_types::Sensitive;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "db.yaml";

/// Keys every config file must provide, in the order they are reported
pub const REQUIRED_KEYS: [&str; 5] = ["host", "port", "user", "passwd", "db"];

pub const DEFAULT_PORT: u16 = 3306;

const CREDENTIALS_INTRO: &str =
    "Please either end this script to set \"host, port, user, passwd, db\" in \"{path}\" and re-run this program, or press [Enter] to answer a few prompts to get your database credentials in order to connect you";

/// Everything needed to open a MySQL connection
#[derive(Debug, Clone, PartialEq)]
pub struct DbConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub passwd: Sensitive<String>,
    pub db: String,
}

/// On-disk layout; the only place the password is exposed for writing
#[derive(Serialize)]
struct StoredConfig<'a> {
    host: &'a str,
    port: u16,
    user: &'a str,
    passwd: &'a str,
    db: &'a str,
}

impl DbConnectionConfig {
    /// Load settings from `path`
    ///
    /// A file that is not a YAML mapping counts as missing every key.
    ///
    /// # Errors
    ///
    /// `SearchError::MissingConfig` if the file does not exist (no keys
    /// listed) or any key is absent or unusable (those keys listed).
    /// `SearchError::Io` if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let path_text = path.display().to_string();
        if !path.is_file() {
            return Err(SearchError::MissingConfig {
                path: path_text,
                missing: Vec::new(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
        let mapping = match serde_yaml::from_str::<Value>(&contents) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(_) => Mapping::new(),
            Err(e) => {
                tracing::warn!(path = %path_text, error = %e, "config file is not valid YAML");
                Mapping::new()
            }
        };

        let host = scalar(&mapping, "host");
        let port = scalar(&mapping, "port").and_then(|p| p.trim().parse::<u16>().ok());
        let user = scalar(&mapping, "user");
        let passwd = scalar(&mapping, "passwd");
        let db = scalar(&mapping, "db");

        match (host, port, user, passwd, db) {
            (Some(host), Some(port), Some(user), Some(passwd), Some(db)) => Ok(Self {
                host,
                port,
                user,
                passwd: Sensitive::new(passwd),
                db,
            }),
            (host, port, user, passwd, db) => {
                let present = [
                    host.is_some(),
                    port.is_some(),
                    user.is_some(),
                    passwd.is_some(),
                    db.is_some(),
                ];
                let missing = REQUIRED_KEYS
                    .iter()
                    .zip(present)
                    .filter(|(_, found)| !found)
                    .map(|(key, _)| key.to_string())
                    .collect();
                Err(SearchError::MissingConfig {
                    path: path_text,
                    missing,
                })
            }
        }
    }

    /// Write settings to `path` as YAML, replacing any existing file
    ///
    /// # Errors
    ///
    /// `SearchError::Serialization` if encoding fails, `SearchError::Io` if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let stored = StoredConfig {
            host: &self.host,
            port: self.port,
            user: &self.user,
            passwd: self.passwd.expose(),
            db: &self.db,
        };
        let yaml = serde_yaml::to_string(&stored).map_err(yaml_error)?;
        std::fs::write(path, yaml).map_err(|e| io_error("write_config", e))?;
        tracing::debug!(path = %path.display(), "saved connection settings");
        Ok(())
    }
}

// Scalars of any YAML type are accepted as text (a numeric password is still a password).
fn scalar(mapping: &Mapping, key: &str) -> Option<String> {
    match mapping.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Collect settings from the operator, then offer to save them to `path`
///
/// `reason` is shown first so the operator knows why they are being asked.
///
/// # Errors
///
/// `SearchError::UserCancelled` if input ends; `Io`/`Serialization` if
/// saving was accepted and failed.
pub fn prompt_credentials(
    prompter: &mut dyn Prompter,
    path: &Path,
    reason: &SearchError,
) -> Result<DbConnectionConfig> {
    let path_text = path.display().to_string();
    prompter.say(&reason.to_string());
    prompter.ask(&PromptSpec::new(CREDENTIALS_INTRO.replace("{path}", &path_text)))?;

    let host = prompter.ask(&PromptSpec::new("Hostname").preserving_case())?;
    let port = prompt_port(prompter)?;
    let user = prompter.ask(&PromptSpec::new("Username").preserving_case())?;
    let passwd = Sensitive::new(prompter.ask(&PromptSpec::new("Password").preserving_case())?);
    let db = prompter.ask(
        &PromptSpec::new("Specific database on host to connect to").preserving_case(),
    )?;

    prompter.say("");
    prompter.say("Great! Thank you for answering those questions.");
    prompter.say("");
    prompter.say("Right now none of this information will be saved once the program closes.");

    let config = DbConnectionConfig {
        host,
        port,
        user,
        passwd,
        db,
    };

    let mut question =
        "Would you like to save your connection details for future connections?".to_string();
    if path.is_file() {
        question.push_str(&format!(
            " (warning: this will overwrite your current \"{}\" file)",
            path_text
        ));
    }

    if prompter.confirm(&question, false)? {
        config.save(path)?;
    } else {
        prompter.say("Okay! None of the information entered above will be saved.");
    }

    Ok(config)
}

fn prompt_port(prompter: &mut dyn Prompter) -> Result<u16> {
    let default = DEFAULT_PORT.to_string();
    let spec = PromptSpec::new("Port")
        .with_default(default.clone())
        .with_options([default]);
    loop {
        match prompter.ask(&spec)?.trim().parse::<u16>() {
            Ok(port) => return Ok(port),
            Err(_) => prompter.say("Invalid selection."),
        }
    }
}

/// Load settings, falling back to the credential prompts when interactive
///
/// # Errors
///
/// In automated mode a missing or incomplete file is returned as
/// `SearchError::MissingConfig`. Otherwise see [`prompt_credentials`].
pub fn load_or_prompt(
    path: &Path,
    automated: bool,
    prompter: &mut dyn Prompter,
) -> Result<DbConnectionConfig> {
    log_op_start!("load_config", automated = automated);
    let start = std::time::Instant::now();

    let result = match DbConnectionConfig::load(path) {
        Err(reason @ SearchError::MissingConfig { .. }) if !automated => {
            tracing::debug!(reason = %reason, "collecting connection settings interactively");
            prompt_credentials(prompter, path, &reason)
        }
        other => other,
    };

    match &result {
        Ok(config) => {
            log_op_end!(
                "load_config",
                duration_ms = start.elapsed().as_millis() as u64,
                host = config.host.as_str(),
                port = config.port
            );
        }
        Err(e) => {
            log_op_error!(
                "load_config",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accepts_numbers_and_strings() {
        let mapping: Mapping =
            serde_yaml::from_str("host: db.local\nport: 3307\npasswd: 1234\n").unwrap();
        assert_eq!(scalar(&mapping, "host").as_deref(), Some("db.local"));
        assert_eq!(scalar(&mapping, "port").as_deref(), Some("3307"));
        assert_eq!(scalar(&mapping, "passwd").as_deref(), Some("1234"));
        assert_eq!(scalar(&mapping, "db"), None);
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let config = DbConnectionConfig {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            user: "magento".to_string(),
            passwd: Sensitive::new("s3cret".to_string()),
            db: "catalog".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("***REDACTED***"));
    }

    #[test]
    fn test_intro_names_config_path() {
        let intro = CREDENTIALS_INTRO.replace("{path}", "conf/db.yaml");
        assert!(intro.contains("in \"conf/db.yaml\" and re-run"));
    }
}
