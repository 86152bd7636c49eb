//! Environment variable substitution for configuration values.

use crate::error::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

static ENV_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

/// Resolves `${VAR_NAME}` patterns in a configuration value.
///
/// Lets deployments keep the auth token out of the configuration file
/// (`auth_token: "${HIPCHAT_AUTH_TOKEN}"`). Every referenced variable must
/// be defined; an undefined one is a configuration error listing all missing
/// names, surfaced at startup.
pub fn resolve_env_vars(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let mut result = value.to_string();
    let mut missing = Vec::new();

    for cap in ENV_VAR_REGEX.captures_iter(value) {
        let full_match = cap.get(0).expect("capture 0 always present").as_str();
        let var_name = &cap[1];

        match std::env::var(var_name) {
            Ok(var_value) => {
                result = result.replace(full_match, &var_value);
            }
            Err(_) => {
                missing.push(var_name.to_string());
            }
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            message: format!(
                "undefined environment variable{}: {}",
                if missing.len() > 1 { "s" } else { "" },
                missing.join(", ")
            ),
        })
    }
}
