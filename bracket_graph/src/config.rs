//! Request defaults configuration.
//!
//! Consolidates the environment variable reads that shape outbound requests.

use crate::graph::TournamentType;

/// Defaults applied when building outbound requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    /// Ask the service to embed participants in tournament responses
    pub include_participants: bool,
    /// Ask the service to embed matches in tournament responses
    pub include_matches: bool,
    /// Format used when creating a tournament without an explicit one
    pub tournament_type: TournamentType,
    /// Whether newly created tournaments accept sign-ups
    pub open_signup: bool,
    /// Organization subdomain new tournaments are created under
    pub subdomain: Option<String>,
}

impl RequestDefaults {
    /// Load defaults from environment variables
    ///
    /// Recognized variables (all optional):
    /// - `BRACKET_INCLUDE_PARTICIPANTS`: `true`/`false`/`1`/`0` (default: true)
    /// - `BRACKET_INCLUDE_MATCHES`: `true`/`false`/`1`/`0` (default: true)
    /// - `BRACKET_TOURNAMENT_TYPE`: `single`, `double`, `round robin`, `swiss` (default: single)
    /// - `BRACKET_OPEN_SIGNUP`: `true`/`false`/`1`/`0` (default: false)
    /// - `BRACKET_SUBDOMAIN`: organization subdomain (default: none)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set to an unparsable value
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tournament_type = match std::env::var("BRACKET_TOURNAMENT_TYPE") {
            Ok(value) => TournamentType::from_name(&value).ok_or_else(|| ConfigError::Invalid {
                var: "BRACKET_TOURNAMENT_TYPE".to_string(),
                reason: format!("Unknown tournament type {:?}", value),
            })?,
            Err(_) => defaults.tournament_type,
        };

        let subdomain = std::env::var("BRACKET_SUBDOMAIN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let config = Self {
            include_participants: parse_flag_or(
                "BRACKET_INCLUDE_PARTICIPANTS",
                defaults.include_participants,
            )?,
            include_matches: parse_flag_or("BRACKET_INCLUDE_MATCHES", defaults.include_matches)?,
            tournament_type,
            open_signup: parse_flag_or("BRACKET_OPEN_SIGNUP", defaults.open_signup)?,
            subdomain,
        };
        log::debug!("Loaded request defaults: {:?}", config);
        Ok(config)
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            include_participants: true,
            include_matches: true,
            tournament_type: TournamentType::SingleElimination,
            open_signup: false,
            subdomain: None,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse a boolean environment variable, falling back to `default` when unset
fn parse_flag_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Expected a boolean, got {:?}", value),
            }),
        },
        Err(_) => Ok(default),
    }
}
