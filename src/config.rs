use std::env;
use std::time::Duration;

/// Environment variable overriding the POST timeout, in whole seconds
pub const TIMEOUT_ENV: &str = "FORM_RELAY_TIMEOUT_SECS";

/// Environment variable overriding the User-Agent header
pub const USER_AGENT_ENV: &str = "FORM_RELAY_USER_AGENT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied to each outbound form POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostConfig {
    /// Upper bound for sending the request and reading the whole response
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("form-relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl PostConfig {
    /// Build a config from the defaults, overridden by `FORM_RELAY_TIMEOUT_SECS`
    /// and `FORM_RELAY_USER_AGENT` when they are set.
    ///
    /// A timeout that is not a positive integer is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!(
                    "Ignoring {TIMEOUT_ENV}={raw:?}, using default of {:?}",
                    config.timeout
                ),
            }
        }

        if let Some(user_agent) = lookup(USER_AGENT_ENV).filter(|ua| !ua.trim().is_empty()) {
            config.user_agent = user_agent;
        }

        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = PostConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PostConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("form-relay/"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = PostConfig::from_lookup(lookup(&[
            (TIMEOUT_ENV, "5"),
            (USER_AGENT_ENV, "portal/2.0"),
        ]));

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "portal/2.0");
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        for raw in ["abc", "0", "-3", ""] {
            let config = PostConfig::from_lookup(lookup(&[(TIMEOUT_ENV, raw)]));
            assert_eq!(config.timeout, DEFAULT_TIMEOUT, "raw value {raw:?}");
        }
    }

    #[test]
    fn test_builder_methods() {
        let config = PostConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_user_agent("tests");

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.user_agent, "tests");
    }
}
