//! Container configuration.
//!
//! Options are plain data: build them in code, read them from the process
//! environment, or (with the `config` feature) deserialize them.

use crate::error::{DiError, DiResult};

/// Environment variable toggling auto-wiring of unregistered identifiers.
pub const ENV_AUTOWIRE: &str = "AUTOWIRE_ENABLED";
/// Environment variable capping nested resolution depth.
pub const ENV_MAX_DEPTH: &str = "AUTOWIRE_MAX_DEPTH";

/// Options controlling resolution behavior.
///
/// # Examples
///
/// ```rust
/// use autowire::ContainerConfig;
///
/// let config = ContainerConfig::default().with_max_depth(64);
/// assert!(config.autowire);
/// assert_eq!(config.max_depth, Some(64));
///
/// let strict = ContainerConfig::default().without_autowire();
/// assert!(!strict.autowire);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Build unregistered identifiers through the type catalog
    pub autowire: bool,
    /// Fail with `DepthExceeded` past this many nested resolutions.
    /// Unset, cyclic graphs recurse until the stack is exhausted.
    pub max_depth: Option<usize>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            autowire: true,
            max_depth: None,
        }
    }
}

impl ContainerConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn without_autowire(mut self) -> Self {
        self.autowire = false;
        self
    }

    /// Reads `AUTOWIRE_ENABLED` and `AUTOWIRE_MAX_DEPTH`, defaulting unset values.
    pub fn from_env() -> DiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// ```rust
    /// use autowire::ContainerConfig;
    ///
    /// let config = ContainerConfig::from_lookup(|name| match name {
    ///     "AUTOWIRE_ENABLED" => Some("off".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert!(!config.autowire);
    /// assert_eq!(config.max_depth, None);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> DiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_AUTOWIRE) {
            config.autowire = parse_flag(ENV_AUTOWIRE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            let raw = raw.trim();
            config.max_depth = if raw.is_empty() {
                None
            } else {
                let depth = raw
                    .parse::<usize>()
                    .map_err(|_| DiError::InvalidConfig(format!("{ENV_MAX_DEPTH}={raw} is not a depth")))?;
                Some(depth)
            };
        }

        tracing::debug!(autowire = config.autowire, max_depth = ?config.max_depth, "container config loaded");
        Ok(config)
    }

    /// Parses a JSON object; missing fields take their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|e| DiError::InvalidConfig(e.to_string()))
    }
}

fn parse_flag(name: &str, raw: &str) -> DiResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DiError::InvalidConfig(format!("{name}={other} is not a boolean"))),
    }
}
