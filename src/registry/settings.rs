//! Global simulation scalars written at the top of every document.

use serde::{Deserialize, Serialize};

/// Simulation-wide settings.
///
/// Rendered as `max_clock`, `clock_granu`, `log_level` and `log_name`, in that
/// order. Passed explicitly into `Registry::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Simulation stops after this many ticks
    pub max_clock: u64,
    /// Ticks advanced per simulation step
    pub clock_granu: u64,
    pub log_level: String,
    /// CSV trace path the simulator writes per-request records to
    pub log_name: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            max_clock: 3_000_000,
            clock_granu: 1,
            log_level: "INFO".to_string(),
            log_name: "output/default.csv".to_string(),
        }
    }
}

/// Optional overrides for the global scalars, typically from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOverrides {
    pub max_clock: Option<u64>,
    pub clock_granu: Option<u64>,
    pub log_level: Option<String>,
    pub log_name: Option<String>,
}

impl GlobalOverrides {
    /// Apply the overrides that are present, leaving the rest untouched
    pub fn apply(&self, settings: &mut GlobalSettings) {
        if let Some(max_clock) = self.max_clock {
            settings.max_clock = max_clock;
        }
        if let Some(clock_granu) = self.clock_granu {
            settings.clock_granu = clock_granu;
        }
        if let Some(log_level) = &self.log_level {
            settings.log_level = log_level.clone();
        }
        if let Some(log_name) = &self.log_name {
            settings.log_name = log_name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.max_clock, 3_000_000);
        assert_eq!(settings.clock_granu, 1);
        assert_eq!(settings.log_level, "INFO");
        assert_eq!(settings.log_name, "output/default.csv");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: GlobalSettings = serde_yaml::from_str("max_clock: 500\n").unwrap();
        assert_eq!(settings.max_clock, 500);
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_overrides_apply_only_present_fields() {
        let mut settings = GlobalSettings::default();
        let overrides = GlobalOverrides {
            clock_granu: Some(4),
            log_name: Some("output/run/ring.csv".to_string()),
            ..Default::default()
        };
        overrides.apply(&mut settings);

        assert_eq!(settings.max_clock, 3_000_000);
        assert_eq!(settings.clock_granu, 4);
        assert_eq!(settings.log_name, "output/run/ring.csv");
    }
}
