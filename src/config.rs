//! Run configuration: what to generate and with which global settings.
//!
//! A run file is YAML with a `general` section (all keys optional) and a
//! `generate` section naming exactly one generator:
//!
//! ```yaml
//! general:
//!   max_clock: 3000000
//!   log_level: INFO
//! outputdir: fig11
//! generate:
//!   topology:
//!     kind: ring
//!     endpoints: 8
//!     bw: 128
//!     bus: true
//!     norm: true
//! ```

use crate::error::{ConfigError, Result};
use crate::registry::{GlobalSettings, Registry};
use crate::scenario::{self, TraceWorkload, VictimSpec};
use crate::topology::{self, TopologySpec};
use serde::{Deserialize, Serialize};

/// Top-level run file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub general: GlobalSettings,
    /// Output subdirectory; when set, `log_name` is derived from it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputdir: Option<String>,
    /// Written as a single-key map (`topology: {...}`) or a bare name (`sample`)
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub generate: Generator,
}

/// The generator a run invokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    Topology(TopologySpec),
    Sample,
    BusSweep { wr_ratio: f64, frame_size: i64 },
    Trace { workload: String, trace: String },
    Victim(VictimSpec),
}

impl Generator {
    /// Simulator log path conventionally used for this generator's runs
    pub fn log_name(&self, outputdir: &str) -> String {
        match self {
            Self::Topology(spec) => topology::default_log_name(outputdir, spec.kind),
            Self::Sample => format!("output/{}/sample.csv", outputdir),
            Self::BusSweep { wr_ratio, .. } => scenario::bus_sweep_log_name(outputdir, *wr_ratio),
            Self::Trace { trace, .. } => format!("output/{}/{}.csv", outputdir, trace),
            // Multi-host runs sweep the burst length rather than the policy
            Self::Victim(spec) if spec.hosts > 1 => format!("output/{}/len-{}.csv", outputdir, spec.burst_inv),
            Self::Victim(spec) => format!("output/{}/{}.csv", outputdir, spec.policy),
        }
    }

    /// Run the generator
    pub fn build(&self, settings: GlobalSettings) -> Result<Registry> {
        match self {
            Self::Topology(spec) => topology::generate(spec, settings),
            Self::Sample => scenario::sample(settings),
            Self::BusSweep { wr_ratio, frame_size } => scenario::bus_sweep(settings, *wr_ratio, *frame_size),
            Self::Trace { workload, trace } => {
                let workload: TraceWorkload = workload.parse()?;
                scenario::trace(settings, workload, trace)
            }
            Self::Victim(spec) => scenario::victim(settings, spec),
        }
    }
}

impl RunConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_settings(&self.general)?;
        if let Some(dir) = &self.outputdir {
            if dir.is_empty() {
                return Err(ConfigError::invalid("outputdir cannot be empty"));
            }
        }
        match &self.generate {
            Generator::Topology(spec) => spec.validate(),
            Generator::Trace { workload, .. } => workload.parse::<TraceWorkload>().map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Global settings with `log_name` derived from `outputdir` when present
    pub fn effective_settings(&self) -> GlobalSettings {
        let mut settings = self.general.clone();
        if let Some(dir) = &self.outputdir {
            settings.log_name = self.generate.log_name(dir);
        }
        settings
    }

    /// Build the registry described by this run
    pub fn build(&self) -> Result<Registry> {
        self.build_with(self.effective_settings())
    }

    /// Build with explicitly supplied settings
    pub fn build_with(&self, settings: GlobalSettings) -> Result<Registry> {
        validate_settings(&settings)?;
        self.generate.build(settings)
    }
}

/// Reject global scalars the simulator cannot run with
pub fn validate_settings(settings: &GlobalSettings) -> Result<()> {
    if settings.max_clock == 0 {
        return Err(ConfigError::invalid("max_clock must be positive"));
    }
    if settings.clock_granu == 0 {
        return Err(ConfigError::invalid("clock_granu must be positive"));
    }
    if settings.log_name.is_empty() {
        return Err(ConfigError::invalid("log_name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EvictionPolicy;
    use crate::topology::TopologyKind;

    #[test]
    fn test_topology_run_parsing() {
        let yaml = r#"
general:
  max_clock: 100000
outputdir: fig11
generate:
  topology:
    kind: ring
    endpoints: 8
    bw: 128
    norm: true
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.max_clock, 100000);
        assert_eq!(config.general.clock_granu, 1);

        let settings = config.effective_settings();
        assert_eq!(settings.log_name, "output/fig11/ring.csv");

        match &config.generate {
            Generator::Topology(spec) => {
                assert_eq!(spec.kind, TopologyKind::Ring);
                assert!(spec.normalize);
            }
            other => panic!("Expected topology generator, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_run_parsing() {
        let config: RunConfig = serde_yaml::from_str("generate: sample\n").unwrap();
        assert_eq!(config.generate, Generator::Sample);
        assert_eq!(config.general, GlobalSettings::default());

        let yaml = "generate:\n  victim:\n    policy: LFI\n    burst_inv: 2\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        match &config.generate {
            Generator::Victim(spec) => {
                assert_eq!(spec.policy, EvictionPolicy::Lfi);
                assert_eq!(spec.hosts, 1);
            }
            other => panic!("Expected victim generator, got {:?}", other),
        }
        assert_eq!(config.generate.log_name("fig13"), "output/fig13/LFI.csv");
    }

    #[test]
    fn test_run_host_params_keep_defaults() {
        let yaml = "generate:\n  topology:\n    kind: ring\n    endpoints: 2\n    host_params:\n      coherent: true\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        let registry = config.build().unwrap();

        let host = registry.device("Host-0").unwrap();
        assert!(host.get_bool("coherent").unwrap());
        assert_eq!(host.get_int("q_capacity").unwrap(), 24);
        assert_eq!(host.get_int("interleave_param").unwrap(), 10000);
    }

    #[test]
    fn test_generate_section_round_trip() {
        for yaml in [
            "generate: sample\n",
            "generate:\n  bus_sweep:\n    wr_ratio: 0.25\n    frame_size: 128\n",
            "generate:\n  topology:\n    kind: full\n    endpoints: 3\n",
        ] {
            let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
            let written = serde_yaml::to_string(&config).unwrap();
            let reread: RunConfig = serde_yaml::from_str(&written).unwrap();
            assert_eq!(reread, config, "{}", written);
        }
    }

    #[test]
    fn test_victim_log_names() {
        let mut spec = VictimSpec::new(EvictionPolicy::Lru);
        assert_eq!(Generator::Victim(spec.clone()).log_name("fig13"), "output/fig13/LRU.csv");

        spec.hosts = 2;
        spec.burst_inv = 4;
        assert_eq!(Generator::Victim(spec).log_name("fig14"), "output/fig14/len-4.csv");
    }

    #[test]
    fn test_validation_errors() {
        let yaml = "general:\n  max_clock: 0\ngenerate: sample\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());

        let yaml = "generate:\n  topology:\n    kind: full\n    endpoints: 1\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());

        let yaml = "generate:\n  trace:\n    workload: quadbus\n    trace: bfs\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_bus_sweep() {
        let yaml = "outputdir: fig11\ngenerate:\n  bus_sweep:\n    wr_ratio: 0.5\n    frame_size: 0\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        let registry = config.build().unwrap();
        assert_eq!(registry.settings().log_name, "output/fig11/0.5.csv");
        assert!(!registry.device("Bus").unwrap().get_bool("is_full").unwrap());
    }
}
