use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use xerxes_cfg::config::{Generator, RunConfig};
use xerxes_cfg::config_loader;
use xerxes_cfg::device::EvictionPolicy;
use xerxes_cfg::document::parse_document;
use xerxes_cfg::params::ParamValue;
use xerxes_cfg::registry::{GlobalOverrides, GlobalSettings};
use xerxes_cfg::scenario::VictimSpec;
use xerxes_cfg::topology::{TopologyKind, TopologySpec};
use xerxes_cfg::utils::{emit_document, merge_params, parse_param_assignment, validate_structure};

/// Topology configuration generator for the Xerxes simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file name (prints to stdout when absent)
    #[arg(long, global = true)]
    cfgname: Option<PathBuf>,

    /// Simulator output (sub)directory; derives the log name
    #[arg(long, global = true)]
    outputdir: Option<String>,

    #[command(flatten)]
    globals: GlobalArgs,
}

/// Overrides for the global simulation scalars
#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Maximum clock
    #[arg(long, global = true)]
    max_clock: Option<u64>,

    /// Clock granularity
    #[arg(long, global = true)]
    clock_granu: Option<u64>,

    /// Simulator log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Simulator CSV log path
    #[arg(long, global = true)]
    log_name: Option<String>,
}

impl GlobalArgs {
    fn overrides(&self) -> GlobalOverrides {
        GlobalOverrides {
            max_clock: self.max_clock,
            clock_granu: self.clock_granu,
            log_level: self.log_level.clone(),
            log_name: self.log_name.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Endpoints wired into a chain, ring, tree, spine-leaf or full mesh
    Topo {
        /// Name of the topology
        #[arg(long)]
        topo: TopologyKind,

        /// Number of endpoints (host + mem pairs)
        #[arg(long)]
        epnum: usize,

        /// Switch port bandwidth (MB/s)
        #[arg(long)]
        bw: Option<f64>,

        /// Use buses to connect switches
        #[arg(long)]
        bus: bool,

        /// Use normalized bandwidth
        #[arg(long)]
        norm: bool,

        /// Extra host parameter, key=value (repeatable)
        #[arg(long = "host-param", value_parser = parse_param_assignment)]
        host_params: Vec<(String, ParamValue)>,

        /// Extra memory parameter, key=value (repeatable)
        #[arg(long = "mem-param", value_parser = parse_param_assignment)]
        mem_params: Vec<(String, ParamValue)>,
    },

    /// Requester -> bus -> snoop -> memory with default parameters
    Sample,

    /// Duplex bus write-ratio / frame-size study
    Bus {
        /// Write ratio
        #[arg(long)]
        ratio: f64,

        /// Frame size; zero or less selects a half duplex bus
        #[arg(long)]
        fsize: i64,
    },

    /// Trace-driven workload
    Trace {
        /// Trace name, read from ./traces/<name>.trace
        #[arg(long)]
        trace: String,

        /// Work type: fullbus, halfbus or a topology name
        #[arg(long)]
        work: String,
    },

    /// Snoop filter victim selection study
    Victim {
        /// Victim select policy
        #[arg(long)]
        policy: EvictionPolicy,

        /// Max burst invalidations
        #[arg(long, default_value_t = 0)]
        burst_inv: i64,

        /// Number of coherent hosts
        #[arg(long, default_value_t = 1)]
        hosts: usize,

        /// Hot/cold access pattern instead of streaming
        #[arg(long)]
        hot_cold: bool,
    },

    /// Generate from a YAML run file
    FromConfig {
        /// Path to the run configuration YAML file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Summarize an existing config document
    Inspect {
        /// Path to the config document
        path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Summary printed by `inspect`
#[derive(Serialize, Debug)]
struct InspectSummary {
    settings: GlobalSettings,
    devices: usize,
    edges: usize,
    devices_by_type: BTreeMap<String, usize>,
}

fn command_generator(command: &Command) -> Option<Generator> {
    match command {
        Command::Topo { topo, epnum, bw, bus, norm, host_params, mem_params } => {
            let mut spec = TopologySpec::new(*topo, *epnum).with_bus(*bus).with_normalize(*norm);
            spec.bandwidth_mbps = *bw;
            spec.host_params = merge_params(&spec.host_params, host_params);
            spec.mem_params = merge_params(&spec.mem_params, mem_params);
            Some(Generator::Topology(spec))
        }
        Command::Sample => Some(Generator::Sample),
        Command::Bus { ratio, fsize } => Some(Generator::BusSweep {
            wr_ratio: *ratio,
            frame_size: *fsize,
        }),
        Command::Trace { trace, work } => Some(Generator::Trace {
            workload: work.clone(),
            trace: trace.clone(),
        }),
        Command::Victim { policy, burst_inv, hosts, hot_cold } => Some(Generator::Victim(VictimSpec {
            policy: *policy,
            burst_inv: *burst_inv,
            hosts: *hosts,
            hot_cold: *hot_cold,
        })),
        Command::FromConfig { .. } | Command::Inspect { .. } => None,
    }
}

fn generate(cli: &Cli, mut config: RunConfig) -> Result<()> {
    if cli.outputdir.is_some() {
        config.outputdir = cli.outputdir.clone();
    }
    config_loader::apply_overrides(&mut config, &cli.globals.overrides())?;

    let registry = config.build()?;
    validate_structure(&registry)?;

    // Render fully before writing so a failure leaves no partial file
    let document = registry.render_checked()?;
    emit_document(cli.cfgname.as_deref(), &document)?;

    info!(
        "Generated configuration with {} devices and {} edges (log: {})",
        registry.device_count(),
        registry.edges().len(),
        registry.settings().log_name
    );
    Ok(())
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config document '{}'", path.display()))?;
    let doc = parse_document(&text)
        .wrap_err_with(|| format!("Failed to parse config document '{}'", path.display()))?;

    let mut devices_by_type = BTreeMap::new();
    for (_, typename) in &doc.devices {
        *devices_by_type.entry(typename.clone()).or_insert(0) += 1;
    }
    let summary = InspectSummary {
        settings: doc.settings.clone(),
        devices: doc.devices.len(),
        edges: doc.edges.len(),
        devices_by_type,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("max_clock:   {}", summary.settings.max_clock);
        println!("clock_granu: {}", summary.settings.clock_granu);
        println!("log_level:   {}", summary.settings.log_level);
        println!("log_name:    {}", summary.settings.log_name);
        println!("devices:     {}", summary.devices);
        for (typename, count) in &summary.devices_by_type {
            println!("  {:<18} {}", typename, count);
        }
        println!("edges:       {}", summary.edges);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match &cli.command {
        Command::FromConfig { config } => {
            let run = config_loader::load_config(config)?;
            generate(&cli, run)
        }
        Command::Inspect { path, json } => inspect(path, *json),
        command => {
            let generate_section = command_generator(command)
                .ok_or_else(|| color_eyre::eyre::eyre!("Command does not generate a configuration"))?;
            let run = RunConfig {
                general: GlobalSettings::default(),
                outputdir: None,
                generate: generate_section,
            };
            generate(&cli, run)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topo_parsing() {
        let cli = Cli::parse_from([
            "xerxes-cfg",
            "topo",
            "--topo", "spineleaf",
            "--epnum", "8",
            "--bw", "128",
            "--bus",
            "--host-param", "q_capacity=8",
            "--cfgname", "spineleaf.toml",
        ]);

        assert_eq!(cli.cfgname, Some(PathBuf::from("spineleaf.toml")));
        match command_generator(&cli.command) {
            Some(Generator::Topology(spec)) => {
                assert_eq!(spec.kind, TopologyKind::SpineLeaf);
                assert_eq!(spec.endpoints, 8);
                assert_eq!(spec.bandwidth_mbps, Some(128.0));
                assert!(spec.use_bus);
                assert!(!spec.normalize);
                assert_eq!(spec.host_params["q_capacity"], ParamValue::Int(8));
                assert_eq!(spec.host_params.len(), 1);
                assert_eq!(spec.host_defaults["interleave_param"], ParamValue::Int(10000));
            }
            other => panic!("Expected topology generator, got {:?}", other),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "xerxes-cfg",
            "--max-clock", "1000",
            "victim",
            "--policy", "LRU",
            "--log-level", "DEBUG",
        ]);

        let overrides = cli.globals.overrides();
        assert_eq!(overrides.max_clock, Some(1000));
        assert_eq!(overrides.log_level.as_deref(), Some("DEBUG"));
        assert!(matches!(
            command_generator(&cli.command),
            Some(Generator::Victim(VictimSpec { policy: EvictionPolicy::Lru, burst_inv: 0, hosts: 1, .. }))
        ));
    }

    #[test]
    fn test_invalid_topology_rejected() {
        let result = Cli::try_parse_from(["xerxes-cfg", "topo", "--topo", "torus", "--epnum", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_parsing() {
        let cli = Cli::parse_from(["xerxes-cfg", "inspect", "ring.toml", "--json"]);
        assert!(command_generator(&cli.command).is_none());
        assert!(matches!(cli.command, Command::Inspect { json: true, .. }));
    }
}
