//! # xerxes-cfg - Topology configuration generator for the Xerxes simulator
//!
//! This library builds the structured configuration files that describe a
//! hardware simulation topology: a graph of hosts, memory controllers,
//! switches, buses and snoop filters, consumed by the Xerxes discrete-event
//! interconnect simulator.
//!
//! ## Overview
//!
//! The crate is a declarative graph emitter. It does not simulate anything
//! and does not check device semantics beyond structural well-formedness.
//! A caller builds devices, registers them, connects them (or lets a
//! topology generator do it), then renders the registry to text.
//!
//! ## Key Features
//!
//! - **Typed parameters**: every device is a tag plus an ordered parameter
//!   store with typed values (bool, string, integer, float, range list)
//! - **Deterministic output**: devices and edges render in registration order
//! - **Topology generators**: chain, ring, tree, spine-leaf and full mesh, with
//!   optional bus insertion and bandwidth-derived switch delays
//! - **Scenarios**: bus sweeps, trace replay and snoop-filter victim studies
//!
//! ## Architecture
//!
//! - `params`: parameter values and the ordered parameter store
//! - `device`: device variants and their defaults
//! - `registry`: the device graph and global simulation settings
//! - `document`: rendering and reading back the config document
//! - `topology`: topology generators and bandwidth-to-delay conversion
//! - `scenario`: ready-made experiment configurations
//! - `config` / `config_loader`: YAML run files
//! - `analysis`: the simulator's output vocabulary and stats parsing
//! - `utils`: atomic output, CLI parameter parsing, structural checks
//!
//! ## Example Usage
//!
//! ```rust
//! use xerxes_cfg::registry::GlobalSettings;
//! use xerxes_cfg::topology::{self, TopologyKind, TopologySpec};
//!
//! let spec = TopologySpec::new(TopologyKind::Ring, 4)
//!     .with_bandwidth(128.0)
//!     .with_normalize(true);
//! let registry = topology::generate(&spec, GlobalSettings::default())?;
//!
//! // 30 ticks per hop for 128 MB/s, doubled for the ring
//! assert_eq!(registry.device("Switch-0").unwrap().get_int("delay")?, 60);
//! let document = registry.render();
//! assert!(document.starts_with("max_clock = "));
//! # Ok::<(), xerxes_cfg::error::ConfigError>(())
//! ```
//!
//! ## Error Handling
//!
//! The core returns `xerxes_cfg::error::ConfigError` through
//! `xerxes_cfg::error::Result`. File loading and the binaries use `color_eyre`
//! for context-rich reports.

pub mod analysis;
pub mod config;
pub mod config_loader;
pub mod device;
pub mod document;
pub mod error;
pub mod params;
pub mod registry;
pub mod scenario;
pub mod topology;
pub mod utils;

pub use device::{Device, DeviceKind};
pub use error::{ConfigError, Result};
pub use params::{ParamStore, ParamValue};
pub use registry::{GlobalSettings, Registry};
