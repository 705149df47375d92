use crate::config::RunConfig;
use crate::registry::GlobalOverrides;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a run configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<RunConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: RunConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Apply command-line overrides of the global scalars to a loaded run
pub fn apply_overrides(config: &mut RunConfig, overrides: &GlobalOverrides) -> Result<()> {
    overrides.apply(&mut config.general);

    // An explicit log name wins over one derived from outputdir
    if overrides.log_name.is_some() {
        config.outputdir = None;
    }

    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_topology_config() {
        let yaml = r#"
general:
  log_level: DEBUG
generate:
  topology:
    kind: tree
    endpoints: 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.general.log_level, "DEBUG");
        let registry = config.build().unwrap();
        assert_eq!(registry.device_count(), 4 + 4 + 7);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "generate:\n  topology:\n    kind: ring\n    endpoints: 0\n").unwrap();
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("requires at least 2"), "{}", err);

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not: [valid").unwrap();
        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/run.yaml")).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let yaml = "outputdir: fig12\ngenerate:\n  topology:\n    kind: chain\n    endpoints: 2\n";
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let mut config = load_config(temp_file.path()).unwrap();
        let overrides = GlobalOverrides {
            max_clock: Some(42),
            log_name: Some("custom.csv".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();

        let settings = config.effective_settings();
        assert_eq!(settings.max_clock, 42);
        assert_eq!(settings.log_name, "custom.csv");
    }
}
