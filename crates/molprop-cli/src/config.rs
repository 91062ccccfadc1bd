use crate::cli::Cli;
use crate::error::{CliError, Result};
use molprop::engine::config::{ModelConfig, ModelConfigBuilder, ReferenceTable, TgCoefficients};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialBoilingPointConfig {
    #[serde(rename = "reference-table")]
    reference_table: Option<PathBuf>,
}

/// Configuration as read from a TOML file; every section is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialModelConfig {
    #[serde(rename = "tg-coefficients")]
    tg_coefficients: Option<TgCoefficients>,
    #[serde(rename = "boiling-point")]
    boiling_point: Option<PartialBoilingPointConfig>,
}

impl PartialModelConfig {
    /// Reads a config file. A relative `reference-table` path is taken
    /// relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut partial: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        if let Some(table) = partial
            .boiling_point
            .as_mut()
            .and_then(|bp| bp.reference_table.as_mut())
        {
            if table.is_relative() {
                *table = base_dir.join(&*table);
            }
        }
        Ok(partial)
    }

    /// Applies `--set` overrides and builds the final model configuration.
    pub fn merge_with_cli(mut self, set_values: &[String]) -> Result<ModelConfig> {
        self.apply_set_values(set_values)?;

        let mut builder = ModelConfigBuilder::new();

        if let Some(coefficients) = self.tg_coefficients {
            builder = builder.tg_coefficients(coefficients);
        }

        if let Some(path) = self.boiling_point.and_then(|bp| bp.reference_table) {
            info!("Loading boiling-point reference table from {:?}", &path);
            let table = ReferenceTable::load_csv(&path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?;
            builder = builder.reference_table(table);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            if let Some(name) = key.strip_prefix("tg-coefficients.") {
                let value: f64 = value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?;
                self.tg_coefficients
                    .get_or_insert_with(Default::default)
                    .set(name, value)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                continue;
            }

            match key {
                "boiling-point.reference-table" => {
                    self.boiling_point
                        .get_or_insert_with(Default::default)
                        .reference_table = Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Resolves the model configuration for a run: built-in defaults, then the
/// config file if one was given, then `--set` overrides.
pub fn resolve(cli: &Cli) -> Result<ModelConfig> {
    let partial = match &cli.config {
        Some(path) => PartialModelConfig::from_file(path)?,
        None => PartialModelConfig::default(),
    };
    let config = partial.merge_with_cli(&cli.set_values)?;
    debug!(
        reference_points = config.reference_table.points().len(),
        coefficients = ?config.tg_coefficients,
        "Resolved model configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use molprop::engine::config::ALKANE_BOILING_POINTS;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cli_with(args: &[&str]) -> Cli {
        let mut full = vec!["molprop", "monomers"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn no_config_resolves_to_built_in_defaults() {
        let config = resolve(&cli_with(&[])).unwrap();
        assert_eq!(config, ModelConfig::default());
        assert_eq!(
            config.reference_table.points(),
            &ALKANE_BOILING_POINTS[..]
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let config_path = write_file(
            &dir,
            "molprop.toml",
            r#"
            [tg-coefficients]
            base = 120.0
            aromatic-ring = 35.0
            "#,
        );

        let config = resolve(&cli_with(&["-c", config_path.to_str().unwrap()])).unwrap();
        assert_eq!(config.tg_coefficients.base, 120.0);
        assert_eq!(config.tg_coefficients.aromatic_ring, 35.0);
        assert_eq!(config.tg_coefficients.amide, 50.0);
    }

    #[test]
    fn set_value_overrides_file_and_defaults() {
        let dir = tempdir().unwrap();
        let config_path = write_file(
            &dir,
            "molprop.toml",
            "[tg-coefficients]\nbase = 120.0 # Will be overridden by --set\n",
        );

        let cli = cli_with(&[
            "-c",
            config_path.to_str().unwrap(),
            "-S",
            "tg-coefficients.base=100",
            "-S",
            "tg-coefficients.ester=22.5",
        ]);
        let config = resolve(&cli).unwrap();
        assert_eq!(config.tg_coefficients.base, 100.0);
        assert_eq!(config.tg_coefficients.ester, 22.5);
    }

    #[test]
    fn reference_table_is_resolved_relative_to_config_file() {
        let dir = tempdir().unwrap();
        write_file(
            &dir,
            "table.csv",
            "carbon_count,boiling_point\n1,-161.5\n2,-88.6\n3,-42.1\n",
        );
        let config_path = write_file(
            &dir,
            "molprop.toml",
            "[boiling-point]\nreference-table = \"table.csv\"\n",
        );

        let config = resolve(&cli_with(&["-c", config_path.to_str().unwrap()])).unwrap();
        assert_eq!(
            config.reference_table.points(),
            &[(1, -161.5), (2, -88.6), (3, -42.1)]
        );
    }

    #[test]
    fn set_value_can_point_to_reference_table() {
        let dir = tempdir().unwrap();
        let table_path = write_file(
            &dir,
            "table.csv",
            "carbon_count,boiling_point\n4,-0.5\n5,36.1\n",
        );
        let key_value = format!("boiling-point.reference-table={}", table_path.display());

        let config = resolve(&cli_with(&["-S", &key_value])).unwrap();
        assert_eq!(config.reference_table.points(), &[(4, -0.5), (5, 36.1)]);
    }

    #[test]
    fn invalid_reference_table_reports_file_parsing_error() {
        let dir = tempdir().unwrap();
        let table_path = write_file(&dir, "short.csv", "carbon_count,boiling_point\n1,-161.5\n");
        let key_value = format!("boiling-point.reference-table={}", table_path.display());

        let result = resolve(&cli_with(&["-S", &key_value]));
        assert!(matches!(result, Err(CliError::FileParsing { path, .. }) if path == table_path));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let config_path = write_file(&dir, "molprop.toml", "[tg-coefficients]\nimide = 1.0\n");

        let result = resolve(&cli_with(&["-c", config_path.to_str().unwrap()]));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let result = resolve(&cli_with(&["-c", missing.to_str().unwrap()]));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "tg-coefficients.base",
            "tg-coefficients.base=warm",
            "tg-coefficients.imide=1.0",
            "boiling-point.max-carbon=3",
        ] {
            let result = resolve(&cli_with(&["-S", bad]));
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "expected a configuration error for '{}'",
                bad
            );
        }
    }

    #[test]
    fn non_finite_coefficients_fail_validation() {
        let result = resolve(&cli_with(&["-S", "tg-coefficients.alcohol=inf"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("alcohol")));
    }
}
