use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Normal boiling points (°C) of the n-alkanes methane through decane.
pub const ALKANE_BOILING_POINTS: [(u32, f64); 10] = [
    (1, -161.5),
    (2, -88.6),
    (3, -42.1),
    (4, -0.5),
    (5, 36.1),
    (6, 68.7),
    (7, 98.4),
    (8, 125.7),
    (9, 150.8),
    (10, 174.0),
];

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Reference table needs at least two points, found {0}")]
    TooFewPoints(usize),
    #[error("Reference table carbon counts must be strictly ascending (row {row}: {carbon_count})")]
    UnorderedCarbonCount { row: usize, carbon_count: u32 },
    #[error("Reference table has a non-finite boiling point at row {0}")]
    NonFiniteBoilingPoint(usize),
    #[error("Tg coefficient '{0}' must be a finite number")]
    NonFiniteCoefficient(&'static str),
    #[error("Unknown Tg coefficient '{0}'")]
    UnknownCoefficient(String),
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid data in '{path}': {source}")]
    Invalid { path: String, source: ConfigError },
}

/// Known (carbon count, boiling point in °C) pairs used to fit the
/// boiling-point line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    points: Vec<(u32, f64)>,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    carbon_count: u32,
    boiling_point: f64,
}

impl ReferenceTable {
    /// The built-in n-alkane table, C1 through C10.
    pub fn alkanes() -> Self {
        Self {
            points: ALKANE_BOILING_POINTS.to_vec(),
        }
    }

    /// Creates a table from `(carbon_count, boiling_point)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if fewer than two points are given, carbon
    /// counts are not strictly ascending, or a boiling point is not finite.
    pub fn new(points: Vec<(u32, f64)>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::TooFewPoints(points.len()));
        }
        for (row, window) in points.windows(2).enumerate() {
            if window[1].0 <= window[0].0 {
                return Err(ConfigError::UnorderedCarbonCount {
                    row: row + 1,
                    carbon_count: window[1].0,
                });
            }
        }
        if let Some(row) = points.iter().position(|(_, bp)| !bp.is_finite()) {
            return Err(ConfigError::NonFiniteBoilingPoint(row));
        }
        Ok(Self { points })
    }

    /// Loads a table from a CSV file with a `carbon_count,boiling_point` header.
    pub fn load_csv(path: &Path) -> Result<Self, ConfigLoadError> {
        let path_str = || path.to_string_lossy().to_string();
        let file = File::open(path).map_err(|e| ConfigLoadError::Io {
            path: path_str(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut points = Vec::new();
        for result in reader.deserialize::<ReferenceRow>() {
            let row = result.map_err(|e| ConfigLoadError::Csv {
                path: path_str(),
                source: e,
            })?;
            points.push((row.carbon_count, row.boiling_point));
        }
        Self::new(points).map_err(|e| ConfigLoadError::Invalid {
            path: path_str(),
            source: e,
        })
    }

    pub fn points(&self) -> &[(u32, f64)] {
        &self.points
    }

    /// Whether carbon counts form an unbroken run such as 1..=10.
    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[1].0 == w[0].0 + 1)
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::alkanes()
    }
}

/// Weights of the additive glass-transition formula.
///
/// `Tg = base + molecular_weight*MW + rotatable_bond*RB
///      + hydrogen_bond*(HBD + acceptor_share*HBA) + aromatic_ring*AR
///      + amide*N_amide + ester*N_ester + ether*N_ether + alcohol*N_alcohol`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct TgCoefficients {
    pub base: f64,
    pub molecular_weight: f64,
    pub rotatable_bond: f64,
    pub hydrogen_bond: f64,
    pub acceptor_share: f64,
    pub aromatic_ring: f64,
    pub amide: f64,
    pub ester: f64,
    pub ether: f64,
    pub alcohol: f64,
}

impl Default for TgCoefficients {
    fn default() -> Self {
        Self {
            base: 150.0,
            molecular_weight: 0.1,
            rotatable_bond: -7.0,
            hydrogen_bond: 10.0,
            acceptor_share: 0.5,
            aromatic_ring: 30.0,
            amide: 50.0,
            ester: 20.0,
            ether: 5.0,
            alcohol: 25.0,
        }
    }
}

impl TgCoefficients {
    /// Configuration keys paired with their current values.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("base", self.base),
            ("molecular-weight", self.molecular_weight),
            ("rotatable-bond", self.rotatable_bond),
            ("hydrogen-bond", self.hydrogen_bond),
            ("acceptor-share", self.acceptor_share),
            ("aromatic-ring", self.aromatic_ring),
            ("amide", self.amide),
            ("ester", self.ester),
            ("ether", self.ether),
            ("alcohol", self.alcohol),
        ]
    }

    /// Overrides a single coefficient by its kebab-case key.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), ConfigError> {
        let slot = match key {
            "base" => &mut self.base,
            "molecular-weight" => &mut self.molecular_weight,
            "rotatable-bond" => &mut self.rotatable_bond,
            "hydrogen-bond" => &mut self.hydrogen_bond,
            "acceptor-share" => &mut self.acceptor_share,
            "aromatic-ring" => &mut self.aromatic_ring,
            "amide" => &mut self.amide,
            "ester" => &mut self.ester,
            "ether" => &mut self.ether,
            "alcohol" => &mut self.alcohol,
            other => return Err(ConfigError::UnknownCoefficient(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.entries().into_iter().find(|(_, value)| !value.is_finite()) {
            Some((key, _)) => Err(ConfigError::NonFiniteCoefficient(key)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelConfig {
    pub reference_table: ReferenceTable,
    pub tg_coefficients: TgCoefficients,
}

#[derive(Default)]
pub struct ModelConfigBuilder {
    reference_table: Option<ReferenceTable>,
    tg_coefficients: Option<TgCoefficients>,
}

impl ModelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference_table(mut self, table: ReferenceTable) -> Self {
        self.reference_table = Some(table);
        self
    }
    pub fn tg_coefficients(mut self, coefficients: TgCoefficients) -> Self {
        self.tg_coefficients = Some(coefficients);
        self
    }

    /// Builds the configuration, falling back to the built-in table and
    /// default coefficients for anything not set.
    pub fn build(self) -> Result<ModelConfig, ConfigError> {
        let tg_coefficients = self.tg_coefficients.unwrap_or_default();
        tg_coefficients.validate()?;
        Ok(ModelConfig {
            reference_table: self.reference_table.unwrap_or_default(),
            tg_coefficients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn alkane_table_is_contiguous_and_ascending() {
        let table = ReferenceTable::alkanes();
        assert_eq!(table.points().len(), 10);
        assert_eq!(table.points()[0], (1, -161.5));
        assert_eq!(table.points()[9], (10, 174.0));
        assert!(table.is_contiguous());
        assert_eq!(ReferenceTable::new(table.points().to_vec()), Ok(table));
    }

    #[test]
    fn new_rejects_short_or_unordered_tables() {
        assert_eq!(
            ReferenceTable::new(vec![(1, -161.5)]),
            Err(ConfigError::TooFewPoints(1))
        );
        assert_eq!(
            ReferenceTable::new(vec![(2, -88.6), (2, -88.0)]),
            Err(ConfigError::UnorderedCarbonCount {
                row: 1,
                carbon_count: 2
            })
        );
        assert_eq!(
            ReferenceTable::new(vec![(1, -161.5), (3, f64::NAN)]),
            Err(ConfigError::NonFiniteBoilingPoint(1))
        );
    }

    #[test]
    fn gapped_table_is_valid_but_not_contiguous() {
        let table = ReferenceTable::new(vec![(1, -161.5), (4, -0.5), (8, 125.7)]).unwrap();
        assert!(!table.is_contiguous());
    }

    #[test]
    fn load_csv_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alkanes.csv");
        fs::write(&path, "carbon_count,boiling_point\n1,-161.5\n2,-88.6\n3,-42.1\n").unwrap();

        let table = ReferenceTable::load_csv(&path).unwrap();
        assert_eq!(table.points(), &[(1, -161.5), (2, -88.6), (3, -42.1)]);
    }

    #[test]
    fn load_csv_reports_missing_malformed_and_invalid_files() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            ReferenceTable::load_csv(&missing),
            Err(ConfigLoadError::Io { .. })
        ));

        let malformed = dir.path().join("malformed.csv");
        fs::write(&malformed, "carbon_count,boiling_point\none,-161.5\n").unwrap();
        assert!(matches!(
            ReferenceTable::load_csv(&malformed),
            Err(ConfigLoadError::Csv { .. })
        ));

        let short = dir.path().join("short.csv");
        fs::write(&short, "carbon_count,boiling_point\n1,-161.5\n").unwrap();
        assert!(matches!(
            ReferenceTable::load_csv(&short),
            Err(ConfigLoadError::Invalid {
                source: ConfigError::TooFewPoints(1),
                ..
            })
        ));
    }

    #[test]
    fn coefficients_deserialize_from_partial_toml() {
        let coefficients: TgCoefficients =
            toml::from_str("base = 100.0\naromatic-ring = 40.0").unwrap();
        assert_eq!(coefficients.base, 100.0);
        assert_eq!(coefficients.aromatic_ring, 40.0);
        assert_eq!(coefficients.amide, 50.0);
    }

    #[test]
    fn coefficients_reject_unknown_keys() {
        assert!(toml::from_str::<TgCoefficients>("imide = 1.0").is_err());
    }

    #[test]
    fn set_overrides_known_keys_only() {
        let mut coefficients = TgCoefficients::default();
        coefficients.set("rotatable-bond", -5.0).unwrap();
        assert_eq!(coefficients.rotatable_bond, -5.0);
        assert_eq!(
            coefficients.set("rotatable_bond", 1.0),
            Err(ConfigError::UnknownCoefficient("rotatable_bond".into()))
        );
    }

    #[test]
    fn builder_defaults_to_built_in_values() {
        let config = ModelConfigBuilder::new().build().unwrap();
        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.tg_coefficients.base, 150.0);
    }

    #[test]
    fn builder_rejects_non_finite_coefficients() {
        let coefficients = TgCoefficients {
            ether: f64::INFINITY,
            ..TgCoefficients::default()
        };
        let result = ModelConfigBuilder::new()
            .tg_coefficients(coefficients)
            .build();
        assert_eq!(result, Err(ConfigError::NonFiniteCoefficient("ether")));
    }
}
