use crate::core::descriptors::DescriptorVector;
use crate::engine::config::TgCoefficients;
use crate::engine::error::EngineError;
use crate::engine::scoring;
use crate::engine::toolkit::{SmilesToolkit, StructureToolkit};
use tracing::{debug, instrument};

pub const KELVIN_OFFSET: f64 = 273.15;

/// Common vinyl monomers with their SMILES.
pub const DEMONSTRATION_MONOMERS: [(&str, &str); 4] = [
    ("Styrene", "C=CC1=CC=CC=C1"),
    ("Methyl methacrylate", "C=C(C)C(=O)OC"),
    ("Vinyl alcohol", "C=CO"),
    ("Acrylamide", "C=CC(=O)N"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TgPrediction {
    /// Estimated glass-transition temperature in Kelvin, never negative.
    pub kelvin: f64,
    /// The descriptors the estimate was computed from.
    pub descriptors: DescriptorVector,
}

impl TgPrediction {
    pub fn celsius(&self) -> f64 {
        self.kelvin - KELVIN_OFFSET
    }
}

/// Estimates the glass-transition temperature of the homopolymer of a
/// monomer from additive structural contributions.
///
/// The estimate is a coarse screening heuristic, not a validated model.
#[derive(Debug, Clone)]
pub struct TgEstimator<T: StructureToolkit = SmilesToolkit> {
    toolkit: T,
    coefficients: TgCoefficients,
}

impl Default for TgEstimator<SmilesToolkit> {
    fn default() -> Self {
        Self::new(TgCoefficients::default())
    }
}

impl TgEstimator<SmilesToolkit> {
    pub fn new(coefficients: TgCoefficients) -> Self {
        Self::with_toolkit(SmilesToolkit, coefficients)
    }
}

impl<T: StructureToolkit> TgEstimator<T> {
    pub fn with_toolkit(toolkit: T, coefficients: TgCoefficients) -> Self {
        Self {
            toolkit,
            coefficients,
        }
    }

    pub fn coefficients(&self) -> &TgCoefficients {
        &self.coefficients
    }

    /// Estimates Tg for a monomer given in structure notation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidStructure`] when the notation cannot be
    /// parsed into a valid structure. No estimate is produced in that case.
    #[instrument(skip(self), name = "tg_prediction")]
    pub fn predict(&self, notation: &str) -> Result<TgPrediction, EngineError> {
        let structure = self.toolkit.parse(notation).map_err(|e| {
            debug!(error = %e, "Rejected structure notation");
            EngineError::InvalidStructure {
                notation: notation.to_string(),
                source: Box::new(e),
            }
        })?;

        let descriptors = self.toolkit.describe(&structure);
        let kelvin = scoring::score(&descriptors, &self.coefficients);
        debug!(?descriptors, kelvin, "Estimated glass-transition temperature");
        Ok(TgPrediction {
            kelvin,
            descriptors,
        })
    }
}

/// Estimates Tg with the SMILES toolkit and default coefficients.
pub fn predict(notation: &str) -> Result<TgPrediction, EngineError> {
    TgEstimator::default().predict(notation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Unparseable;

    impl fmt::Display for Unparseable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "unparseable")
        }
    }

    impl std::error::Error for Unparseable {}

    /// Treats the notation as a number of aromatic rings.
    struct RingCountToolkit;

    impl StructureToolkit for RingCountToolkit {
        type Structure = u32;
        type Error = Unparseable;

        fn parse(&self, notation: &str) -> Result<u32, Unparseable> {
            notation.parse().map_err(|_| Unparseable)
        }

        fn describe(&self, rings: &u32) -> DescriptorVector {
            DescriptorVector {
                aromatic_rings: *rings,
                ..DescriptorVector::default()
            }
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn demonstration_monomers_match_hand_computed_values() {
        let expected = [183.4152, 188.0117, 194.4053, 215.1079];
        for ((name, smiles), kelvin) in DEMONSTRATION_MONOMERS.iter().zip(expected) {
            let prediction = predict(smiles).unwrap();
            assert!(
                (prediction.kelvin - kelvin).abs() < 1e-9,
                "{name}: {}",
                prediction.kelvin
            );
        }
    }

    #[test]
    fn celsius_is_kelvin_minus_offset() {
        let prediction = predict("C=CO").unwrap();
        assert_close(prediction.celsius(), 194.4053 - 273.15);
    }

    #[test]
    fn prediction_carries_its_descriptors() {
        let prediction = predict("C=C(C)C(=O)OC").unwrap();
        assert_eq!(prediction.descriptors.ester_groups, 1);
        assert_eq!(prediction.descriptors.ether_groups, 1);
        assert_eq!(prediction.descriptors.h_acceptors, 2);
    }

    #[test]
    fn invalid_notation_is_an_error_not_a_number() {
        for notation in ["C1CC", "", "   ", "C(", "Xx", "C=C=C=C(C)(C)C"] {
            match predict(notation) {
                Err(EngineError::InvalidStructure { notation: n, .. }) => assert_eq!(n, notation),
                other => panic!("{notation:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn heavy_metal_acrylate_salts_are_estimated() {
        for (notation, weight) in [
            ("[Cs+].[O-]C(=O)C=C", 203.960),
            ("C=CC(=O)O[Pb]", 278.255),
            ("[Ba+2].[O-]C(=O)C=C.[O-]C(=O)C=C", 279.437),
        ] {
            let prediction = predict(notation).unwrap();
            assert_close(prediction.descriptors.molecular_weight, weight);
            assert!(prediction.kelvin.is_finite() && prediction.kelvin > 0.0, "{notation}");
            assert_eq!(prediction.descriptors.ester_groups, 0, "{notation}");
        }
    }

    #[test]
    fn oversized_hydrogen_counts_are_invalid_structures() {
        for notation in ["[CH255][H]", "[CH252](C)(C)(C)(C)"] {
            assert!(
                matches!(predict(notation), Err(EngineError::InvalidStructure { .. })),
                "{notation}"
            );
        }
    }

    #[test]
    fn custom_coefficients_change_the_estimate() {
        let coefficients = TgCoefficients {
            alcohol: 0.0,
            ..TgCoefficients::default()
        };
        let estimator = TgEstimator::new(coefficients);
        assert_close(estimator.predict("C=CO").unwrap().kelvin, 194.4053 - 25.0);
        assert_eq!(estimator.coefficients().alcohol, 0.0);
    }

    #[test]
    fn each_aromatic_ring_adds_thirty_kelvin_through_any_toolkit() {
        let estimator = TgEstimator::with_toolkit(RingCountToolkit, TgCoefficients::default());
        let zero = estimator.predict("0").unwrap().kelvin;
        let one = estimator.predict("1").unwrap().kelvin;
        let two = estimator.predict("2").unwrap().kelvin;
        assert_close(zero, 150.0);
        assert_close(one - zero, 30.0);
        assert_close(two - one, 30.0);
    }

    #[test]
    fn toolkit_errors_become_invalid_structure() {
        let estimator = TgEstimator::with_toolkit(RingCountToolkit, TgCoefficients::default());
        let err = estimator.predict("benzene").unwrap_err();
        assert!(matches!(err, EngineError::InvalidStructure { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid structure notation 'benzene': unparseable"
        );
    }

    #[test]
    fn negative_sums_are_clamped_to_zero() {
        let coefficients = TgCoefficients {
            base: -500.0,
            ..TgCoefficients::default()
        };
        let estimator = TgEstimator::with_toolkit(RingCountToolkit, coefficients);
        assert_eq!(estimator.predict("1").unwrap().kelvin, 0.0);
    }
}
