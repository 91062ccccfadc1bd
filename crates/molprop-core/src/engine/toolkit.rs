use crate::core::descriptors::{self, DescriptorVector};
use crate::core::io::{ReadError, smiles};
use crate::core::models::molecule::Molecule;

/// Turns structure notation into descriptors.
///
/// Parsing is the only fallible step: once a structure exists its
/// descriptors can always be computed.
pub trait StructureToolkit {
    /// The parsed, sanitized structure.
    type Structure;

    /// The error returned for notation that cannot be parsed.
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse(&self, notation: &str) -> Result<Self::Structure, Self::Error>;

    fn describe(&self, structure: &Self::Structure) -> DescriptorVector;
}

/// The built-in SMILES reader and descriptor calculators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmilesToolkit;

impl StructureToolkit for SmilesToolkit {
    type Structure = Molecule;
    type Error = ReadError;

    fn parse(&self, notation: &str) -> Result<Molecule, ReadError> {
        smiles::read(notation)
    }

    fn describe(&self, structure: &Molecule) -> DescriptorVector {
        descriptors::compute(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::perception::PerceptionError;

    #[test]
    fn smiles_toolkit_parses_and_describes() {
        let toolkit = SmilesToolkit;
        let molecule = toolkit.parse("C=CC(=O)N").unwrap();
        let descriptors = toolkit.describe(&molecule);
        assert_eq!(descriptors.amide_groups, 1);
        assert_eq!(descriptors.h_donors, 1);
    }

    #[test]
    fn smiles_toolkit_distinguishes_syntax_and_chemistry_errors() {
        let toolkit = SmilesToolkit;
        assert!(matches!(toolkit.parse("C1CC"), Err(ReadError::Smiles(_))));
        assert!(matches!(
            toolkit.parse("C(C)(C)(C)(C)C"),
            Err(ReadError::Perception(PerceptionError::Valence { .. }))
        ));
    }
}
