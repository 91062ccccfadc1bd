use crate::core::utils::elements::{self, ElementData};

/// Tetrahedral chirality as written in the input notation.
///
/// Chirality does not influence any descriptor; it is kept so that the
/// parsed structure reflects its input faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    #[default]
    Unspecified,
    /// `@`: counter-clockwise.
    CounterClockwise,
    /// `@@`: clockwise.
    Clockwise,
    /// Any extended class (`@TH1`, `@SP2`, `@OH12`, ...).
    Other,
}

/// Represents an atom of a parsed molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Static element data (symbol, atomic number, weight, valences).
    pub element: &'static ElementData,
    /// Mass number when an isotope was written (e.g., 13 for `[13C]`).
    pub isotope: Option<u16>,
    /// The formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Hydrogens written explicitly, either in brackets or as folded `[H]` atoms.
    pub explicit_hydrogens: u8,
    /// Hydrogens derived from the default valence of organic-subset atoms.
    pub implicit_hydrogens: u8,
    /// Bracket atoms never receive implicit hydrogens.
    pub no_implicit: bool,
    /// Whether the atom is part of an aromatic system.
    pub is_aromatic: bool,
    pub chirality: Chirality,
    /// Atom class from `[C:1]`-style annotations.
    pub atom_class: Option<u32>,
}

impl Atom {
    /// Creates a neutral, non-aromatic atom of the given element.
    ///
    /// # Arguments
    ///
    /// * `element` - The element data for the atom.
    pub fn new(element: &'static ElementData) -> Self {
        Self {
            element,
            isotope: None,
            formal_charge: 0,
            explicit_hydrogens: 0,
            implicit_hydrogens: 0,
            no_implicit: false,
            is_aromatic: false,
            chirality: Chirality::default(),
            atom_class: None,
        }
    }

    /// Creates an atom from an element symbol.
    ///
    /// # Return
    ///
    /// Returns `None` if the symbol is not a known element.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        elements::by_symbol(symbol).map(Self::new)
    }

    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol
    }

    /// Total attached hydrogens (explicit plus implicit), SMARTS `H`.
    pub fn total_hydrogens(&self) -> u32 {
        u32::from(self.explicit_hydrogens) + u32::from(self.implicit_hydrogens)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.atomic_number == 1
    }

    /// Permitted valences for this atom given its formal charge.
    pub fn allowed_valences(&self) -> &'static [u8] {
        elements::valences_for(self.element.atomic_number, self.formal_charge)
    }

    /// Matches a SMARTS aliphatic element primitive such as `C` or `O`.
    pub fn is_aliphatic(&self, atomic_number: u8) -> bool {
        !self.is_aromatic && self.element.atomic_number == atomic_number
    }

    /// Matches a SMARTS aromatic element primitive such as `c` or `n`.
    pub fn is_aromatic_element(&self, atomic_number: u8) -> bool {
        self.is_aromatic && self.element.atomic_number == atomic_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::from_symbol("C").unwrap();

        assert_eq!(atom.symbol(), "C");
        assert_eq!(atom.atomic_number(), 6);
        assert_eq!(atom.isotope, None);
        assert_eq!(atom.formal_charge, 0);
        assert_eq!(atom.total_hydrogens(), 0);
        assert!(!atom.no_implicit);
        assert!(!atom.is_aromatic);
        assert_eq!(atom.chirality, Chirality::Unspecified);
    }

    #[test]
    fn from_symbol_returns_none_for_unknown_element() {
        assert!(Atom::from_symbol("Qq").is_none());
        assert!(Atom::from_symbol("c").is_none());
    }

    #[test]
    fn total_hydrogens_sums_explicit_and_implicit() {
        let mut atom = Atom::from_symbol("N").unwrap();
        atom.explicit_hydrogens = 1;
        atom.implicit_hydrogens = 2;
        assert_eq!(atom.total_hydrogens(), 3);
    }

    #[test]
    fn aliphatic_and_aromatic_primitives_respect_flag() {
        let mut atom = Atom::from_symbol("N").unwrap();
        assert!(atom.is_aliphatic(7));
        assert!(!atom.is_aromatic_element(7));

        atom.is_aromatic = true;
        assert!(!atom.is_aliphatic(7));
        assert!(atom.is_aromatic_element(7));
        assert!(!atom.is_aromatic_element(6));
    }

    #[test]
    fn charged_atom_reports_shifted_valences() {
        let mut atom = Atom::from_symbol("N").unwrap();
        atom.formal_charge = 1;
        assert_eq!(atom.allowed_valences(), &[4]);
    }
}
