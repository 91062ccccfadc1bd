use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The order of a bond between two atoms.
///
/// `Aromatic` only appears between parsing and kekulization; a sanitized
/// molecule stores its Kekulé orders and marks aromaticity on the bond itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Valence contributed to each end of the bond. Aromatic bonds count as
    /// single until a Kekulé structure has been assigned.
    pub fn valence(self) -> u8 {
        match self {
            Self::Single | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "4" | "q" | "quadruple" => Ok(Self::Quadruple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Quadruple => "Quadruple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
    pub is_aromatic: bool,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
            is_aromatic: order == BondOrder::Aromatic,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the atom at the other end of the bond, if `atom_id` is one of its ends.
    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }

    /// A non-aromatic single bond (SMARTS `-`).
    pub fn is_single(&self) -> bool {
        self.order == BondOrder::Single && !self.is_aromatic
    }

    /// A non-aromatic double bond (SMARTS `=`).
    pub fn is_double(&self) -> bool {
        self.order == BondOrder::Double && !self.is_aromatic
    }

    /// A single or aromatic bond (the SMARTS default bond).
    pub fn is_single_or_aromatic(&self) -> bool {
        self.is_single() || self.is_aromatic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("S".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("double".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("T".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("4".parse::<BondOrder>().unwrap(), BondOrder::Quadruple);
        assert_eq!("ar".parse::<BondOrder>().unwrap(), BondOrder::Aromatic);
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quintuple".parse::<BondOrder>().is_err());
        assert!("0".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_display_outputs_expected_strings() {
        assert_eq!(BondOrder::Single.to_string(), "Single");
        assert_eq!(BondOrder::Aromatic.to_string(), "Aromatic");
    }

    #[test]
    fn aromatic_bonds_count_as_single_valence() {
        assert_eq!(BondOrder::Aromatic.valence(), 1);
        assert_eq!(BondOrder::Double.valence(), 2);
        assert_eq!(BondOrder::Quadruple.valence(), 4);
    }

    #[test]
    fn new_aromatic_bond_is_flagged_aromatic() {
        let bond = Bond::new(dummy_atom_id(1), dummy_atom_id(2), BondOrder::Aromatic);
        assert!(bond.is_aromatic);
        assert!(!bond.is_single());
        assert!(bond.is_single_or_aromatic());
    }

    #[test]
    fn partner_returns_opposite_end() {
        let a1 = dummy_atom_id(10);
        let a2 = dummy_atom_id(20);
        let bond = Bond::new(a1, a2, BondOrder::Double);
        assert_eq!(bond.partner(a1), Some(a2));
        assert_eq!(bond.partner(a2), Some(a1));
        assert_eq!(bond.partner(dummy_atom_id(30)), None);
        assert!(bond.is_double());
    }

    #[test]
    fn bond_contains_returns_false_for_unrelated_atom() {
        let bond = Bond::new(dummy_atom_id(100), dummy_atom_id(200), BondOrder::Single);
        assert!(bond.contains(dummy_atom_id(100)));
        assert!(!bond.contains(dummy_atom_id(300)));
    }
}
