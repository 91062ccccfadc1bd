//! # Molecular Descriptors
//!
//! Counting descriptors over a sanitized [`Molecule`]. All counts follow the
//! conventions of common cheminformatics toolkits so results can be checked
//! against them directly.

use crate::core::models::molecule::Molecule;

pub mod fragments;
pub mod lipinski;
pub mod weight;

/// The descriptors consumed by the Tg scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DescriptorVector {
    /// Average molecular weight in g/mol, hydrogens included.
    pub molecular_weight: f64,
    pub rotatable_bonds: u32,
    pub h_donors: u32,
    pub h_acceptors: u32,
    /// SSSR rings in which every atom is aromatic.
    pub aromatic_rings: u32,
    pub amide_groups: u32,
    pub ester_groups: u32,
    pub ether_groups: u32,
    pub alcohol_groups: u32,
}

/// Computes every descriptor of a sanitized molecule.
pub fn compute(molecule: &Molecule) -> DescriptorVector {
    DescriptorVector {
        molecular_weight: weight::molecular_weight(molecule),
        rotatable_bonds: lipinski::rotatable_bonds(molecule),
        h_donors: lipinski::h_donors(molecule),
        h_acceptors: lipinski::h_acceptors(molecule),
        aromatic_rings: aromatic_rings(molecule),
        amide_groups: fragments::amides(molecule),
        ester_groups: fragments::esters(molecule),
        ether_groups: fragments::ethers(molecule),
        alcohol_groups: fragments::alcohols(molecule),
    }
}

pub fn aromatic_rings(molecule: &Molecule) -> u32 {
    molecule
        .sssr()
        .iter()
        .filter(|ring| {
            ring.iter()
                .all(|&id| molecule.atom(id).is_some_and(|atom| atom.is_aromatic))
        })
        .count() as u32
}
