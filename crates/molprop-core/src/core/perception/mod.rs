//! # Chemical Perception
//!
//! Turns a freshly parsed graph into a sanitized molecule:
//!
//! 1. [`kekulize`] assigns alternating single/double orders to aromatic bonds
//! 2. [`valence`] validates valences and assigns implicit hydrogens
//! 3. [`rings`] finds ring bonds and the smallest set of smallest rings
//! 4. [`aromaticity`] re-derives aromatic flags with the Hückel rule
//!
//! After sanitization every bond carries a Kekulé order, and aromatic bonds
//! are additionally flagged with [`Bond::is_aromatic`](crate::core::models::topology::Bond::is_aromatic).

use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use thiserror::Error;
use tracing::trace;

pub mod aromaticity;
pub mod kekulize;
pub mod rings;
pub mod valence;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PerceptionError {
    #[error("Explicit valence {valence} for atom #{index} {symbol} is greater than permitted")]
    Valence {
        index: usize,
        symbol: &'static str,
        valence: u32,
    },
    #[error("Can't kekulize the aromatic system containing atom #{index} {symbol}")]
    Kekulize { index: usize, symbol: &'static str },
}

/// Runs the full perception pipeline in place.
///
/// # Errors
///
/// Returns [`PerceptionError::Kekulize`] when aromatic atoms cannot be given
/// a valid alternating bond pattern and [`PerceptionError::Valence`] when an
/// atom has more bonds than any of its permitted valences allow.
pub fn sanitize(molecule: &mut Molecule) -> Result<(), PerceptionError> {
    kekulize::kekulize(molecule)?;
    valence::assign_implicit_hydrogens(molecule)?;
    let rings = rings::perceive(molecule);
    trace!(
        rings = rings.sssr.len(),
        ring_bonds = rings.ring_bonds.len(),
        "Perceived rings"
    );
    molecule.set_ring_info(rings);
    aromaticity::perceive(molecule);
    Ok(())
}

/// Zero-based position of an atom in input order, used in error messages.
pub(crate) fn atom_index(molecule: &Molecule, atom_id: AtomId) -> usize {
    molecule
        .atom_ids()
        .position(|id| id == atom_id)
        .unwrap_or_default()
}
