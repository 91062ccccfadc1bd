use super::atom::Atom;
use super::ids::{AtomId, BondId};
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MoleculeError {
    #[error("Atom not found in molecule")]
    AtomNotFound,
    #[error("An atom cannot be bonded to itself")]
    SelfBond,
    #[error("The atoms are already bonded")]
    DuplicateBond,
}

/// Ring perception results attached to a sanitized molecule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingInfo {
    /// Smallest set of smallest rings, each listed in ring order.
    pub sssr: Vec<Vec<AtomId>>,
    /// Bonds that lie on at least one cycle.
    pub ring_bonds: HashSet<BondId>,
}

/// A molecular graph of atoms connected by bonds.
///
/// Atoms keep their insertion order, which for parsed molecules is the order
/// in which they were written. Ring information is empty until the molecule
/// has been sanitized by [`crate::core::perception::sanitize`].
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for bonds.
    bonds: SlotMap<BondId, Bond>,
    /// Bonds incident to each atom.
    adjacency: SecondaryMap<AtomId, Vec<BondId>>,
    rings: RingInfo,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Connects two atoms.
    ///
    /// # Errors
    ///
    /// Returns an error if either atom is missing, the atoms are identical,
    /// or a bond between them already exists.
    pub fn add_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<BondId, MoleculeError> {
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return Err(MoleculeError::AtomNotFound);
        }
        if atom1_id == atom2_id {
            return Err(MoleculeError::SelfBond);
        }
        if self.bond_between(atom1_id, atom2_id).is_some() {
            return Err(MoleculeError::DuplicateBond);
        }

        let bond_id = self.bonds.insert(Bond::new(atom1_id, atom2_id, order));
        self.adjacency[atom1_id].push(bond_id);
        self.adjacency[atom2_id].push(bond_id);
        Ok(bond_id)
    }

    /// Removes an atom together with all of its bonds.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;
        let incident = self.adjacency.remove(atom_id).unwrap_or_default();
        for bond_id in incident {
            if let Some(bond) = self.bonds.remove(bond_id) {
                if let Some(other) = bond.partner(atom_id) {
                    if let Some(list) = self.adjacency.get_mut(other) {
                        list.retain(|&b| b != bond_id);
                    }
                }
            }
        }
        Some(atom)
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    pub fn atom_ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.keys()
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(id)
    }

    pub fn bond_mut(&mut self, id: BondId) -> Option<&mut Bond> {
        self.bonds.get_mut(id)
    }

    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter()
    }

    pub fn bonds_iter_mut(&mut self) -> impl Iterator<Item = (BondId, &mut Bond)> {
        self.bonds.iter_mut()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Bonds incident to an atom, in the order they were created.
    pub fn bonds_of(&self, atom_id: AtomId) -> &[BondId] {
        self.adjacency
            .get(atom_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bond_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<BondId> {
        self.bonds_of(atom1_id)
            .iter()
            .copied()
            .find(|&bond_id| self.bonds[bond_id].contains(atom2_id))
    }

    /// Iterates over `(neighbor, bond)` pairs of an atom.
    pub fn neighbors(&self, atom_id: AtomId) -> impl Iterator<Item = (AtomId, &Bond)> + '_ {
        self.bonds_of(atom_id).iter().filter_map(move |&bond_id| {
            let bond = self.bonds.get(bond_id)?;
            bond.partner(atom_id).map(|other| (other, bond))
        })
    }

    /// Number of explicit connections, SMARTS `D`.
    pub fn degree(&self, atom_id: AtomId) -> usize {
        self.bonds_of(atom_id).len()
    }

    /// Sum of bond valences without hydrogens.
    pub fn explicit_valence(&self, atom_id: AtomId) -> u32 {
        self.neighbors(atom_id)
            .map(|(_, bond)| u32::from(bond.order.valence()))
            .sum()
    }

    /// Total valence including hydrogens, SMARTS `v`.
    pub fn total_valence(&self, atom_id: AtomId) -> u32 {
        let hydrogens = self.atoms.get(atom_id).map_or(0, Atom::total_hydrogens);
        self.explicit_valence(atom_id) + hydrogens
    }

    /// Total connections including hydrogens, SMARTS `X`.
    pub fn total_connections(&self, atom_id: AtomId) -> usize {
        let hydrogens = self.atoms.get(atom_id).map_or(0, Atom::total_hydrogens);
        self.degree(atom_id) + hydrogens as usize
    }

    pub fn is_ring_bond(&self, bond_id: BondId) -> bool {
        self.rings.ring_bonds.contains(&bond_id)
    }

    pub fn is_ring_atom(&self, atom_id: AtomId) -> bool {
        self.bonds_of(atom_id)
            .iter()
            .any(|bond_id| self.rings.ring_bonds.contains(bond_id))
    }

    /// The smallest set of smallest rings.
    pub fn sssr(&self) -> &[Vec<AtomId>] {
        &self.rings.sssr
    }

    pub fn ring_info(&self) -> &RingInfo {
        &self.rings
    }

    pub(crate) fn set_ring_info(&mut self, rings: RingInfo) {
        self.rings = rings;
    }
}
