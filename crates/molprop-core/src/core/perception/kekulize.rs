use super::valence::target_valence;
use super::{PerceptionError, atom_index};
use crate::core::models::atom::Atom;
use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use std::collections::{HashMap, HashSet};

type Options = HashMap<AtomId, Vec<(AtomId, BondId)>>;

/// Replaces every aromatic bond order with a Kekulé single or double bond.
///
/// Each aromatic atom that still has a free valence must receive exactly one
/// double bond, taken from its aromatic bonds to other such atoms. The search
/// is a backtracking perfect matching that always extends the atom with the
/// fewest remaining choices, run separately on every conjugated system.
///
/// Aromatic flags are left as written; [`super::aromaticity`] recomputes
/// them once rings are known.
pub fn kekulize(molecule: &mut Molecule) -> Result<(), PerceptionError> {
    let aromatic_bonds: Vec<BondId> = molecule
        .bonds_iter()
        .filter(|(_, bond)| bond.order == BondOrder::Aromatic)
        .map(|(id, _)| id)
        .collect();
    let pending: Vec<AtomId> = molecule
        .atoms_iter()
        .filter(|&(id, atom)| atom.is_aromatic && needs_double_bond(molecule, id, atom))
        .map(|(id, _)| id)
        .collect();
    if aromatic_bonds.is_empty() && pending.is_empty() {
        return Ok(());
    }

    let needing: HashSet<AtomId> = pending.iter().copied().collect();
    let mut options: Options = pending.iter().map(|&id| (id, Vec::new())).collect();
    for &bond_id in &aromatic_bonds {
        let Some(bond) = molecule.bond(bond_id) else {
            continue;
        };
        let (a, b) = (bond.atom1_id, bond.atom2_id);
        if needing.contains(&a) && needing.contains(&b) {
            options.entry(a).or_default().push((b, bond_id));
            options.entry(b).or_default().push((a, bond_id));
        }
    }

    let mut mate: HashMap<AtomId, BondId> = HashMap::new();
    for system in conjugated_systems(&pending, &options) {
        if !extend(&options, &mut mate, &system) {
            let culprit = system
                .iter()
                .copied()
                .find(|id| options.get(id).is_none_or(Vec::is_empty))
                .unwrap_or(system[0]);
            return Err(PerceptionError::Kekulize {
                index: atom_index(molecule, culprit),
                symbol: molecule.atom(culprit).map_or("*", Atom::symbol),
            });
        }
    }

    let doubles: HashSet<BondId> = mate.values().copied().collect();
    for bond_id in aromatic_bonds {
        if let Some(bond) = molecule.bond_mut(bond_id) {
            bond.order = if doubles.contains(&bond_id) {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
        }
    }
    Ok(())
}

/// Whether an aromatic atom has a free valence that must become a double bond.
fn needs_double_bond(molecule: &Molecule, atom_id: AtomId, atom: &Atom) -> bool {
    if atom.atomic_number() == 6 && atom.formal_charge < 0 {
        return false;
    }
    let used = molecule.explicit_valence(atom_id) + u32::from(atom.explicit_hydrogens);
    target_valence(atom.allowed_valences(), used).is_some_and(|target| target > used)
}

/// Groups atoms into connected components of the option graph, preserving
/// input order inside each component.
fn conjugated_systems(pending: &[AtomId], options: &Options) -> Vec<Vec<AtomId>> {
    let mut seen: HashSet<AtomId> = HashSet::new();
    let mut systems = Vec::new();
    for &start in pending {
        if !seen.insert(start) {
            continue;
        }
        let mut members = vec![start];
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for &(partner, _) in options.get(&current).into_iter().flatten() {
                if seen.insert(partner) {
                    members.push(partner);
                    stack.push(partner);
                }
            }
        }
        let order: HashSet<AtomId> = members.into_iter().collect();
        systems.push(pending.iter().copied().filter(|id| order.contains(id)).collect());
    }
    systems
}

fn extend(options: &Options, mate: &mut HashMap<AtomId, BondId>, system: &[AtomId]) -> bool {
    let free_partners = |atom: AtomId, mate: &HashMap<AtomId, BondId>| -> Vec<(AtomId, BondId)> {
        options
            .get(&atom)
            .into_iter()
            .flatten()
            .copied()
            .filter(|(partner, _)| !mate.contains_key(partner))
            .collect()
    };

    let next = system
        .iter()
        .copied()
        .filter(|id| !mate.contains_key(id))
        .min_by_key(|&id| free_partners(id, &*mate).len());
    let Some(atom) = next else {
        return true;
    };

    for (partner, bond_id) in free_partners(atom, &*mate) {
        mate.insert(atom, bond_id);
        mate.insert(partner, bond_id);
        if extend(options, mate, system) {
            return true;
        }
        mate.remove(&atom);
        mate.remove(&partner);
    }
    false
}
