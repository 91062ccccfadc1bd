use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use std::collections::HashSet;
use tracing::trace;

/// A ring or fused ring pair tested as one conjugated system.
#[derive(Debug, Clone)]
struct Circuit {
    atoms: HashSet<AtomId>,
    bonds: HashSet<BondId>,
}

/// Recomputes aromatic flags from the Kekulé structure and ring information.
///
/// Every SSSR ring, and every pair of SSSR rings sharing exactly one bond, is
/// tested against the Hückel 4n+2 rule. Atoms and bonds of each passing system
/// are flagged aromatic; bond orders are left in Kekulé form.
pub fn perceive(molecule: &mut Molecule) {
    for (_, atom) in molecule.atoms_iter_mut() {
        atom.is_aromatic = false;
    }
    for (_, bond) in molecule.bonds_iter_mut() {
        bond.is_aromatic = false;
    }

    let mut aromatic_atoms = HashSet::new();
    let mut aromatic_bonds = HashSet::new();
    for circuit in circuits(molecule) {
        if satisfies_huckel(molecule, &circuit) {
            aromatic_atoms.extend(circuit.atoms);
            aromatic_bonds.extend(circuit.bonds);
        }
    }
    trace!(
        atoms = aromatic_atoms.len(),
        bonds = aromatic_bonds.len(),
        "Perceived aromaticity"
    );

    for (id, atom) in molecule.atoms_iter_mut() {
        atom.is_aromatic = aromatic_atoms.contains(&id);
    }
    for (id, bond) in molecule.bonds_iter_mut() {
        bond.is_aromatic = aromatic_bonds.contains(&id);
    }
}

fn circuits(molecule: &Molecule) -> Vec<Circuit> {
    let rings: Vec<Circuit> = molecule
        .sssr()
        .iter()
        .map(|ring| {
            let bonds = ring
                .iter()
                .enumerate()
                .filter_map(|(i, &atom)| {
                    molecule.bond_between(atom, ring[(i + 1) % ring.len()])
                })
                .collect();
            Circuit {
                atoms: ring.iter().copied().collect(),
                bonds,
            }
        })
        .collect();

    let mut all = rings.clone();
    for (i, first) in rings.iter().enumerate() {
        for second in &rings[i + 1..] {
            if first.bonds.intersection(&second.bonds).count() == 1 {
                all.push(Circuit {
                    atoms: first.atoms.union(&second.atoms).copied().collect(),
                    bonds: first.bonds.union(&second.bonds).copied().collect(),
                });
            }
        }
    }
    all
}

fn satisfies_huckel(molecule: &Molecule, circuit: &Circuit) -> bool {
    let mut electrons = 0u32;
    for &atom_id in &circuit.atoms {
        match pi_electrons(molecule, atom_id, &circuit.atoms) {
            Some(count) => electrons += count,
            None => return false,
        }
    }
    electrons % 4 == 2
}

/// Electrons an atom contributes to a conjugated ring, or `None` when the
/// atom cannot take part in one (sp3 centres, triple bonds, exocyclic C=C).
fn pi_electrons(molecule: &Molecule, atom_id: AtomId, ring: &HashSet<AtomId>) -> Option<u32> {
    let atom = molecule.atom(atom_id)?;
    let mut exocyclic_double = None;
    for (partner, bond) in molecule.neighbors(atom_id) {
        match bond.order {
            BondOrder::Double if ring.contains(&partner) => return Some(1),
            BondOrder::Double => exocyclic_double = Some(partner),
            BondOrder::Triple | BondOrder::Quadruple => return None,
            _ => {}
        }
    }

    if let Some(partner) = exocyclic_double {
        let electronegative = molecule
            .atom(partner)
            .is_some_and(|p| matches!(p.atomic_number(), 7 | 8 | 16));
        return electronegative.then_some(0);
    }

    let connections = molecule.total_connections(atom_id);
    match (atom.atomic_number(), atom.formal_charge) {
        (6, -1) => Some(2),
        (6, 1) => Some(0),
        (7 | 15, 0) if connections == 3 => Some(2),
        (7 | 15, -1) => Some(2),
        (8 | 16 | 34 | 52, 0) if molecule.degree(atom_id) == 2 => Some(2),
        (5, 0) if connections == 3 => Some(0),
        _ => None,
    }
}
