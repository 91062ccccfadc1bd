//! Rotatable bonds and hydrogen-bond donor/acceptor counts.

use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::{Bond, BondOrder};

const CARBON: u8 = 6;
const NITROGEN: u8 = 7;
const OXYGEN: u8 = 8;
const PHOSPHORUS: u8 = 15;
const SULFUR: u8 = 16;
const HALOGENS: [u8; 3] = [9, 17, 35];
/// Double-bond partners that make a neighbor carbonyl-like.
const ACID_PARTNERS: [u8; 4] = [OXYGEN, NITROGEN, PHOSPHORUS, SULFUR];

/// Acyclic, non-aromatic single bond.
fn is_chain_single(molecule: &Molecule, bond: &Bond) -> bool {
    bond.is_single() && !is_ring(molecule, bond)
}

fn is_ring(molecule: &Molecule, bond: &Bond) -> bool {
    molecule
        .bond_between(bond.atom1_id, bond.atom2_id)
        .is_some_and(|id| molecule.is_ring_bond(id))
}

fn is_aliphatic_any(atom: &Atom, elements: &[u8]) -> bool {
    !atom.is_aromatic && elements.contains(&atom.atomic_number())
}

fn has_triple_bond(molecule: &Molecule, id: AtomId) -> bool {
    molecule
        .neighbors(id)
        .any(|(_, bond)| bond.order == BondOrder::Triple && !bond.is_aromatic)
}

/// `C(X)(X)X` for a single halogen X.
fn is_trihalomethyl(molecule: &Molecule, id: AtomId) -> bool {
    let Some(center) = molecule.atom(id) else {
        return false;
    };
    if !center.is_aliphatic(CARBON) {
        return false;
    }
    HALOGENS.iter().any(|&halogen| {
        molecule
            .neighbors(id)
            .filter(|(n, bond)| {
                bond.is_single_or_aromatic()
                    && molecule.atom(*n).is_some_and(|a| a.is_aliphatic(halogen))
            })
            .count()
            >= 3
    })
}

/// `C([CH3])([CH3])[CH3]`.
fn is_tert_butyl(molecule: &Molecule, id: AtomId) -> bool {
    let Some(center) = molecule.atom(id) else {
        return false;
    };
    if !center.is_aliphatic(CARBON) {
        return false;
    }
    molecule
        .neighbors(id)
        .filter(|(n, bond)| {
            bond.is_single_or_aromatic()
                && molecule.atom(*n)
                    .is_some_and(|a| a.is_aliphatic(CARBON) && a.total_hydrogens() == 3)
        })
        .count()
        >= 3
}

/// `[CD3]` double-bonded to a neighbor accepted by `partner`.
fn is_trigonal_carbon_double_bonded_to(
    molecule: &Molecule,
    id: AtomId,
    partner: impl Fn(&Atom) -> bool,
) -> bool {
    let is_cd3 = molecule.atom(id).is_some_and(|a| a.is_aliphatic(CARBON));
    is_cd3
        && molecule.degree(id) == 3
        && molecule.neighbors(id).any(|(n, bond)| {
            bond.is_double() && molecule.atom(n).is_some_and(&partner)
        })
}

fn is_aliphatic_n_o_s(a: &Atom) -> bool {
    is_aliphatic_any(a, &[NITROGEN, OXYGEN, SULFUR])
}

fn is_cationic_nitrogen(a: &Atom) -> bool {
    a.is_aliphatic(NITROGEN) && a.formal_charge == 1
}

/// `[#7,O,S!D1]`.
fn is_amide_heteroatom(molecule: &Molecule, id: AtomId) -> bool {
    molecule.atom(id).is_some_and(|a| {
        a.atomic_number() == NITROGEN
            || a.is_aliphatic(OXYGEN)
            || (a.is_aliphatic(SULFUR) && molecule.degree(id) != 1)
    })
}

/// `[#7!D1]`.
fn is_branched_nitrogen(molecule: &Molecule, id: AtomId) -> bool {
    molecule.atom(id).is_some_and(|a| a.atomic_number() == NITROGEN) && molecule.degree(id) != 1
}

/// Carbonyl-like carbon or heteroatom of an amide, ester, thioamide or
/// amidinium C-X bond, seen from either end.
fn is_amide_like_end(molecule: &Molecule, id: AtomId) -> bool {
    let carbonyl_carbon =
        |c: AtomId| is_trigonal_carbon_double_bonded_to(molecule, c, is_aliphatic_n_o_s);
    let amidinium_carbon =
        |c: AtomId| is_trigonal_carbon_double_bonded_to(molecule, c, is_cationic_nitrogen);

    let chain_neighbors = || {
        molecule
            .neighbors(id)
            .filter(|(_, bond)| is_chain_single(molecule, bond))
            .map(|(n, _)| n)
    };

    if carbonyl_carbon(id) && chain_neighbors().any(|n| is_amide_heteroatom(molecule, n)) {
        return true;
    }
    if is_amide_heteroatom(molecule, id) && chain_neighbors().any(carbonyl_carbon) {
        return true;
    }
    if amidinium_carbon(id) && chain_neighbors().any(|n| is_branched_nitrogen(molecule, n)) {
        return true;
    }
    is_branched_nitrogen(molecule, id) && chain_neighbors().any(amidinium_carbon)
}

/// End of a rotatable bond without the amide exclusions.
fn is_rotor_end(molecule: &Molecule, id: AtomId) -> bool {
    molecule.degree(id) > 1
        && !has_triple_bond(molecule, id)
        && !is_trihalomethyl(molecule, id)
        && !is_tert_butyl(molecule, id)
}

/// Rotatable bonds under the strict definition: acyclic single bonds
/// between non-terminal atoms, excluding triple-bonded atoms, CX3 and
/// tert-butyl groups, and the C-X bonds of amides, esters, thioamides and
/// amidinium groups.
pub fn rotatable_bonds(molecule: &Molecule) -> u32 {
    molecule
        .bonds_iter()
        .filter(|(_, bond)| bond.is_single_or_aromatic() && !is_ring(molecule, bond))
        .filter(|(_, bond)| {
            let (a, b) = (bond.atom1_id, bond.atom2_id);
            if !is_rotor_end(molecule, a) || !is_rotor_end(molecule, b) {
                return false;
            }
            !is_amide_like_end(molecule, a) || !is_amide_like_end(molecule, b)
        })
        .count() as u32
}

/// Hydrogen-bond donors: N-H with valence 3 (or 4 when cationic), neutral
/// O-H and S-H, and neutral aromatic n-H.
pub fn h_donors(molecule: &Molecule) -> u32 {
    molecule
        .atoms_iter()
        .filter(|&(id, a)| {
            let hydrogens = a.total_hydrogens();
            let valence = molecule.total_valence(id);
            if a.is_aliphatic(NITROGEN) && hydrogens > 0 {
                return (valence == 3) || (a.formal_charge == 1 && valence == 4);
            }
            if is_aliphatic_any(a, &[OXYGEN, SULFUR]) {
                return hydrogens == 1 && a.formal_charge == 0;
            }
            a.is_aromatic_element(NITROGEN) && hydrogens == 1 && a.formal_charge == 0
        })
        .count() as u32
}

/// Hydrogen-bond acceptors.
pub fn h_acceptors(molecule: &Molecule) -> u32 {
    molecule
        .atoms_iter()
        .filter(|&(id, a)| is_acceptor(molecule, id, a))
        .count() as u32
}

fn is_acceptor(molecule: &Molecule, id: AtomId, a: &Atom) -> bool {
    let hydrogens = a.total_hydrogens();
    let valence = molecule.total_valence(id);

    if is_aliphatic_any(a, &[OXYGEN, SULFUR]) {
        if a.formal_charge < 0 {
            return true;
        }
        if valence == 2 && hydrogens == 0 {
            return true;
        }
        if valence == 2 && hydrogens == 1 {
            return molecule.neighbors(id).any(|(n, bond)| {
                bond.is_single() && !has_double_bond_to(molecule, n, &ACID_PARTNERS, false)
            });
        }
        return false;
    }

    if a.is_aliphatic(NITROGEN) {
        return valence == 3
            && !molecule.neighbors(id).any(|(n, bond)| {
                bond.is_single()
                    && has_double_bond_to(molecule, n, &ACID_PARTNERS, true)
            });
    }

    if a.formal_charge != 0 || !a.is_aromatic {
        return false;
    }
    match a.atomic_number() {
        NITROGEN => hydrogens == 0,
        OXYGEN | SULFUR => true,
        _ => false,
    }
}

/// `*=[O,N,P,S]`, optionally restricted to acyclic double bonds.
fn has_double_bond_to(
    molecule: &Molecule,
    id: AtomId,
    elements: &[u8],
    acyclic_only: bool,
) -> bool {
    molecule.neighbors(id).any(|(n, bond)| {
        bond.is_double()
            && (!acyclic_only || !is_ring(molecule, bond))
            && molecule.atom(n).is_some_and(|a| is_aliphatic_any(a, elements))
    })
}
