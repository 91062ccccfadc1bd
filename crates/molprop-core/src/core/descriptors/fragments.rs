//! Functional-group counts. Each group is counted once per unique set of
//! matched atoms, so symmetric groups are not double counted.

use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::Bond;
use std::collections::HashSet;

const CARBON: u8 = 6;
const NITROGEN: u8 = 7;
const OXYGEN: u8 = 8;

fn unique_matches(matches: impl IntoIterator<Item = Vec<AtomId>>) -> u32 {
    let unique: HashSet<Vec<AtomId>> = matches
        .into_iter()
        .map(|mut atoms| {
            atoms.sort_unstable();
            atoms
        })
        .collect();
    unique.len() as u32
}

fn is_aliphatic(molecule: &Molecule, id: AtomId, atomic_number: u8) -> bool {
    molecule
        .atom(id)
        .is_some_and(|a| a.is_aliphatic(atomic_number))
}

fn is_carbon(molecule: &Molecule, id: AtomId) -> bool {
    molecule
        .atom(id)
        .is_some_and(|a| a.atomic_number() == CARBON)
}

/// Neighbors of `id` matching `accept`, joined by a bond accepted by `bond`.
fn neighbors_where<'a>(
    molecule: &'a Molecule,
    id: AtomId,
    bond: impl Fn(&Bond) -> bool + 'a,
    accept: impl Fn(AtomId) -> bool + 'a,
) -> impl Iterator<Item = AtomId> + 'a {
    molecule
        .neighbors(id)
        .filter(move |&(n, b)| bond(b) && accept(n))
        .map(|(n, _)| n)
}

/// Amides, `C(=O)-N`.
pub fn amides(molecule: &Molecule) -> u32 {
    let matches = molecule
        .atom_ids()
        .filter(|&c| is_aliphatic(molecule, c, CARBON))
        .flat_map(|c| {
            let carbonyl_oxygen = move |o| is_aliphatic(molecule, o, OXYGEN);
            neighbors_where(molecule, c, |b| b.is_double(), carbonyl_oxygen).flat_map(move |o| {
                let nitrogen = move |n| is_aliphatic(molecule, n, NITROGEN);
                neighbors_where(molecule, c, |b| b.is_single(), nitrogen)
                    .map(move |n| vec![c, o, n])
            })
        });
    unique_matches(matches)
}

/// Esters, `[#6][CX3](=O)[OX2H0][#6]`.
pub fn esters(molecule: &Molecule) -> u32 {
    let is_ether_oxygen = |o: AtomId| {
        is_aliphatic(molecule, o, OXYGEN)
            && molecule.total_connections(o) == 2
            && molecule.atom(o).is_some_and(|a| a.total_hydrogens() == 0)
    };

    let single = |b: &Bond| b.is_single_or_aromatic();
    let carbon = |x: AtomId| is_carbon(molecule, x);

    let mut matches = Vec::new();
    for c in molecule.atom_ids() {
        if !is_aliphatic(molecule, c, CARBON) || molecule.total_connections(c) != 3 {
            continue;
        }
        let carbonyl_oxygen = |o| is_aliphatic(molecule, o, OXYGEN);
        for o_double in neighbors_where(molecule, c, |b| b.is_double(), carbonyl_oxygen) {
            for o_single in neighbors_where(molecule, c, single, is_ether_oxygen) {
                for acyl in neighbors_where(molecule, c, single, carbon) {
                    let alkyl_carbon =
                        move |x: AtomId| x != c && x != acyl && is_carbon(molecule, x);
                    for alkyl in neighbors_where(molecule, o_single, single, alkyl_carbon) {
                        matches.push(vec![acyl, c, o_double, o_single, alkyl]);
                    }
                }
            }
        }
    }
    unique_matches(matches)
}

/// Ethers, `[OD2]([#6])[#6]`. Ester oxygens match as well.
pub fn ethers(molecule: &Molecule) -> u32 {
    let matches = molecule
        .atom_ids()
        .filter(|&o| is_aliphatic(molecule, o, OXYGEN) && molecule.degree(o) == 2)
        .filter_map(|o| {
            let carbons: Vec<AtomId> = neighbors_where(
                molecule,
                o,
                |b| b.is_single_or_aromatic(),
                |x| is_carbon(molecule, x),
            )
            .collect();
            (carbons.len() == 2).then(|| vec![o, carbons[0], carbons[1]])
        });
    unique_matches(matches)
}

/// Aliphatic hydroxyls, `[C!$(C=O)]-[OH]`.
pub fn alcohols(molecule: &Molecule) -> u32 {
    let is_carbonyl = |c: AtomId| {
        neighbors_where(molecule, c, |b| b.is_double(), |o| is_aliphatic(molecule, o, OXYGEN))
            .next()
            .is_some()
    };
    let is_hydroxyl = |o: AtomId| {
        is_aliphatic(molecule, o, OXYGEN)
            && molecule.atom(o).is_some_and(|a| a.total_hydrogens() == 1)
    };

    let matches = molecule
        .atom_ids()
        .filter(|&c| is_aliphatic(molecule, c, CARBON) && !is_carbonyl(c))
        .flat_map(|c| {
            neighbors_where(molecule, c, |b| b.is_single(), is_hydroxyl).map(move |o| vec![c, o])
        });
    unique_matches(matches)
}
