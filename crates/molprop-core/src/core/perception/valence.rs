use super::{PerceptionError, atom_index};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;

/// Smallest permitted valence that can accommodate `used` bonding electrons.
pub(crate) fn target_valence(allowed: &[u8], used: u32) -> Option<u32> {
    allowed
        .iter()
        .map(|&valence| u32::from(valence))
        .find(|&valence| valence >= used)
}

/// Valence already consumed by bonds and written hydrogens.
pub(crate) fn used_valence(molecule: &Molecule, atom_id: AtomId) -> u32 {
    let written = molecule
        .atom(atom_id)
        .map_or(0, |atom| u32::from(atom.explicit_hydrogens));
    molecule.explicit_valence(atom_id) + written
}

/// Assigns implicit hydrogens to organic-subset atoms and checks every atom
/// against its permitted valences.
///
/// Organic-subset atoms are filled up to the smallest permitted valence that
/// is at least their current valence. Bracket atoms receive no implicit
/// hydrogens and only have to stay within their largest permitted valence.
/// Atoms of elements without valence rules are left untouched.
pub fn assign_implicit_hydrogens(molecule: &mut Molecule) -> Result<(), PerceptionError> {
    let ids: Vec<AtomId> = molecule.atom_ids().collect();
    for atom_id in ids {
        let used = used_valence(molecule, atom_id);
        let Some(atom) = molecule.atom(atom_id) else {
            continue;
        };
        let allowed = atom.allowed_valences();
        if allowed.is_empty() {
            continue;
        }

        let implicit = if atom.no_implicit {
            let max = allowed.iter().copied().max().map_or(0, u32::from);
            (used <= max).then_some(0)
        } else {
            target_valence(allowed, used).and_then(|target| u8::try_from(target - used).ok())
        };

        let Some(implicit) = implicit else {
            return Err(PerceptionError::Valence {
                index: atom_index(molecule, atom_id),
                symbol: atom.symbol(),
                valence: used,
            });
        };
        if let Some(atom) = molecule.atom_mut(atom_id) {
            atom.implicit_hydrogens = implicit;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles;

    fn hydrogens(input: &str) -> Vec<u32> {
        let mut mol = smiles::parse(input).unwrap();
        super::super::kekulize::kekulize(&mut mol).unwrap();
        assign_implicit_hydrogens(&mut mol).unwrap();
        mol.atoms_iter().map(|(_, a)| a.total_hydrogens()).collect()
    }

    #[test]
    fn target_valence_picks_smallest_sufficient_value() {
        assert_eq!(target_valence(&[2, 4, 6], 0), Some(2));
        assert_eq!(target_valence(&[2, 4, 6], 3), Some(4));
        assert_eq!(target_valence(&[2, 4, 6], 7), None);
    }

    #[test]
    fn organic_subset_atoms_are_filled_to_default_valence() {
        assert_eq!(hydrogens("C=CO"), vec![2, 1, 1]);
        assert_eq!(hydrogens("C=CC(=O)N"), vec![2, 1, 0, 0, 2]);
        assert_eq!(hydrogens("CC#N"), vec![3, 0, 0]);
    }

    #[test]
    fn higher_valences_are_used_when_needed() {
        assert_eq!(hydrogens("CS(=O)(=O)C"), vec![3, 0, 0, 0, 3]);
        assert_eq!(hydrogens("OP(=O)(O)O"), vec![1, 0, 0, 1, 1]);
    }

    #[test]
    fn bracket_atoms_keep_their_written_hydrogens() {
        assert_eq!(hydrogens("[CH2]=C"), vec![2, 2]);
        assert_eq!(hydrogens("C[NH3+]"), vec![3, 3]);
        assert_eq!(hydrogens("C[O-]"), vec![3, 0]);
    }

    #[test]
    fn folded_hydrogens_count_towards_valence() {
        assert_eq!(hydrogens("[H]C([H])=O"), vec![2, 0]);
    }

    #[test]
    fn aromatic_atoms_receive_hydrogens_after_kekulization() {
        assert_eq!(hydrogens("c1ccncc1"), vec![1, 1, 1, 0, 1, 1]);
        assert_eq!(hydrogens("c1cc[nH]c1"), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn overbonded_atoms_are_rejected() {
        for input in ["FC(F)(F)(F)F", "C=O=C", "C[N+](C)(C)(C)C"] {
            let mut mol = smiles::parse(input).unwrap();
            assert!(
                matches!(
                    assign_implicit_hydrogens(&mut mol),
                    Err(PerceptionError::Valence { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn valence_beyond_hydrogen_limit_is_reported_in_full() {
        let mut mol = smiles::parse("[CH252](C)(C)(C)(C)").unwrap();
        assert!(matches!(
            assign_implicit_hydrogens(&mut mol),
            Err(PerceptionError::Valence {
                index: 0,
                symbol: "C",
                valence: 256
            })
        ));
    }

    #[test]
    fn many_triple_bonds_to_one_center_do_not_overflow() {
        let input = format!("[Fe]{}", "(#C)".repeat(90));
        let mut mol = smiles::parse(&input).unwrap();
        let fe = mol.atoms_iter().next().map(|(id, _)| id).unwrap();
        assert_eq!(used_valence(&mol, fe), 270);
        assign_implicit_hydrogens(&mut mol).unwrap();
        assert!(
            mol.atoms_iter()
                .skip(1)
                .all(|(_, a)| a.total_hydrogens() == 1)
        );
    }

    #[test]
    fn elements_without_rules_are_not_checked() {
        let mut mol = smiles::parse("[Fe](C)(C)(C)(C)(C)(C)C").unwrap();
        assert!(assign_implicit_hydrogens(&mut mol).is_ok());
    }
}
