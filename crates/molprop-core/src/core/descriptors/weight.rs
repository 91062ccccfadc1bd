use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::utils::elements;

/// Exact masses of commonly labelled nuclides, as (atomic number, mass number, mass).
const ISOTOPE_MASSES: &[(u8, u16, f64)] = &[
    (1, 1, 1.007825),
    (1, 2, 2.014102),
    (1, 3, 3.016049),
    (6, 11, 11.011433),
    (6, 12, 12.000000),
    (6, 13, 13.003355),
    (6, 14, 14.003242),
    (7, 14, 14.003074),
    (7, 15, 15.000109),
    (8, 16, 15.994915),
    (8, 17, 16.999132),
    (8, 18, 17.999160),
    (9, 18, 18.000938),
    (9, 19, 18.998403),
    (15, 31, 30.973762),
    (15, 32, 31.973908),
    (16, 32, 31.972071),
    (16, 34, 33.967867),
    (16, 35, 34.969032),
    (17, 35, 34.968853),
    (17, 37, 36.965903),
    (35, 79, 78.918338),
    (35, 81, 80.916291),
    (53, 123, 122.905590),
    (53, 125, 124.904630),
    (53, 127, 126.904473),
    (53, 131, 130.906125),
];

/// Mass of one nucleus of `atom`: the exact isotope mass when one was
/// written, the mass number itself for unlisted isotopes, and the standard
/// atomic weight otherwise.
fn atom_mass(atom: &Atom) -> f64 {
    let Some(mass_number) = atom.isotope else {
        return atom.element.atomic_weight;
    };
    let z = atom.atomic_number();
    ISOTOPE_MASSES
        .iter()
        .find(|&&(number, a, _)| number == z && a == mass_number)
        .map_or(f64::from(mass_number), |&(_, _, mass)| mass)
}

/// Molecular weight, counting explicit and implicit hydrogens. Labelled atoms
/// contribute their isotope mass; everything else uses average weights.
pub fn molecular_weight(molecule: &Molecule) -> f64 {
    let hydrogen = elements::by_number(1).map_or(0.0, |h| h.atomic_weight);
    molecule
        .atoms_iter()
        .map(|(_, atom)| atom_mass(atom) + f64::from(atom.total_hydrogens()) * hydrogen)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles;

    fn weight(input: &str) -> f64 {
        molecular_weight(&smiles::read(input).unwrap())
    }

    #[test]
    fn weights_include_implicit_hydrogens() {
        assert!((weight("C") - 16.043).abs() < 1e-9);
        assert!((weight("O") - 18.015).abs() < 1e-9);
        assert!((weight("CCO") - 46.069).abs() < 1e-9);
    }

    #[test]
    fn written_hydrogens_use_average_weights() {
        assert!((weight("[H]C([H])([H])[H]") - 16.043).abs() < 1e-9);
    }

    #[test]
    fn labelled_atoms_use_isotope_masses() {
        assert!((weight("[13CH4]") - 17.035355).abs() < 1e-9);
        assert!((weight("[2H]C([2H])([2H])[2H]") - 20.067408).abs() < 1e-9);
        assert!((weight("C[18OH]") - 34.042160).abs() < 1e-9);
        assert!((weight("[15NH3]") - 18.024109).abs() < 1e-9);
    }

    #[test]
    fn unlisted_isotopes_fall_back_to_mass_number() {
        assert!((weight("[99Tc]") - 99.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_element_salts_are_weighed() {
        assert!((weight("[Cs+].[Cl-]") - 168.358).abs() < 1e-9);
        assert!((weight("[Pb]") - 207.2).abs() < 1e-9);
    }

    #[test]
    fn disconnected_components_are_summed() {
        assert!((weight("[Na+].[Cl-]") - 58.443).abs() < 1e-9);
    }
}
