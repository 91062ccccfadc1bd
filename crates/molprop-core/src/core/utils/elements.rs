use phf::{Map, Set, phf_map, phf_set};

/// Static per-element data used by valence perception and weight calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    /// The canonical element symbol (e.g., "C", "Cl").
    pub symbol: &'static str,
    /// The atomic number; 0 is reserved for the SMILES wildcard atom `*`.
    pub atomic_number: u8,
    /// Standard atomic weight in g/mol.
    pub atomic_weight: f64,
    /// Permitted valences in ascending order. Empty for elements without valence rules.
    pub valences: &'static [u8],
}

const fn element(
    symbol: &'static str,
    atomic_number: u8,
    atomic_weight: f64,
    valences: &'static [u8],
) -> ElementData {
    ElementData {
        symbol,
        atomic_number,
        atomic_weight,
        valences,
    }
}

static ELEMENTS: [ElementData; 119] = [
    element("*", 0, 0.0, &[]),
    element("H", 1, 1.008, &[1]),
    element("He", 2, 4.003, &[0]),
    element("Li", 3, 6.941, &[1]),
    element("Be", 4, 9.012, &[2]),
    element("B", 5, 10.812, &[3]),
    element("C", 6, 12.011, &[4]),
    element("N", 7, 14.007, &[3]),
    element("O", 8, 15.999, &[2]),
    element("F", 9, 18.998, &[1]),
    element("Ne", 10, 20.180, &[0]),
    element("Na", 11, 22.990, &[1]),
    element("Mg", 12, 24.305, &[2]),
    element("Al", 13, 26.982, &[3]),
    element("Si", 14, 28.086, &[4]),
    element("P", 15, 30.974, &[3, 5, 7]),
    element("S", 16, 32.067, &[2, 4, 6]),
    element("Cl", 17, 35.453, &[1]),
    element("Ar", 18, 39.948, &[0]),
    element("K", 19, 39.098, &[1]),
    element("Ca", 20, 40.078, &[2]),
    element("Sc", 21, 44.956, &[]),
    element("Ti", 22, 47.867, &[]),
    element("V", 23, 50.942, &[]),
    element("Cr", 24, 51.996, &[]),
    element("Mn", 25, 54.938, &[]),
    element("Fe", 26, 55.845, &[]),
    element("Co", 27, 58.933, &[]),
    element("Ni", 28, 58.693, &[]),
    element("Cu", 29, 63.546, &[]),
    element("Zn", 30, 65.390, &[]),
    element("Ga", 31, 69.723, &[3]),
    element("Ge", 32, 72.610, &[4]),
    element("As", 33, 74.922, &[3, 5, 7]),
    element("Se", 34, 78.960, &[2, 4, 6]),
    element("Br", 35, 79.904, &[1]),
    element("Kr", 36, 83.800, &[0]),
    element("Rb", 37, 85.468, &[1]),
    element("Sr", 38, 87.620, &[2]),
    element("Y", 39, 88.906, &[]),
    element("Zr", 40, 91.224, &[]),
    element("Nb", 41, 92.906, &[]),
    element("Mo", 42, 95.940, &[]),
    element("Tc", 43, 98.000, &[]),
    element("Ru", 44, 101.070, &[]),
    element("Rh", 45, 102.906, &[]),
    element("Pd", 46, 106.420, &[]),
    element("Ag", 47, 107.868, &[]),
    element("Cd", 48, 112.411, &[]),
    element("In", 49, 114.818, &[3]),
    element("Sn", 50, 118.710, &[2, 4]),
    element("Sb", 51, 121.760, &[3, 5, 7]),
    element("Te", 52, 127.600, &[2, 4, 6]),
    element("I", 53, 126.904, &[1, 3, 5]),
    element("Xe", 54, 131.290, &[0, 2, 4, 6]),
    element("Cs", 55, 132.905, &[1]),
    element("Ba", 56, 137.327, &[2]),
    element("La", 57, 138.905, &[]),
    element("Ce", 58, 140.116, &[]),
    element("Pr", 59, 140.908, &[]),
    element("Nd", 60, 144.242, &[]),
    element("Pm", 61, 145.000, &[]),
    element("Sm", 62, 150.360, &[]),
    element("Eu", 63, 151.964, &[]),
    element("Gd", 64, 157.250, &[]),
    element("Tb", 65, 158.925, &[]),
    element("Dy", 66, 162.500, &[]),
    element("Ho", 67, 164.930, &[]),
    element("Er", 68, 167.259, &[]),
    element("Tm", 69, 168.934, &[]),
    element("Yb", 70, 173.045, &[]),
    element("Lu", 71, 174.967, &[]),
    element("Hf", 72, 178.490, &[]),
    element("Ta", 73, 180.948, &[]),
    element("W", 74, 183.840, &[]),
    element("Re", 75, 186.207, &[]),
    element("Os", 76, 190.230, &[]),
    element("Ir", 77, 192.217, &[]),
    element("Pt", 78, 195.084, &[]),
    element("Au", 79, 196.967, &[]),
    element("Hg", 80, 200.592, &[]),
    element("Tl", 81, 204.383, &[1, 3]),
    element("Pb", 82, 207.200, &[2, 4]),
    element("Bi", 83, 208.980, &[3, 5]),
    element("Po", 84, 209.000, &[2, 4, 6]),
    element("At", 85, 210.000, &[1, 3, 5, 7]),
    element("Rn", 86, 222.000, &[0]),
    element("Fr", 87, 223.000, &[1]),
    element("Ra", 88, 226.000, &[2]),
    element("Ac", 89, 227.000, &[]),
    element("Th", 90, 232.038, &[]),
    element("Pa", 91, 231.036, &[]),
    element("U", 92, 238.029, &[]),
    element("Np", 93, 237.000, &[]),
    element("Pu", 94, 244.000, &[]),
    element("Am", 95, 243.000, &[]),
    element("Cm", 96, 247.000, &[]),
    element("Bk", 97, 247.000, &[]),
    element("Cf", 98, 251.000, &[]),
    element("Es", 99, 252.000, &[]),
    element("Fm", 100, 257.000, &[]),
    element("Md", 101, 258.000, &[]),
    element("No", 102, 259.000, &[]),
    element("Lr", 103, 262.000, &[]),
    element("Rf", 104, 267.000, &[]),
    element("Db", 105, 268.000, &[]),
    element("Sg", 106, 269.000, &[]),
    element("Bh", 107, 270.000, &[]),
    element("Hs", 108, 269.000, &[]),
    element("Mt", 109, 278.000, &[]),
    element("Ds", 110, 281.000, &[]),
    element("Rg", 111, 282.000, &[]),
    element("Cn", 112, 285.000, &[]),
    element("Nh", 113, 286.000, &[]),
    element("Fl", 114, 289.000, &[]),
    element("Mc", 115, 290.000, &[]),
    element("Lv", 116, 293.000, &[]),
    element("Ts", 117, 294.000, &[]),
    element("Og", 118, 294.000, &[]),
];

static SYMBOL_TO_NUMBER: Map<&'static str, u8> = phf_map! {
    "*" => 0, "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7,
    "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14,
    "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21,
    "Ti" => 22, "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28,
    "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35,
    "Kr" => 36, "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42,
    "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48, "In" => 49,
    "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61,
    "Sm" => 62, "Eu" => 63, "Gd" => 64, "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68,
    "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72, "Ta" => 73, "W" => 74, "Re" => 75,
    "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80, "Tl" => 81, "Pb" => 82,
    "Bi" => 83, "Po" => 84, "At" => 85, "Rn" => 86, "Fr" => 87, "Ra" => 88, "Ac" => 89,
    "Th" => 90, "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102,
    "Lr" => 103, "Rf" => 104, "Db" => 105, "Sg" => 106, "Bh" => 107, "Hs" => 108,
    "Mt" => 109, "Ds" => 110, "Rg" => 111, "Cn" => 112, "Nh" => 113, "Fl" => 114,
    "Mc" => 115, "Lv" => 116, "Ts" => 117, "Og" => 118,
};

/// Elements that may be written without brackets, keyed by their SMILES spelling.
static ORGANIC_SUBSET: Map<&'static str, u8> = phf_map! {
    "B" => 5, "C" => 6, "N" => 7, "O" => 8, "P" => 15, "S" => 16,
    "F" => 9, "Cl" => 17, "Br" => 35, "I" => 53,
};

/// Lowercase symbols accepted for aromatic atoms.
static AROMATIC_SYMBOLS: Set<&'static str> = phf_set! {
    "b", "c", "n", "o", "p", "s", "se", "as", "te",
};

pub fn by_number(atomic_number: u8) -> Option<&'static ElementData> {
    ELEMENTS.get(atomic_number as usize)
}

pub fn by_symbol(symbol: &str) -> Option<&'static ElementData> {
    SYMBOL_TO_NUMBER
        .get(symbol)
        .and_then(|&number| by_number(number))
}

pub fn organic_subset(symbol: &str) -> Option<&'static ElementData> {
    ORGANIC_SUBSET
        .get(symbol)
        .and_then(|&number| by_number(number))
}

/// Resolves a lowercase aromatic symbol (e.g., "c", "se") to its element.
pub fn aromatic(symbol: &str) -> Option<&'static ElementData> {
    if !AROMATIC_SYMBOLS.contains(symbol) {
        return None;
    }
    let mut chars = symbol.chars();
    let capitalized: String = chars
        .next()
        .map(|first| first.to_ascii_uppercase())
        .into_iter()
        .chain(chars)
        .collect();
    by_symbol(&capitalized)
}

/// Permitted valences for an atom, taking its formal charge into account.
///
/// Charged atoms use the valences of the isoelectronic neutral element
/// (N+ behaves like C, O- like F), which is how ammonium and alkoxide
/// valences are validated.
pub fn valences_for(atomic_number: u8, formal_charge: i8) -> &'static [u8] {
    if formal_charge == 0 {
        return by_number(atomic_number)
            .map(|e| e.valences)
            .unwrap_or(&[]);
    }
    let shifted = atomic_number as i16 - formal_charge as i16;
    if !(1..ELEMENTS.len() as i16).contains(&shifted) {
        return &[];
    }
    let Some(own) = by_number(atomic_number) else {
        return &[];
    };
    if own.valences.is_empty() {
        return &[];
    }
    by_number(shifted as u8)
        .map(|e| e.valences)
        .unwrap_or(&[])
}
