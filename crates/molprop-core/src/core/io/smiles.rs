use super::ReadError;
use crate::core::models::atom::{Atom, Chirality};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{Molecule, MoleculeError};
use crate::core::models::topology::BondOrder;
use crate::core::perception;
use crate::core::utils::elements::{self, ElementData};
use std::collections::BTreeMap;
use thiserror::Error;

const MAX_CHARGE_MAGNITUDE: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SmilesError {
    #[error("SMILES string is empty")]
    Empty,
    #[error("Syntax error at position {position}: {kind}")]
    Syntax {
        position: usize,
        kind: SmilesErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SmilesErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("expected an atom before this token")]
    MissingAtom,
    #[error("bracket atom is not closed")]
    UnclosedBracket,
    #[error("closing parenthesis without a matching branch")]
    UnmatchedParenthesis,
    #[error("branch is never closed")]
    UnclosedBranch,
    #[error("branch contains no atoms")]
    EmptyBranch,
    #[error("bond is not followed by an atom")]
    DanglingBond,
    #[error("ring closure {0} is never closed")]
    UnclosedRing(u16),
    #[error("ring closure {0} has conflicting bond orders")]
    ConflictingRingBond(u16),
    #[error("ring closure {0} bonds an atom to itself")]
    RingSelfBond(u16),
    #[error("ring closure {0} duplicates an existing bond")]
    DuplicateRingBond(u16),
    #[error("numeric value out of range")]
    ValueOutOfRange,
}

/// Bond symbols of the SMILES grammar. Directional bonds are single bonds
/// whose stereo meaning is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondSymbol {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
    Up,
    Down,
}

impl BondSymbol {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(Self::Single),
            b'=' => Some(Self::Double),
            b'#' => Some(Self::Triple),
            b'$' => Some(Self::Quadruple),
            b':' => Some(Self::Aromatic),
            b'/' => Some(Self::Up),
            b'\\' => Some(Self::Down),
            _ => None,
        }
    }

    fn order(self) -> BondOrder {
        match self {
            Self::Single | Self::Up | Self::Down => BondOrder::Single,
            Self::Double => BondOrder::Double,
            Self::Triple => BondOrder::Triple,
            Self::Quadruple => BondOrder::Quadruple,
            Self::Aromatic => BondOrder::Aromatic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: AtomId,
    bond: Option<BondSymbol>,
    position: usize,
}

/// Parses a SMILES string into a raw molecular graph.
///
/// Only the first whitespace-separated token is read; anything after it is
/// treated as a title, as most SMILES readers do. Written `[H]` atoms with a
/// single heavy neighbor are folded into that neighbor's hydrogen count.
///
/// The returned molecule is not yet sanitized: aromatic bonds have not been
/// kekulized and implicit hydrogens have not been assigned. Use
/// [`crate::core::perception::sanitize`] before computing descriptors.
///
/// # Errors
///
/// Returns [`SmilesError::Empty`] for blank input and [`SmilesError::Syntax`]
/// with the byte offset of the offending token for malformed input.
pub fn parse(input: &str) -> Result<Molecule, SmilesError> {
    let token = input.split_whitespace().next().ok_or(SmilesError::Empty)?;
    let mut molecule = Parser::new(token).run()?;
    fold_explicit_hydrogens(&mut molecule, token.len())?;
    Ok(molecule)
}

/// Parses a SMILES string and sanitizes the result.
///
/// # Errors
///
/// Returns [`ReadError::Smiles`] for malformed notation and
/// [`ReadError::Perception`] when the structure is chemically impossible
/// (bad valence or an aromatic system that cannot be kekulized).
pub fn read(input: &str) -> Result<Molecule, ReadError> {
    let mut molecule = parse(input)?;
    perception::sanitize(&mut molecule)?;
    Ok(molecule)
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    molecule: Molecule,
    previous: Option<AtomId>,
    pending_bond: Option<(BondSymbol, usize)>,
    branches: Vec<(Option<AtomId>, usize)>,
    open_rings: BTreeMap<u16, RingOpening>,
    branch_is_empty: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            molecule: Molecule::new(),
            previous: None,
            pending_bond: None,
            branches: Vec::new(),
            open_rings: BTreeMap::new(),
            branch_is_empty: false,
        }
    }

    fn run(mut self) -> Result<Molecule, SmilesError> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b'(' => self.open_branch()?,
                b')' => self.close_branch()?,
                b'.' => self.disconnect()?,
                b'%' | b'0'..=b'9' => self.ring_closure()?,
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.attach(atom)?;
                }
                _ if BondSymbol::from_byte(byte).is_some() => self.bond_symbol()?,
                _ => {
                    let atom = self.organic_atom()?;
                    self.attach(atom)?;
                }
            }
        }
        self.finish()
    }

    fn error(&self, position: usize, kind: SmilesErrorKind) -> SmilesError {
        SmilesError::Syntax { position, kind }
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn unexpected(&self) -> SmilesError {
        self.error(
            self.pos,
            SmilesErrorKind::UnexpectedCharacter(self.current_char()),
        )
    }

    fn open_branch(&mut self) -> Result<(), SmilesError> {
        if self.previous.is_none() {
            return Err(self.error(self.pos, SmilesErrorKind::MissingAtom));
        }
        if self.pending_bond.is_some() {
            return Err(self.unexpected());
        }
        self.branches.push((self.previous, self.pos));
        self.branch_is_empty = true;
        self.pos += 1;
        Ok(())
    }

    fn close_branch(&mut self) -> Result<(), SmilesError> {
        let Some((resume, _)) = self.branches.pop() else {
            return Err(self.error(self.pos, SmilesErrorKind::UnmatchedParenthesis));
        };
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if self.branch_is_empty {
            return Err(self.error(self.pos, SmilesErrorKind::EmptyBranch));
        }
        self.previous = resume;
        self.pos += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), SmilesError> {
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if self.previous.is_none() {
            return Err(self.error(self.pos, SmilesErrorKind::MissingAtom));
        }
        self.previous = None;
        self.pos += 1;
        Ok(())
    }

    fn bond_symbol(&mut self) -> Result<(), SmilesError> {
        if self.previous.is_none() {
            return Err(self.error(self.pos, SmilesErrorKind::MissingAtom));
        }
        if self.pending_bond.is_some() {
            return Err(self.unexpected());
        }
        let symbol = BondSymbol::from_byte(self.bytes[self.pos]).ok_or_else(|| self.unexpected())?;
        self.pending_bond = Some((symbol, self.pos));
        self.pos += 1;
        Ok(())
    }

    fn default_order(&self, a: AtomId, b: AtomId) -> BondOrder {
        let aromatic = |id| self.molecule.atom(id).is_some_and(|atom| atom.is_aromatic);
        if aromatic(a) && aromatic(b) {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn attach(&mut self, atom: Atom) -> Result<(), SmilesError> {
        let id = self.molecule.add_atom(atom);
        if let Some(previous) = self.previous {
            let order = match self.pending_bond.take() {
                Some((symbol, _)) => symbol.order(),
                None => self.default_order(previous, id),
            };
            self.molecule
                .add_bond(previous, id, order)
                .map_err(|_| self.unexpected())?;
        }
        self.previous = Some(id);
        self.branch_is_empty = false;
        Ok(())
    }

    fn ring_closure(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        let Some(current) = self.previous else {
            return Err(self.error(start, SmilesErrorKind::MissingAtom));
        };
        let number = self.ring_number()?;
        let closing = self.pending_bond.take().map(|(symbol, _)| symbol);

        let Some(opening) = self.open_rings.remove(&number) else {
            self.open_rings.insert(
                number,
                RingOpening {
                    atom: current,
                    bond: closing,
                    position: start,
                },
            );
            return Ok(());
        };

        let symbol = match (opening.bond, closing) {
            (Some(a), Some(b)) if a.order() != b.order() => {
                return Err(self.error(start, SmilesErrorKind::ConflictingRingBond(number)));
            }
            (a, b) => a.or(b),
        };
        let order = symbol.map_or_else(
            || self.default_order(opening.atom, current),
            BondSymbol::order,
        );
        self.molecule
            .add_bond(opening.atom, current, order)
            .map_err(|e| match e {
                MoleculeError::SelfBond => {
                    self.error(start, SmilesErrorKind::RingSelfBond(number))
                }
                _ => self.error(start, SmilesErrorKind::DuplicateRingBond(number)),
            })?;
        Ok(())
    }

    fn ring_number(&mut self) -> Result<u16, SmilesError> {
        let byte = self.bytes[self.pos];
        if byte.is_ascii_digit() {
            self.pos += 1;
            return Ok((byte - b'0') as u16);
        }

        // '%nn' or the extended '%(nnn)' form.
        self.pos += 1;
        if self.bytes.get(self.pos) == Some(&b'(') {
            self.pos += 1;
            let number = self
                .read_number()?
                .ok_or_else(|| self.unexpected())?;
            if self.bytes.get(self.pos) != Some(&b')') {
                return Err(self.unexpected());
            }
            self.pos += 1;
            return u16::try_from(number)
                .map_err(|_| self.error(self.pos, SmilesErrorKind::ValueOutOfRange));
        }

        let digits = self.bytes.get(self.pos..self.pos + 2);
        match digits {
            Some([d1, d2]) if d1.is_ascii_digit() && d2.is_ascii_digit() => {
                self.pos += 2;
                Ok(((d1 - b'0') * 10 + (d2 - b'0')) as u16)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn read_number(&mut self) -> Result<Option<u32>, SmilesError> {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        self.input[start..self.pos]
            .parse()
            .map(Some)
            .map_err(|_| self.error(start, SmilesErrorKind::ValueOutOfRange))
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let input = self.input;
        let start = self.pos;
        let byte = self.bytes[self.pos];
        let next = self.bytes.get(self.pos + 1).copied();

        let (symbol, aromatic) = match (byte, next) {
            (b'C', Some(b'l')) => ("Cl", false),
            (b'B', Some(b'r')) => ("Br", false),
            (b'*', _) => ("*", false),
            (b'A'..=b'Z', _) => (&input[start..start + 1], false),
            (b'a'..=b'z', _) => (&input[start..start + 1], true),
            _ => return Err(self.unexpected()),
        };

        let element = if symbol == "*" {
            elements::by_number(0)
        } else if aromatic {
            elements::aromatic(symbol).filter(|e| elements::organic_subset(e.symbol).is_some())
        } else {
            elements::organic_subset(symbol)
        };
        let Some(element) = element else {
            return Err(self.error(
                start,
                SmilesErrorKind::UnknownElement(symbol.to_string()),
            ));
        };

        self.pos += symbol.len();
        let mut atom = Atom::new(element);
        atom.is_aromatic = aromatic;
        atom.no_implicit = element.atomic_number == 0;
        Ok(atom)
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        let open = self.pos;
        self.pos += 1;

        let isotope = match self.read_number()? {
            Some(mass) => Some(
                u16::try_from(mass)
                    .map_err(|_| self.error(open + 1, SmilesErrorKind::ValueOutOfRange))?,
            ),
            None => None,
        };

        let (element, aromatic) = self.bracket_symbol()?;
        let mut atom = Atom::new(element);
        atom.isotope = isotope;
        atom.is_aromatic = aromatic;
        atom.no_implicit = true;
        atom.chirality = self.chirality();

        if self.bytes.get(self.pos) == Some(&b'H') {
            self.pos += 1;
            let count = self.read_number()?.unwrap_or(1);
            atom.explicit_hydrogens = u8::try_from(count)
                .map_err(|_| self.error(self.pos, SmilesErrorKind::ValueOutOfRange))?;
        }

        atom.formal_charge = self.charge()?;

        if self.bytes.get(self.pos) == Some(&b':') {
            self.pos += 1;
            atom.atom_class = Some(self.read_number()?.ok_or_else(|| self.unexpected())?);
        }

        match self.bytes.get(self.pos) {
            Some(b']') => {
                self.pos += 1;
                Ok(atom)
            }
            Some(_) => Err(self.unexpected()),
            None => Err(self.error(open, SmilesErrorKind::UnclosedBracket)),
        }
    }

    fn bracket_symbol(&mut self) -> Result<(&'static ElementData, bool), SmilesError> {
        let start = self.pos;
        let Some(&first) = self.bytes.get(start) else {
            return Err(self.error(start, SmilesErrorKind::UnclosedBracket));
        };
        let input = self.input;
        let two = input.get(start..start + 2);
        let one = input.get(start..start + 1).unwrap_or("");

        let resolved = match first {
            b'*' => elements::by_number(0).map(|e| (e, false, 1)),
            b'A'..=b'Z' => two
                .filter(|s| s.as_bytes()[1].is_ascii_lowercase())
                .and_then(elements::by_symbol)
                .map(|e| (e, false, 2))
                .or_else(|| elements::by_symbol(one).map(|e| (e, false, 1))),
            b'a'..=b'z' => two
                .and_then(elements::aromatic)
                .map(|e| (e, true, 2))
                .or_else(|| elements::aromatic(one).map(|e| (e, true, 1))),
            b']' => return Err(self.error(start, SmilesErrorKind::MissingAtom)),
            _ => return Err(self.unexpected()),
        };

        match resolved {
            Some((element, aromatic, len)) => {
                self.pos += len;
                Ok((element, aromatic))
            }
            None => {
                let name = two
                    .filter(|s| s.as_bytes()[1].is_ascii_lowercase())
                    .unwrap_or(one);
                Err(self.error(start, SmilesErrorKind::UnknownElement(name.to_string())))
            }
        }
    }

    fn chirality(&mut self) -> Chirality {
        if self.bytes.get(self.pos) != Some(&b'@') {
            return Chirality::Unspecified;
        }
        self.pos += 1;
        if self.bytes.get(self.pos) == Some(&b'@') {
            self.pos += 1;
            return Chirality::Clockwise;
        }
        let class = self.input.get(self.pos..self.pos + 2);
        if matches!(class, Some("TH" | "AL" | "SP" | "TB" | "OH")) {
            self.pos += 2;
            while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
                self.pos += 1;
            }
            return Chirality::Other;
        }
        Chirality::CounterClockwise
    }

    fn charge(&mut self) -> Result<i8, SmilesError> {
        let start = self.pos;
        let sign = match self.bytes.get(self.pos) {
            Some(b'+') => 1i8,
            Some(b'-') => -1i8,
            _ => return Ok(0),
        };
        let sign_byte = self.bytes[self.pos];
        self.pos += 1;

        let magnitude = match self.read_number()? {
            Some(value) => value,
            None => {
                let mut repeats = 1;
                while self.bytes.get(self.pos) == Some(&sign_byte) {
                    repeats += 1;
                    self.pos += 1;
                }
                repeats
            }
        };
        if magnitude > MAX_CHARGE_MAGNITUDE {
            return Err(self.error(start, SmilesErrorKind::ValueOutOfRange));
        }
        Ok(sign * magnitude as i8)
    }

    fn finish(self) -> Result<Molecule, SmilesError> {
        if let Some((_, position)) = self.pending_bond {
            return Err(self.error(position, SmilesErrorKind::DanglingBond));
        }
        if let Some(&(_, position)) = self.branches.last() {
            return Err(self.error(position, SmilesErrorKind::UnclosedBranch));
        }
        if let Some((&number, opening)) = self.open_rings.iter().next() {
            return Err(self.error(opening.position, SmilesErrorKind::UnclosedRing(number)));
        }
        if self.molecule.is_empty() {
            return Err(SmilesError::Empty);
        }
        Ok(self.molecule)
    }
}

/// Removes plain `[H]` atoms bonded to a single non-hydrogen atom and counts
/// them on that neighbor instead. A count that no longer fits is reported at
/// `end`, the length of the parsed token.
fn fold_explicit_hydrogens(molecule: &mut Molecule, end: usize) -> Result<(), SmilesError> {
    let foldable: Vec<(AtomId, AtomId)> = molecule
        .atoms_iter()
        .filter(|(_, atom)| {
            atom.is_hydrogen()
                && atom.isotope.is_none()
                && atom.formal_charge == 0
                && atom.explicit_hydrogens == 0
        })
        .filter_map(|(id, _)| {
            if molecule.degree(id) != 1 {
                return None;
            }
            let (neighbor, bond) = molecule.neighbors(id).next()?;
            let heavy = molecule.atom(neighbor).is_some_and(|n| !n.is_hydrogen());
            (heavy && bond.is_single()).then_some((id, neighbor))
        })
        .collect();

    for (hydrogen, neighbor) in foldable {
        molecule.remove_atom(hydrogen);
        if let Some(atom) = molecule.atom_mut(neighbor) {
            let Some(count) = atom.explicit_hydrogens.checked_add(1) else {
                return Err(SmilesError::Syntax {
                    position: end,
                    kind: SmilesErrorKind::ValueOutOfRange,
                });
            };
            atom.explicit_hydrogens = count;
        }
    }
    Ok(())
}
