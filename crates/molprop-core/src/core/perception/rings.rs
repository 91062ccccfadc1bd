use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::molecule::{Molecule, RingInfo};
use std::collections::{HashMap, HashSet, VecDeque};

/// A candidate cycle: atoms in ring order plus its edge set as a bit vector.
#[derive(Debug, Clone)]
struct Cycle {
    atoms: Vec<AtomId>,
    edges: Vec<u64>,
}

/// Finds ring bonds and the smallest set of smallest rings.
///
/// A bond is a ring bond when its two atoms remain connected after the bond
/// is removed. The SSSR is selected from Horton's candidate cycles (one per
/// root atom and edge, built from BFS shortest paths), taken in order of
/// increasing size and kept whenever they are linearly independent over
/// GF(2), until the cyclomatic number of the ring system is reached.
pub fn perceive(molecule: &Molecule) -> RingInfo {
    let ring_bonds: HashSet<BondId> = molecule
        .bonds_iter()
        .filter(|&(id, bond)| connected_without(molecule, bond.atom1_id, bond.atom2_id, id))
        .map(|(id, _)| id)
        .collect();
    if ring_bonds.is_empty() {
        return RingInfo::default();
    }

    let sssr = smallest_rings(molecule, &ring_bonds);
    RingInfo { sssr, ring_bonds }
}

fn connected_without(molecule: &Molecule, from: AtomId, to: AtomId, skipped: BondId) -> bool {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        for &bond_id in molecule.bonds_of(current) {
            if bond_id == skipped {
                continue;
            }
            let Some(next) = molecule.bond(bond_id).and_then(|b| b.partner(current)) else {
                continue;
            };
            if next == to {
                return true;
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

struct RingGraph {
    atoms: Vec<AtomId>,
    edges: Vec<(AtomId, AtomId)>,
    adjacency: HashMap<AtomId, Vec<(AtomId, usize)>>,
}

impl RingGraph {
    fn new(molecule: &Molecule, ring_bonds: &HashSet<BondId>) -> Self {
        let mut edges = Vec::new();
        let mut adjacency: HashMap<AtomId, Vec<(AtomId, usize)>> = HashMap::new();
        for (bond_id, bond) in molecule.bonds_iter() {
            if !ring_bonds.contains(&bond_id) {
                continue;
            }
            let index = edges.len();
            edges.push((bond.atom1_id, bond.atom2_id));
            adjacency
                .entry(bond.atom1_id)
                .or_default()
                .push((bond.atom2_id, index));
            adjacency
                .entry(bond.atom2_id)
                .or_default()
                .push((bond.atom1_id, index));
        }
        let atoms = molecule
            .atom_ids()
            .filter(|id| adjacency.contains_key(id))
            .collect();
        Self {
            atoms,
            edges,
            adjacency,
        }
    }

    fn neighbors(&self, atom: AtomId) -> impl Iterator<Item = (AtomId, usize)> + '_ {
        self.adjacency.get(&atom).into_iter().flatten().copied()
    }

    fn component_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut components = 0;
        for &start in &self.atoms {
            if !seen.insert(start) {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            while let Some(current) = stack.pop() {
                for (next, _) in self.neighbors(current) {
                    if seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
        components
    }

    /// BFS tree from `root`: parent atom and connecting edge of every reached atom.
    fn shortest_path_tree(&self, root: AtomId) -> HashMap<AtomId, (AtomId, usize)> {
        let mut parent = HashMap::new();
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for (next, edge) in self.neighbors(current) {
                if seen.insert(next) {
                    parent.insert(next, (current, edge));
                    queue.push_back(next);
                }
            }
        }
        parent
    }

    /// Horton candidates for a single root.
    fn candidates_from(&self, root: AtomId, words: usize) -> Vec<Cycle> {
        let parent = self.shortest_path_tree(root);
        let path_to_root = |mut atom: AtomId| -> (Vec<AtomId>, Vec<usize>) {
            let mut atoms = vec![atom];
            let mut edges = Vec::new();
            while let Some(&(up, edge)) = parent.get(&atom) {
                atoms.push(up);
                edges.push(edge);
                atom = up;
            }
            (atoms, edges)
        };

        let mut cycles = Vec::new();
        for (index, &(x, y)) in self.edges.iter().enumerate() {
            let is_tree_edge =
                parent.get(&x) == Some(&(y, index)) || parent.get(&y) == Some(&(x, index));
            if is_tree_edge || (!parent.contains_key(&x) && x != root) {
                continue;
            }
            let (x_atoms, x_edges) = path_to_root(x);
            let (y_atoms, y_edges) = path_to_root(y);
            if x_atoms.last() != Some(&root) || y_atoms.last() != Some(&root) {
                continue;
            }

            let x_set: HashSet<AtomId> = x_atoms[..x_atoms.len() - 1].iter().copied().collect();
            if y_atoms[..y_atoms.len() - 1].iter().any(|a| x_set.contains(a)) {
                continue;
            }

            let mut atoms: Vec<AtomId> = x_atoms.iter().rev().copied().collect();
            atoms.extend(y_atoms[..y_atoms.len() - 1].iter().copied());
            if atoms.len() < 3 {
                continue;
            }

            let mut bits = vec![0u64; words];
            for edge in x_edges.into_iter().chain(y_edges).chain([index]) {
                bits[edge / 64] |= 1 << (edge % 64);
            }
            cycles.push(Cycle { atoms, edges: bits });
        }
        cycles
    }
}

fn smallest_rings(molecule: &Molecule, ring_bonds: &HashSet<BondId>) -> Vec<Vec<AtomId>> {
    let graph = RingGraph::new(molecule, ring_bonds);
    let rank = graph.edges.len() + graph.component_count() - graph.atoms.len();
    let words = graph.edges.len().div_ceil(64);

    let mut seen_edge_sets = HashSet::new();
    let mut candidates: Vec<Cycle> = graph
        .atoms
        .iter()
        .flat_map(|&root| graph.candidates_from(root, words))
        .filter(|cycle| seen_edge_sets.insert(cycle.edges.clone()))
        .collect();
    candidates.sort_by_key(|cycle| cycle.atoms.len());

    let mut basis: HashMap<usize, Vec<u64>> = HashMap::new();
    let mut rings = Vec::with_capacity(rank);
    for cycle in candidates {
        if rings.len() == rank {
            break;
        }
        if insert_independent(&mut basis, cycle.edges.clone()) {
            rings.push(cycle.atoms);
        }
    }
    rings
}

fn highest_bit(bits: &[u64]) -> Option<usize> {
    bits.iter()
        .enumerate()
        .rev()
        .find(|(_, word)| **word != 0)
        .map(|(i, word)| i * 64 + 63 - word.leading_zeros() as usize)
}

/// Reduces `vector` against the basis and adds it when something remains.
fn insert_independent(basis: &mut HashMap<usize, Vec<u64>>, mut vector: Vec<u64>) -> bool {
    while let Some(pivot) = highest_bit(&vector) {
        match basis.get(&pivot) {
            Some(row) => {
                for (word, other) in vector.iter_mut().zip(row) {
                    *word ^= other;
                }
            }
            None => {
                basis.insert(pivot, vector);
                return true;
            }
        }
    }
    false
}
