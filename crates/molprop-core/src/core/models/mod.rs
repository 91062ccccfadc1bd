//! # Core Models Module
//!
//! Data structures used to represent parsed molecules.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom representation with element, charge, hydrogens, and aromaticity
//! - [`topology`] - Bond orders and bonds
//! - [`molecule`] - The molecular graph with adjacency and ring information
//! - [`ids`] - Unique identifier types for atoms and bonds
//!
//! ## Usage
//!
//! Molecules are normally produced by the SMILES reader rather than built by hand:
//!
//! ```ignore
//! use molprop::core::io::smiles;
//!
//! let molecule = smiles::read("C=CO")?;
//! assert_eq!(molecule.atom_count(), 3);
//! ```

pub mod atom;
pub mod ids;
pub mod molecule;
pub mod topology;
