//! # Core Module
//!
//! The chemistry building blocks behind the property estimators.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds and the molecular graph
//! - **Notation I/O** ([`io`]) - The SMILES reader
//! - **Chemical Perception** ([`perception`]) - Valence, kekulization, rings and aromaticity
//! - **Descriptors** ([`descriptors`]) - Molecular weight, Lipinski counts and functional groups
//! - **Utilities** ([`utils`]) - Static element data
//!
//! ## Key Capabilities
//!
//! - **Sanitizing SMILES reader** that rejects malformed or chemically impossible input
//! - **Smallest set of smallest rings** as the basis for aromatic ring counts
//! - **Descriptor conventions** that match widely used cheminformatics toolkits

pub mod descriptors;
pub mod io;
pub mod models;
pub mod perception;
pub mod utils;
