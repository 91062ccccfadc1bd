//! # molprop Core Library
//!
//! Quick physical-property estimates for small molecules: boiling points of
//! straight-chain alkanes from a least-squares line, and glass-transition
//! temperatures of polymers from their monomer's structure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`), the SMILES
//!   reader, chemical perception and descriptor calculators.
//!
//! - **[`engine`]: The Logic Core.** Model configuration, line fitting, the Tg
//!   scoring formula and the `StructureToolkit` boundary between notation and
//!   descriptors.
//!
//! - **[`workflows`]: The Public API.** `BoilingPointPredictor` and `TgEstimator`,
//!   the entry points most users need.
//!
//! ```
//! use molprop::workflows::{boiling_point, glass_transition};
//!
//! let pentane = boiling_point::predict(5);
//! assert!((pentane - 18.33).abs() < 0.01);
//!
//! let styrene = glass_transition::predict("C=CC1=CC=CC=C1").unwrap();
//! assert_eq!(styrene.descriptors.aromatic_rings, 1);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
