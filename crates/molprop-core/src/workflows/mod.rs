//! # Workflows Module
//!
//! The public predictors. Each workflow wires the `engine` and `core` layers
//! into a single call.
//!
//! - **Boiling Point** ([`boiling_point`]) - n-alkane boiling points from carbon count
//! - **Glass Transition** ([`glass_transition`]) - Monomer Tg from structure notation

pub mod boiling_point;
pub mod glass_transition;
