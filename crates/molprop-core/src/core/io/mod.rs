//! Readers for line notations.
//!
//! [`smiles::parse`] builds the raw graph exactly as written, while
//! [`smiles::read`] additionally runs chemical perception so the result is
//! ready for descriptor calculation.

use crate::core::perception::PerceptionError;
use thiserror::Error;

pub mod smiles;

pub use smiles::SmilesError;

/// Failure while turning notation into a sanitized molecule.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReadError {
    #[error(transparent)]
    Smiles(#[from] SmilesError),
    #[error(transparent)]
    Perception(#[from] PerceptionError),
}
