//! # Engine Module
//!
//! Model configuration, fitting and scoring shared by the workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Reference tables, Tg coefficients and the model config builder
//! - **Regression** ([`regression`]) - Ordinary least-squares line fitting
//! - **Scoring** ([`scoring`]) - The additive Tg formula and its zero clamp
//! - **Toolkit** ([`toolkit`]) - The structure parsing and description boundary
//! - **Error Handling** ([`error`]) - Engine-level error types

pub mod config;
pub mod error;
pub mod regression;
pub mod scoring;
pub mod toolkit;
