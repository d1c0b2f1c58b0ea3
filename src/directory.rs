//! Locality directory access.
//!
//! This module wraps the remote directory of Brazilian localities:
//! - [`Region`] / [`City`] - the two levels of the locality hierarchy
//! - [`Directory`] - the read-only client trait
//! - [`HttpDirectory`] - the HTTP implementation against the IBGE API

pub mod client;
pub mod model;

pub use client::{Directory, DirectoryError, HttpDirectory};
pub use model::{City, Region};
