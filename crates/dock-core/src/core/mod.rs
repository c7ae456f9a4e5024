//! # Core Module
//!
//! Fundamental building blocks of the docking engine.
//!
//! - **Molecular Representation** ([`models`]) - Atom records and scored poses
//! - **File I/O** ([`io`]) - Fixed-column PDB reading and complex writing
//! - **Atom Selection** ([`selection`]) - Heavy-atom, backbone and alpha-carbon subsets
//! - **Scoring** ([`scoring`]) - Contact/clash potential and van der Waals radii
//! - **Geometry** ([`utils`]) - Centroids, quaternion rotations and rigid-body transforms
//!
//! Everything in this module is a pure function over immutable data; no state is
//! shared between calls.

pub mod io;
pub mod models;
pub mod scoring;
pub mod selection;
pub mod utils;
