//! Readers and writers for molecular structure text.

pub mod pdb;
