//! # Workflows Module
//!
//! High-level entry points that run complete docking procedures.
//!
//! - **Docking Workflow** ([`dock`]) - parse, select, center, sample, score, rank,
//!   de-duplicate and return the top poses of one receptor/ligand pair.
//! - **Demo Structures** ([`demo`]) - the built-in inputs used when a caller omits one.

pub mod demo;
pub mod dock;
