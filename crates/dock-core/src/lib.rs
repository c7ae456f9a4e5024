//! # Rigidock Core Library
//!
//! A deterministic, high-throughput engine for rigid-body docking of two molecular
//! structures. Given a receptor and a ligand, it samples random rigid-body placements
//! of the ligand, scores each placement with a cheap geometric contact/clash potential,
//! and returns a small, mutually diverse set of top-scoring poses.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `Pose`), structure
//!   parsing and writing, atom selection, rigid-body geometry, and the scoring function.
//!
//! - **[`engine`]: The Search Machinery.** Docking parameters, the versioned pseudo-random
//!   generator and pose sampler, the diversity filter, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the
//!   complete docking pipeline, the single entry point for collaborators such as the
//!   command line front end or the HTTP job service.

pub mod core;
pub mod engine;
pub mod workflows;
