//! # Engine Module
//!
//! The search machinery of the docking engine.
//!
//! - **Configuration** ([`config`]) - Docking parameters, atom modes and their builder
//! - **Sampling** ([`sampling`]) - The versioned generator and rigid-body pose sampler
//! - **Diversity** ([`diversity`]) - Greedy angular/translational de-duplication of ranked poses
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Errors raised by the docking workflow

pub mod config;
pub mod diversity;
pub mod error;
pub mod progress;
pub mod sampling;
