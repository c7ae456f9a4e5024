//! Data structures describing parsed atoms and sampled rigid-body poses.

pub mod atom;
pub mod pose;
