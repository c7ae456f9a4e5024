//! Contact/clash scoring of a ligand pose against a receptor.
//!
//! The score is a deliberately cheap geometric proxy, not an energy: every
//! receptor/ligand atom pair closer than a scaled sum of van der Waals radii is a
//! clash and contributes a saturating penalty, every other pair within the contact
//! cutoff counts as one contact.
//!
//! ```text
//! cut     = clash_factor * (r_vdw(a) + r_vdw(b))
//! d <= cut          : penalty += w_clash * ov / (1 + soft * ov),  ov = (cut - d + eps) / cut
//! d <= contact_cut  : contacts += 1
//! score   = w_contact * contacts - penalty
//! ```

pub mod vdw;

use crate::core::models::atom::Atom;
use crate::core::models::pose::RigidTransform;
use crate::core::utils::geometry::transform_point;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Keeps the overlap fraction strictly positive for a pair sitting exactly on the cutoff.
pub const CLASH_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub contact_cut: f64,
    pub clash_factor: f64,
    pub w_contact: f64,
    pub w_clash: f64,
    pub soft: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseScore {
    pub score: f64,
    pub contact_count: usize,
    pub clash_penalty: f64,
}

/// An atom reduced to what the scoring loop reads: its position and cached radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringSite {
    pub position: Point3<f64>,
    pub radius: f64,
}

impl ScoringSite {
    pub fn from_atom(atom: &Atom) -> Self {
        Self {
            position: atom.position,
            radius: vdw::vdw_radius(&atom.element),
        }
    }

    #[inline]
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        Self {
            position: transform_point(&self.position, transform),
            radius: self.radius,
        }
    }
}

pub fn prepare_sites(atoms: &[Atom]) -> Vec<ScoringSite> {
    atoms.iter().map(ScoringSite::from_atom).collect()
}

/// Scores a transformed ligand against a receptor, both given as prepared sites.
///
/// Pairs are visited ligand-major (every receptor site for the first ligand
/// site, then the second, ...), which fixes the summation order of the penalty.
pub fn score_sites(
    receptor: &[ScoringSite],
    ligand: &[ScoringSite],
    params: &ScoringParams,
) -> PoseScore {
    let mut contact_count = 0usize;
    let mut clash_penalty = 0.0;

    for b in ligand {
        for a in receptor {
            let d = (b.position - a.position).norm();
            let cut = params.clash_factor * (a.radius + b.radius);
            if d <= cut {
                let ov = (cut - d + CLASH_EPSILON) / cut;
                clash_penalty += params.w_clash * ov * (1.0 / (1.0 + params.soft * ov));
            } else if d <= params.contact_cut {
                contact_count += 1;
            }
        }
    }

    PoseScore {
        score: params.w_contact * contact_count as f64 - clash_penalty,
        contact_count,
        clash_penalty,
    }
}

/// Scores an already transformed ligand atom set against a receptor atom set.
pub fn score_pose(receptor: &[Atom], ligand: &[Atom], params: &ScoringParams) -> PoseScore {
    score_sites(&prepare_sites(receptor), &prepare_sites(ligand), params)
}
