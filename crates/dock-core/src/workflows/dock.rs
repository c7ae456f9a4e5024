use crate::core::io::pdb::{self, PdbError};
use crate::core::models::atom::Atom;
use crate::core::models::pose::{Pose, RigidTransform};
use crate::core::scoring::{ScoringParams, ScoringSite, prepare_sites, score_sites};
use crate::core::selection::select_atoms;
use crate::core::utils::geometry::{center, transform};
use crate::engine::config::DockingParameters;
use crate::engine::diversity::diversify;
use crate::engine::error::{DockingError, StructureRole};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampling::sample_transforms;
use crate::workflows::demo::{DEMO_LIGAND_PDB, DEMO_RECEPTOR_PDB};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Label of the single complex produced when every chain of each input is docked as one body.
pub const AGGREGATE_LABEL: &str = "A{all} vs B{all}";

/// One docked receptor/ligand pair.
///
/// `receptor` and `ligand` are the centered atom sets used for scoring. Any
/// returned pose can be reconstructed by transforming `ligand` with the pose's
/// rotation and translation against the unmoved `receptor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockingComplex {
    pub label: String,
    pub top_poses: Vec<Pose>,
    pub receptor: Vec<Atom>,
    pub ligand: Vec<Atom>,
}

impl DockingComplex {
    /// The ligand placed by the `index`-th returned pose.
    pub fn posed_ligand(&self, index: usize) -> Option<Vec<Atom>> {
        self.top_poses
            .get(index)
            .map(|pose| transform(&self.ligand, &pose.transform))
    }

    /// Writes the receptor and the ligand placed by the `index`-th pose as PDB text.
    ///
    /// Returns `Ok(false)` without writing anything if there is no such pose.
    pub fn write_pose_pdb(&self, index: usize, writer: &mut impl Write) -> Result<bool, PdbError> {
        match self.posed_ligand(index) {
            Some(ligand) => {
                pdb::write_complex(writer, &self.receptor, &ligand)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingResult {
    pub params: DockingParameters,
    pub complexes: Vec<DockingComplex>,
}

/// Runs the docking pipeline without progress reporting.
///
/// See [`run_with_reporter`].
pub fn run(
    receptor_pdb: Option<&str>,
    ligand_pdb: Option<&str>,
    params: &DockingParameters,
) -> Result<DockingResult, DockingError> {
    run_with_reporter(receptor_pdb, ligand_pdb, params, &ProgressReporter::new())
}

/// Docks `ligand_pdb` against `receptor_pdb`.
///
/// A missing or empty structure text is replaced by the built-in demo
/// structure. The run is a pure function of its inputs: the same texts and
/// parameters always give the same result, whether or not scoring runs in
/// parallel.
///
/// # Errors
///
/// Returns [`DockingError::Parse`] if either text contains no valid coordinate
/// record.
#[instrument(skip_all, name = "docking_workflow", fields(samples = params.samples, seed = params.seed))]
pub fn run_with_reporter(
    receptor_pdb: Option<&str>,
    ligand_pdb: Option<&str>,
    params: &DockingParameters,
    reporter: &ProgressReporter,
) -> Result<DockingResult, DockingError> {
    // === Phase 1: Parse, select and center ===
    reporter.report(Progress::PhaseStart {
        name: "Preparing structures",
    });
    let receptor = prepare_structure(
        receptor_pdb,
        DEMO_RECEPTOR_PDB,
        StructureRole::Receptor,
        params,
        reporter,
    )?;
    let ligand = prepare_structure(
        ligand_pdb,
        DEMO_LIGAND_PDB,
        StructureRole::Ligand,
        params,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Sample and score ===
    reporter.report(Progress::PhaseStart {
        name: "Sampling poses",
    });
    let transforms = sample_transforms(params.seed, params.samples, params.max_trans);
    let mut poses = score_transforms(
        &prepare_sites(&receptor),
        &prepare_sites(&ligand),
        &transforms,
        &params.scoring(),
        reporter,
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Rank and de-duplicate ===
    reporter.report(Progress::PhaseStart { name: "Ranking" });
    rank_poses(&mut poses);
    let pool = &poses[..params.candidate_pool_size().min(poses.len())];
    let top_poses = diversify(pool, params.dup_angle, params.dup_trans, params.top_n);
    reporter.report(Progress::PhaseFinish);

    info!(
        sampled = poses.len(),
        returned = top_poses.len(),
        best_score = top_poses.first().map(|p| p.score),
        "Docking complete."
    );

    Ok(DockingResult {
        params: params.clone(),
        complexes: vec![DockingComplex {
            label: AGGREGATE_LABEL.to_string(),
            top_poses,
            receptor,
            ligand,
        }],
    })
}

fn prepare_structure(
    text: Option<&str>,
    demo: &str,
    role: StructureRole,
    params: &DockingParameters,
    reporter: &ProgressReporter,
) -> Result<Vec<Atom>, DockingError> {
    let text = text.filter(|t| !t.is_empty()).unwrap_or_else(|| {
        debug!(structure = %role, "No structure supplied, using the built-in demo.");
        reporter.report(Progress::Message(format!("Using the built-in demo {role}.")));
        demo
    });

    let atoms = pdb::parse_pdb_str(text);
    if atoms.is_empty() {
        return Err(DockingError::Parse { structure: role });
    }

    let selected = select_atoms(&atoms, params.atom_mode);
    if selected.is_empty() {
        warn!(
            structure = %role,
            mode = %params.atom_mode,
            "Atom selection is empty; every pose will score zero."
        );
    }
    debug!(
        structure = %role,
        parsed = atoms.len(),
        selected = selected.len(),
        "Structure prepared."
    );

    Ok(center(&selected))
}

/// Scores every transform, keeping the input order of `transforms` in the output.
fn score_transforms(
    receptor: &[ScoringSite],
    ligand: &[ScoringSite],
    transforms: &[RigidTransform],
    scoring: &ScoringParams,
    reporter: &ProgressReporter,
) -> Vec<Pose> {
    reporter.report(Progress::TaskStart {
        total_steps: transforms.len() as u64,
    });

    let score_one = |t: &RigidTransform| {
        let posed: Vec<ScoringSite> = ligand.iter().map(|site| site.transformed(t)).collect();
        let score = score_sites(receptor, &posed, scoring);
        reporter.report(Progress::TaskIncrement);
        Pose::new(*t, score)
    };

    #[cfg(not(feature = "parallel"))]
    let poses: Vec<Pose> = transforms.iter().map(score_one).collect();

    #[cfg(feature = "parallel")]
    let poses: Vec<Pose> = transforms.par_iter().map(score_one).collect();

    reporter.report(Progress::TaskFinish);
    poses
}

/// Sorts poses by descending score. The sort is stable, so equal scores keep
/// their sampling order and the ranking is fully deterministic. A NaN score
/// ranks below every number.
pub fn rank_poses(poses: &mut [Pose]) {
    let key = |p: &Pose| if p.score.is_nan() { f64::NEG_INFINITY } else { p.score };
    poses.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
