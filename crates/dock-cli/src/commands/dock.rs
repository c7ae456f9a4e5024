use crate::cli::DockArgs;
use crate::config::build_params;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rigidock::core::io::pdb;
use rigidock::engine::progress::ProgressReporter;
use rigidock::workflows::dock::{self, DockingComplex, DockingResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn run(args: DockArgs, quiet: bool) -> Result<()> {
    let params = build_params(&args)?;
    info!(
        "Resolved parameters: samples={}, seed={}, top-n={}, atom-mode={}",
        params.samples, params.seed, params.top_n, params.atom_mode
    );

    let receptor = read_structure(args.receptor.as_deref())?;
    let ligand = read_structure(args.ligand.as_deref())?;

    let progress_handler = CliProgressHandler::for_run(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Docking {} sampled poses...", params.samples);
    let result = tokio::task::block_in_place(|| {
        dock::run_with_reporter(receptor.as_deref(), ligand.as_deref(), &params, &reporter)
    })?;

    for complex in &result.complexes {
        print!("{}", format_pose_table(complex));
        if complex.top_poses.is_empty() {
            warn!("Complex '{}' produced no poses.", complex.label);
        }
    }

    if let Some(path) = &args.output {
        write_result_json(path, &result)?;
        println!("✓ Result written to: {}", path.display());
    }
    if let Some(path) = &args.scores {
        write_scores_csv(path, &result)?;
        println!("✓ Pose scores written to: {}", path.display());
    }
    if let Some(prefix) = &args.pdb_prefix {
        for complex in &result.complexes {
            let written = write_pose_pdbs(prefix, complex)?;
            println!(
                "✓ {} pose structure(s) written with prefix: {}",
                written.len(),
                prefix.display()
            );
        }
    }

    Ok(())
}

fn read_structure(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    info!("Loading structure from {:?}", path);
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| CliError::file(path, e))
}

fn format_pose_table(complex: &DockingComplex) -> String {
    let mut table = format!(
        "\n{}\n{:>4}  {:>10}  {:>8}  {:>10}  {:>26}\n",
        complex.label, "rank", "score", "contacts", "clash", "translation (x, y, z)"
    );
    for (i, pose) in complex.top_poses.iter().enumerate() {
        let t = pose.translation();
        table.push_str(&format!(
            "{:>4}  {:>10.3}  {:>8}  {:>10.3}  {:>8.2}, {:>7.2}, {:>7.2}\n",
            i + 1,
            pose.score,
            pose.contact_count,
            pose.clash_penalty,
            t.x,
            t.y,
            t.z
        ));
    }
    table
}

fn write_result_json(path: &Path, result: &DockingResult) -> Result<()> {
    let file = File::create(path).map_err(|e| CliError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result).map_err(|e| CliError::file(path, e))?;
    writer.flush().map_err(|e| CliError::file(path, e))
}

#[derive(Debug, Serialize)]
struct PoseRow<'a> {
    complex: &'a str,
    rank: usize,
    score: f64,
    contacts: usize,
    clash: f64,
    qx: f64,
    qy: f64,
    qz: f64,
    qw: f64,
    tx: f64,
    ty: f64,
    tz: f64,
}

fn write_scores_csv(path: &Path, result: &DockingResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CliError::file(path, e))?;
    for complex in &result.complexes {
        for (i, pose) in complex.top_poses.iter().enumerate() {
            let q = pose.rotation();
            let t = pose.translation();
            writer
                .serialize(PoseRow {
                    complex: &complex.label,
                    rank: i + 1,
                    score: pose.score,
                    contacts: pose.contact_count,
                    clash: pose.clash_penalty,
                    qx: q.i,
                    qy: q.j,
                    qz: q.k,
                    qw: q.w,
                    tx: t.x,
                    ty: t.y,
                    tz: t.z,
                })
                .map_err(|e| CliError::file(path, e))?;
        }
    }
    writer.flush().map_err(|e| CliError::file(path, e))
}

fn pose_pdb_path(prefix: &Path, rank: usize) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!("-{}.pdb", rank));
    PathBuf::from(name)
}

fn write_pose_pdbs(prefix: &Path, complex: &DockingComplex) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(complex.top_poses.len());
    for (i, pose) in complex.top_poses.iter().enumerate() {
        let Some(ligand) = complex.posed_ligand(i) else {
            continue;
        };
        let path = pose_pdb_path(prefix, i + 1);
        info!(
            "Writing pose {} (score: {:.3}) to {:?}",
            i + 1,
            pose.score,
            &path
        );
        pdb::write_complex_path(&path, &complex.receptor, &ligand)
            .map_err(|e| CliError::file(&path, e))?;
        written.push(path);
    }
    Ok(written)
}
