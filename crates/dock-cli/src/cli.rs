use clap::{Args, Parser, Subcommand};
use rigidock::engine::config::AtomMode;
use std::net::SocketAddr;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Rigidock CLI - deterministic rigid-body docking of two molecular structures, locally or as an HTTP job service.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for pose scoring.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dock a ligand against a receptor and report the top-scoring diverse poses.
    Dock(DockArgs),
    /// Run the HTTP job service.
    Serve(ServeArgs),
}

/// Arguments for the `dock` subcommand.
#[derive(Args, Debug, Default)]
pub struct DockArgs {
    // --- Inputs ---
    /// Receptor structure (PDB). The built-in demo receptor is used if omitted.
    #[arg(short = 'a', long, value_name = "PATH")]
    pub receptor: Option<PathBuf>,

    /// Ligand structure (PDB). The built-in demo ligand is used if omitted.
    #[arg(short = 'b', long, value_name = "PATH")]
    pub ligand: Option<PathBuf>,

    /// Configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Parameter Overrides ---
    /// Override the number of sampled poses.
    #[arg(long, value_name = "INT")]
    pub samples: Option<usize>,

    /// Override the generator seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u32>,

    /// Override the number of poses returned.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top_n: Option<usize>,

    /// Override the atom subset used for scoring (heavy, backbone, alpha-carbon).
    #[arg(long, value_name = "MODE")]
    pub atom_mode: Option<AtomMode>,

    /// Override the half-width of the translation cube, in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub max_trans: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.w-clash=4.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    // --- Outputs ---
    /// Write the full result as JSON.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a CSV summary with one row per returned pose.
    #[arg(long, value_name = "PATH")]
    pub scores: Option<PathBuf>,

    /// Write one PDB per returned pose as PREFIX-<rank>.pdb.
    #[arg(long, value_name = "PREFIX")]
    pub pdb_prefix: Option<PathBuf>,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on. Defaults to 0.0.0.0 on $PORT, or port 8787.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Directory of static files served at `/`.
    #[arg(long, value_name = "DIR", default_value = "web")]
    pub web_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn dock_overrides_are_parsed() {
        let cli = Cli::parse_from([
            "rigidock",
            "-vv",
            "dock",
            "--receptor",
            "a.pdb",
            "--samples",
            "500",
            "-n",
            "3",
            "--atom-mode",
            "alpha-carbon",
            "-S",
            "scoring.soft=0.25",
            "-S",
            "output.dup-angle=20",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Dock(args) = cli.command else {
            panic!("expected dock subcommand");
        };
        assert_eq!(args.receptor, Some(PathBuf::from("a.pdb")));
        assert_eq!(args.ligand, None);
        assert_eq!(args.samples, Some(500));
        assert_eq!(args.top_n, Some(3));
        assert_eq!(args.atom_mode, Some(AtomMode::AlphaCarbon));
        assert_eq!(args.set_values.len(), 2);
    }

    #[test]
    fn unknown_atom_mode_is_rejected() {
        let result = Cli::try_parse_from(["rigidock", "dock", "--atom-mode", "sidechain"]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_defaults_to_web_directory() {
        let cli = Cli::parse_from(["rigidock", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(args.bind, None);
        assert_eq!(args.web_dir, PathBuf::from("web"));
    }
}
