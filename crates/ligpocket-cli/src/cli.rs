use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ligpocket - extract the residues surrounding a bound ligand from a PDB structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a ligand and the residues of its chain within a distance cutoff to a new PDB file.
    Extract(ExtractArgs),
    /// List the hetero groups (ligands, ions, cofactors) of a structure, waters excluded.
    Ligands(LigandsArgs),
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Chain identifier of the ligand, e.g. 'A'.
    #[arg(short, long, value_name = "CHAIN")]
    pub chain: Option<char>,

    /// Residue name of the ligand, e.g. 'EST'.
    #[arg(short, long = "ligand", value_name = "RESNAME")]
    pub ligand: Option<String>,

    /// Neighbor search radius in Angstroms [default: 5.0].
    #[arg(short, long, value_name = "ANGSTROMS")]
    pub distance_cutoff: Option<f64>,

    /// Path for the output PDB file.
    /// Defaults to '<input stem>_output.pdb' in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S extraction.distance-cutoff=4.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `ligands` subcommand.
#[derive(Args, Debug)]
pub struct LigandsArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extract_with_short_flags() {
        let cli = Cli::parse_from([
            "ligpocket", "extract", "-i", "1a52.pdb", "-c", "A", "-l", "EST", "-d", "4.5", "-o",
            "pocket.pdb",
        ]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(args.input, PathBuf::from("1a52.pdb"));
        assert_eq!(args.chain, Some('A'));
        assert_eq!(args.ligand.as_deref(), Some("EST"));
        assert_eq!(args.distance_cutoff, Some(4.5));
        assert_eq!(args.output, Some(PathBuf::from("pocket.pdb")));
        assert!(args.set_values.is_empty());
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "ligpocket",
            "ligands",
            "-i",
            "x.pdb",
            "-vv",
            "--log-file",
            "run.log",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(cli.command, Commands::Ligands(_)));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ligpocket", "-q", "-v", "ligands", "-i", "x.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        let result = Cli::try_parse_from(["ligpocket", "extract", "-i", "x.pdb", "-c", "AB"]);
        assert!(result.is_err());
    }
}
