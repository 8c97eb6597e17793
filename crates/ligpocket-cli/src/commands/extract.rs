use crate::cli::ExtractArgs;
use crate::config::PartialExtractionConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ligpocket::engine::progress::ProgressReporter;
use ligpocket::workflows;
use tracing::{info, warn};

pub fn run(args: ExtractArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialExtractionConfig::from_file(path)?,
        None => PartialExtractionConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    println!(
        "Extracting residues within {:.2} A of '{}' in chain '{}'...",
        config.distance_cutoff, config.ligand_resname, config.chain_id
    );
    let summary = workflows::extract::run(&config, &reporter)?;

    if summary.ligand_atom_count == 0 {
        warn!("Ligand not found; wrote an empty structure.");
        println!(
            "Warning: no residue named '{}' in chain '{}'.",
            config.ligand_resname, config.chain_id
        );
        println!(
            "Hint: run 'ligpocket ligands -i {}' to list candidates.",
            config.input_path.display()
        );
    }

    println!(
        "✓ {} ligand atoms, {} neighbor residues; {} residues written to: {}",
        summary.ligand_atom_count,
        summary.neighbor_residue_count,
        summary.written_residue_count,
        summary.output_path.display()
    );
    Ok(())
}
