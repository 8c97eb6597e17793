use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::system::Structure;
use crate::engine::config::{ExtractionConfig, ExtractionConfigBuilder};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search::{find_ligand_atoms, find_neighbor_residues};
use crate::engine::selector::InteractionSelector;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const INPUT_EXTENSION: &str = "pdb";
const OUTPUT_SUFFIX: &str = "_output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub output_path: PathBuf,
    pub ligand_atom_count: usize,
    pub neighbor_residue_count: usize,
    /// Residues written across all models, ligand copies included.
    pub written_residue_count: usize,
}

/// Checks that `path` names a PDB file, by extension and ignoring case.
pub fn validate_input_path(path: &Path) -> Result<(), EngineError> {
    let is_pdb = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION));
    if is_pdb {
        Ok(())
    } else {
        Err(EngineError::InvalidInput {
            path: path.to_path_buf(),
            reason: format!("expected a file with the '.{}' extension", INPUT_EXTENSION),
        })
    }
}

/// Output location used when none is given: `<stem>_output.pdb` in the current
/// working directory, whatever directory the input lives in.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{}{}.{}", stem, OUTPUT_SUFFIX, INPUT_EXTENSION))
}

fn count_selected(structure: &Structure, selector: &InteractionSelector) -> usize {
    structure
        .models()
        .flat_map(|(_, model)| model.chains().iter().copied())
        .filter_map(|chain_id| structure.chain(chain_id))
        .flat_map(|chain| chain.residues().iter().copied())
        .filter_map(|residue_id| structure.residue_view(residue_id))
        .filter(|view| selector.accept_residue(view))
        .count()
}

#[instrument(skip_all, name = "extraction_workflow")]
pub fn run(
    config: &ExtractionConfig,
    reporter: &ProgressReporter,
) -> Result<ExtractionSummary, EngineError> {
    validate_input_path(&config.input_path)?;
    let output_path = config
        .output_path
        .clone()
        .unwrap_or_else(|| derive_output_path(&config.input_path));

    let structure = reporter.phase("Loading structure", || {
        info!("Reading structure from {}.", config.input_path.display());
        PdbFile::read_from_path(&config.input_path)
            .map(|(structure, _)| structure)
            .map_err(|source| EngineError::Parse {
                path: config.input_path.clone(),
                source,
            })
    })?;
    info!(
        models = structure.model_count(),
        residues = structure.residues_iter().count(),
        atoms = structure.atoms_iter().count(),
        "Structure loaded."
    );

    reporter.report(Progress::PhaseStart {
        name: "Searching binding site",
    });
    let ligand_atoms = find_ligand_atoms(&structure, config.chain_id, &config.ligand_resname);
    if ligand_atoms.is_empty() {
        warn!(
            "Ligand '{}' was not found in chain '{}'; the output will contain no residues.",
            config.ligand_resname, config.chain_id
        );
    }
    let neighbors = find_neighbor_residues(
        &structure,
        &ligand_atoms,
        config.chain_id,
        &config.ligand_resname,
        config.distance_cutoff,
    );
    if !ligand_atoms.is_empty() && neighbors.is_empty() {
        warn!(
            "No residue of chain '{}' lies within {:.2} A of ligand '{}'.",
            config.chain_id, config.distance_cutoff, config.ligand_resname
        );
    }
    reporter.report(Progress::Message(format!(
        "{} ligand atoms, {} neighbor residues",
        ligand_atoms.len(),
        neighbors.len()
    )));
    reporter.report(Progress::PhaseFinish);

    let selector =
        InteractionSelector::new(config.chain_id, config.ligand_resname.as_str(), neighbors);
    let written_residue_count = count_selected(&structure, &selector);

    reporter.phase("Writing output", || {
        PdbFile::write_selected_to_path(&structure, &output_path, |view| {
            selector.accept_residue(view)
        })
        .map_err(|source| EngineError::Write {
            path: output_path.clone(),
            source,
        })
    })?;
    info!(
        "Wrote {} residues to {}.",
        written_residue_count,
        output_path.display()
    );

    Ok(ExtractionSummary {
        output_path,
        ligand_atom_count: ligand_atoms.len(),
        neighbor_residue_count: selector.neighbor_residues().len(),
        written_residue_count,
    })
}

/// Extracts the residues of `chain` within `distance_cutoff` Angstroms of the ligand
/// `ligand_resname`, together with the ligand, into a new PDB file.
///
/// When `output_path` is `None` the file is written to
/// [`derive_output_path`]`(input_path)`. Exactly one file is written on success and
/// none when the input is rejected or cannot be parsed.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a non-`.pdb` input path,
/// [`EngineError::Config`] for an invalid cutoff or blank residue name,
/// [`EngineError::Parse`] when the input cannot be read, and
/// [`EngineError::Write`] when the output cannot be written.
pub fn get_protein_ligand_interaction_pdb(
    input_path: impl AsRef<Path>,
    chain: char,
    ligand_resname: &str,
    distance_cutoff: f64,
    output_path: Option<&Path>,
) -> Result<ExtractionSummary, EngineError> {
    let input_path = input_path.as_ref();
    validate_input_path(input_path)?;
    let config = ExtractionConfigBuilder::new()
        .input_path(input_path.to_path_buf())
        .output_path(output_path.map(Path::to_path_buf))
        .chain_id(chain)
        .ligand_resname(ligand_resname)
        .distance_cutoff(distance_cutoff)
        .build()?;
    run(&config, &ProgressReporter::new())
}
