use crate::cli::LigandsArgs;
use crate::error::{CliError, Result};
use ligpocket::core::io::{pdb::PdbFile, traits::MolecularFile};
use ligpocket::engine::search::{HeteroGroup, list_hetero_residues};
use ligpocket::workflows::extract::validate_input_path;
use tracing::info;

fn format_row(group: &HeteroGroup, show_model: bool) -> String {
    let residue_number = match group.insertion_code {
        Some(icode) => format!("{}{}", group.sequence_number, icode),
        None => group.sequence_number.to_string(),
    };
    let row = format!(
        "{:<5} {:<7} {:>8} {:>6}",
        group.chain_id, group.name, residue_number, group.atom_count
    );
    if show_model {
        format!("{:>5} {}", group.model_serial, row)
    } else {
        row
    }
}

pub fn run(args: LigandsArgs) -> Result<()> {
    validate_input_path(&args.input)?;
    info!("Loading input structure from {:?}", &args.input);
    let (structure, _) =
        PdbFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let groups = list_hetero_residues(&structure);
    info!("Found {} hetero groups.", groups.len());
    if groups.is_empty() {
        println!("No hetero groups found in {}.", args.input.display());
        return Ok(());
    }

    let show_model = structure.model_count() > 1;
    let header = format!(
        "{:<5} {:<7} {:>8} {:>6}",
        "CHAIN", "NAME", "RESSEQ", "ATOMS"
    );
    if show_model {
        println!("{:>5} {}", "MODEL", header);
    } else {
        println!("{}", header);
    }
    for group in &groups {
        println!("{}", format_row(group, show_model));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(insertion_code: Option<char>) -> HeteroGroup {
        HeteroGroup {
            model_serial: 2,
            chain_id: 'A',
            name: "EST".to_string(),
            sequence_number: 600,
            insertion_code,
            atom_count: 20,
        }
    }

    #[test]
    fn row_lists_chain_name_number_and_atom_count() {
        assert_eq!(
            format_row(&group(None), false),
            "A     EST          600     20"
        );
    }

    #[test]
    fn row_appends_insertion_code_and_model() {
        assert_eq!(
            format_row(&group(Some('B')), true),
            "    2 A     EST         600B     20"
        );
    }
}
