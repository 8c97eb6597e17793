use ligpocket::workflows::extract::get_protein_ligand_interaction_pdb;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const PDB: &str = "\
ATOM      1  N   SER A  10       3.000   0.000   0.000  1.00 10.00           N
HETATM    2  C1  EST A 600       0.000   0.000   0.000  1.00 20.00           C
END
";

// Kept alone in this binary: it changes the process working directory.
#[test]
fn output_lands_in_working_directory_when_not_given() {
    let input_dir = tempdir().unwrap();
    let work_dir = tempdir().unwrap();
    let input = input_dir.path().join("1abc.pdb");
    fs::write(&input, PDB).unwrap();

    let previous = env::current_dir().unwrap();
    env::set_current_dir(work_dir.path()).unwrap();
    let result = get_protein_ligand_interaction_pdb(&input, 'A', "EST", 5.0, None);
    env::set_current_dir(previous).unwrap();

    let summary = result.unwrap();
    assert_eq!(summary.output_path, PathBuf::from("1abc_output.pdb"));
    assert!(work_dir.path().join("1abc_output.pdb").exists());
    assert!(!input_dir.path().join("1abc_output.pdb").exists());
}
