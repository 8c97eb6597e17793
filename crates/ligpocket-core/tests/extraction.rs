use ligpocket::core::io::pdb::PdbFile;
use ligpocket::core::io::traits::MolecularFile;
use ligpocket::engine::error::EngineError;
use ligpocket::workflows::extract::get_protein_ligand_interaction_pdb;
use std::fs;
use tempfile::tempdir;

const TWO_MODEL_PDB: &str = "\
HEADER    HORMONE RECEPTOR                        01-JAN-00   XXXX
MODEL        1
ATOM      1  N   SER A  10       4.000   0.000   0.000  1.00 10.00           N
ATOM      2  N   THR A  11      30.000   0.000   0.000  1.00 10.00           N
HETATM    3  C1  EST A 600       0.000   0.000   0.000  1.00 20.00           C
HETATM    4  O   HOH A 700       2.000   0.000   0.000  1.00 30.00           O
ATOM      5  N   MET B  10       1.000   0.000   0.000  1.00 10.00           N
ENDMDL
MODEL        2
ATOM      1  N   SER A  10       4.500   0.000   0.000  1.00 10.00           N
ATOM      2  N   THR A  11      31.000   0.000   0.000  1.00 10.00           N
HETATM    3  C1  EST A 600       0.000   0.000   0.000  1.00 20.00           C
HETATM    4  O   HOH A 700       2.000   0.000   0.000  1.00 30.00           O
ATOM      5  N   MET B  10       1.000   0.000   0.000  1.00 10.00           N
ENDMDL
END
";

#[test]
fn extraction_keeps_pocket_of_every_model() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("receptor.pdb");
    let output = dir.path().join("pocket.pdb");
    fs::write(&input, TWO_MODEL_PDB).unwrap();

    let summary =
        get_protein_ligand_interaction_pdb(&input, 'A', "EST", 5.0, Some(&output)).unwrap();

    // SER and HOH in each model; the ligand atom appears once per model.
    assert_eq!(summary.ligand_atom_count, 2);
    assert_eq!(summary.neighbor_residue_count, 4);
    assert_eq!(summary.written_residue_count, 6);

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.matches("ENDMDL").count(), 2);
    assert!(!text.contains("THR"));
    assert!(!text.contains("MET"));
    assert!(text.trim_end().ends_with("END"));

    let (written, _) = PdbFile::read_from_path(&output).unwrap();
    assert_eq!(written.model_count(), 2);
    for (_, model) in written.models() {
        assert_eq!(model.chains().len(), 1);
    }
}

#[test]
fn smaller_cutoff_drops_farther_residues() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("receptor.pdb");
    let output = dir.path().join("pocket.pdb");
    fs::write(&input, TWO_MODEL_PDB).unwrap();

    let summary =
        get_protein_ligand_interaction_pdb(&input, 'A', "EST", 4.2, Some(&output)).unwrap();
    // Model 2's SER sits at 4.5 A and falls out.
    assert_eq!(summary.neighbor_residue_count, 3);
}

#[test]
fn extension_check_precedes_parsing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("receptor.ent");
    let output = dir.path().join("pocket.pdb");
    fs::write(&input, TWO_MODEL_PDB).unwrap();

    let result = get_protein_ligand_interaction_pdb(&input, 'A', "EST", 5.0, Some(&output));
    assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    assert!(!output.exists());
}

#[test]
fn malformed_coordinates_are_reported_as_parse_errors() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.pdb");
    let output = dir.path().join("pocket.pdb");
    fs::write(
        &input,
        "ATOM      1  N   SER A  10       x.000   0.000   0.000  1.00 10.00           N\n",
    )
    .unwrap();

    let result = get_protein_ligand_interaction_pdb(&input, 'A', "EST", 5.0, Some(&output));
    assert!(matches!(result, Err(EngineError::Parse { .. })));
    assert!(!output.exists());
}
