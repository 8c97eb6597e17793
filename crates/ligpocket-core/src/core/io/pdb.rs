use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, RecordKind};
use crate::core::models::ids::{ModelId, ResidueId};
use crate::core::models::system::{ResidueView, Structure};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Minimum length of a coordinate record: everything up to the z coordinate.
const MIN_COORDINATE_LINE_LEN: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Records preceding the first coordinate record (HEADER, TITLE, REMARK, ...).
    pub header_lines: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| *c != ' ')
}

fn parse_int(line: &str, line_num: usize, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: Option<f64>,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        if let Some(default) = default {
            return Ok(default);
        }
    }
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Formats an atom name into the four-character name field.
///
/// Names shorter than four characters with a one-letter element start in column 14.
fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() < 4 && element.trim().len() <= 1 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

/// Cache of the residue the previous coordinate record went into.
struct CurrentResidue {
    model_id: ModelId,
    chain: char,
    sequence_number: isize,
    insertion_code: Option<char>,
    name: String,
    record: RecordKind,
    residue_id: ResidueId,
}

pub struct PdbFile;

impl PdbFile {
    fn parse_atom_line(
        line: &str,
        line_num: usize,
        record: RecordKind,
        structure: &mut Structure,
        model_id: ModelId,
        current: &mut Option<CurrentResidue>,
    ) -> Result<(), PdbError> {
        if line.len() < MIN_COORDINATE_LINE_LEN {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::LineTooShort,
            });
        }

        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::MissingRequiredField {
                    columns: "13-16".into(),
                },
            });
        }
        // Serials are renumbered on output; overflowed or hybrid-36 values read as 0.
        let serial = parse_int(line, line_num, 6, 11)
            .map(|serial| serial.max(0) as usize)
            .unwrap_or(0);
        let alt_loc = column_char(line, 16);
        let res_name = slice_and_trim(line, 17, 20);
        let chain = column_char(line, 21).unwrap_or(' ');
        let sequence_number = parse_int(line, line_num, 22, 26)?;
        let insertion_code = column_char(line, 26);
        let x = parse_float(line, line_num, 30, 38, None)?;
        let y = parse_float(line, line_num, 38, 46, None)?;
        let z = parse_float(line, line_num, 46, 54, None)?;
        let occupancy = parse_float(line, line_num, 54, 60, Some(1.0))?;
        let temp_factor = parse_float(line, line_num, 60, 66, Some(0.0))?;
        let element = slice_and_trim(line, 76, 78);
        let formal_charge = slice_and_trim(line, 78, 80);

        let same_residue = current.as_ref().is_some_and(|c| {
            c.model_id == model_id
                && c.chain == chain
                && c.sequence_number == sequence_number
                && c.insertion_code == insertion_code
                && c.name == res_name
                && c.record == record
        });

        let residue_id = if same_residue {
            current
                .as_ref()
                .map(|c| c.residue_id)
                .ok_or_else(|| PdbError::Inconsistency("Lost current residue".into()))?
        } else {
            let chain_id = structure.add_chain(model_id, chain).ok_or_else(|| {
                PdbError::Inconsistency(format!("Model for chain '{}' not found", chain))
            })?;
            let residue_id = structure
                .add_residue(chain_id, sequence_number, insertion_code, res_name, record)
                .ok_or_else(|| {
                    PdbError::Inconsistency(format!("Chain '{}' not found", chain))
                })?;
            *current = Some(CurrentResidue {
                model_id,
                chain,
                sequence_number,
                insertion_code,
                name: res_name.to_string(),
                record,
                residue_id,
            });
            residue_id
        };

        let mut atom = Atom::new(name, residue_id, Point3::new(x, y, z));
        atom.serial = serial;
        atom.record = record;
        atom.alt_loc = alt_loc;
        atom.occupancy = occupancy;
        atom.temp_factor = temp_factor;
        atom.element = element.to_string();
        atom.formal_charge = formal_charge.to_string();

        structure
            .add_atom_to_residue(residue_id, atom)
            .ok_or_else(|| {
                PdbError::Inconsistency(format!("Residue for atom {} not found", serial))
            })?;
        Ok(())
    }

    fn write_records<F>(
        structure: &Structure,
        writer: &mut impl Write,
        select: F,
    ) -> Result<(), PdbError>
    where
        F: Fn(&ResidueView<'_>) -> bool,
    {
        let multi_model = structure.model_count() > 1;

        for (_, model) in structure.models() {
            if multi_model {
                writeln!(writer, "MODEL     {:>4}", model.serial)?;
            }
            let mut serial = 1usize;

            for &chain_id in model.chains() {
                let mut last_written: Option<ResidueView<'_>> = None;

                for &residue_id in structure
                    .chain(chain_id)
                    .map(|chain| chain.residues())
                    .unwrap_or_default()
                {
                    let view = structure.residue_view(residue_id).ok_or_else(|| {
                        PdbError::Inconsistency(format!("Residue {:?} not found", residue_id))
                    })?;
                    if !select(&view) {
                        continue;
                    }

                    for &atom_id in view.residue.atoms() {
                        let atom = structure.atom(atom_id).ok_or_else(|| {
                            PdbError::Inconsistency(format!("Atom {:?} not found", atom_id))
                        })?;
                        let residue_name = view
                            .residue
                            .variant_of(atom_id)
                            .unwrap_or(&view.residue.name);
                        writeln!(
                            writer,
                            "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}{:<2}",
                            atom.record.as_str(),
                            serial % 100_000,
                            format_atom_name(&atom.name, &atom.element),
                            atom.alt_loc.unwrap_or(' '),
                            residue_name,
                            view.chain.id,
                            view.residue.sequence_number,
                            view.residue.insertion_code.unwrap_or(' '),
                            atom.position.x,
                            atom.position.y,
                            atom.position.z,
                            atom.occupancy,
                            atom.temp_factor,
                            atom.element,
                            atom.formal_charge,
                        )?;
                        serial += 1;
                    }
                    last_written = Some(view);
                }

                if let Some(view) = last_written {
                    writeln!(
                        writer,
                        "TER   {:>5}      {:>3} {}{:>4}{}",
                        serial % 100_000,
                        view.residue.name,
                        view.chain.id,
                        view.residue.sequence_number,
                        view.residue.insertion_code.unwrap_or(' '),
                    )?;
                    serial += 1;
                }
            }

            if multi_model {
                writeln!(writer, "ENDMDL")?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut structure = Structure::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_count = 0usize;
        let mut seen_coordinates = false;

        let mut current_model: Option<ModelId> = None;
        let mut current_residue: Option<CurrentResidue> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    let record = RecordKind::from_str(record_type).unwrap_or_default();
                    let model_id = *current_model
                        .get_or_insert_with(|| structure.add_model(structure.model_count() + 1));
                    Self::parse_atom_line(
                        &line,
                        line_num,
                        record,
                        &mut structure,
                        model_id,
                        &mut current_residue,
                    )?;
                    atom_count += 1;
                    seen_coordinates = true;
                }
                "MODEL" => {
                    let serial = slice_and_trim(&line, 6, line.len())
                        .split_whitespace()
                        .next()
                        .and_then(|s| s.parse::<usize>().ok())
                        .unwrap_or(structure.model_count() + 1);
                    current_model = Some(structure.add_model(serial));
                    current_residue = None;
                    seen_coordinates = true;
                }
                "ENDMDL" => {
                    current_model = None;
                    current_residue = None;
                }
                "END" => break,
                _ => {
                    if !seen_coordinates && !line.trim().is_empty() {
                        metadata.header_lines.push(line.clone());
                    }
                }
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok((structure, metadata))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }
        Self::write_records(structure, writer, |_| true)
    }

    fn write_selected_to<F>(
        structure: &Structure,
        writer: &mut impl Write,
        select: F,
    ) -> Result<(), Self::Error>
    where
        F: Fn(&ResidueView<'_>) -> bool,
    {
        Self::write_records(structure, writer, select)
    }
}
