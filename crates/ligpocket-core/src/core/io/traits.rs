use crate::core::models::system::{ResidueView, Structure};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A structure file format that can be loaded into and saved from a [`Structure`].
///
/// Formats implement the stream-based methods. The `*_path` variants are provided
/// and wrap the file in a buffered reader or writer. Path writes replace the
/// destination only after the whole file has been written.
pub trait MolecularFile {
    /// Format-specific data outside the coordinate records, such as header lines.
    type Metadata;

    type Error: Error + From<io::Error>;

    /// Parses a whole structure from `reader`.
    ///
    /// # Errors
    ///
    /// Fails on malformed records or when reading from `reader` fails.
    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Serializes every atom of `structure`, preceded by `metadata`.
    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Serializes only the residues for which `select` returns `true`.
    ///
    /// `select` sees each residue of each model once, in file order. Rejected
    /// residues leave no trace in the output.
    fn write_selected_to<F>(
        structure: &Structure,
        writer: &mut impl Write,
        select: F,
    ) -> Result<(), Self::Error>
    where
        F: Fn(&ResidueView<'_>) -> bool;

    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        structure: &Structure,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        write_atomically(path.as_ref(), |writer| {
            Self::write_to(structure, metadata, writer)
        })
    }

    /// Writes the selected residues to `path`, replacing any existing file.
    ///
    /// On error the previous contents of `path` are left as they were.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be created or a write fails.
    fn write_selected_to_path<P, F>(
        structure: &Structure,
        path: P,
        select: F,
    ) -> Result<(), Self::Error>
    where
        P: AsRef<Path>,
        F: Fn(&ResidueView<'_>) -> bool,
    {
        write_atomically(path.as_ref(), |writer| {
            Self::write_selected_to(structure, writer, select)
        })
    }
}

/// Runs `write_body` against a temporary file next to `path`, then renames it over `path`.
///
/// The temporary file is removed if `write_body` fails.
fn write_atomically<E>(
    path: &Path,
    write_body: impl FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<(), E>,
) -> Result<(), E>
where
    E: From<io::Error>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(&mut file);
        write_body(&mut writer)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use std::fs;
    use tempfile::tempdir;

    /// Emits one record and then fails, like a disk filling up mid-write.
    struct InterruptedFormat;

    impl MolecularFile for InterruptedFormat {
        type Metadata = ();
        type Error = io::Error;

        fn read_from(_reader: &mut impl BufRead) -> Result<(Structure, ()), io::Error> {
            Ok((Structure::new(), ()))
        }

        fn write_to(_: &Structure, _: &(), writer: &mut impl Write) -> Result<(), io::Error> {
            writer.write_all(b"ATOM      1  N   ALA A   1\n")?;
            Err(io::Error::other("no space left on device"))
        }

        fn write_selected_to<F>(
            structure: &Structure,
            writer: &mut impl Write,
            _select: F,
        ) -> Result<(), io::Error>
        where
            F: Fn(&ResidueView<'_>) -> bool,
        {
            Self::write_to(structure, &(), writer)
        }
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn failed_write_keeps_the_previous_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("pocket.pdb");
        fs::write(&output, "END\n").unwrap();

        let structure = Structure::new();
        let selected = InterruptedFormat::write_selected_to_path(&structure, &output, |_| true);
        assert!(selected.is_err());
        let whole = InterruptedFormat::write_to_path(&structure, &(), &output);
        assert!(whole.is_err());

        assert_eq!(fs::read_to_string(&output).unwrap(), "END\n");
        assert_eq!(file_names(dir.path()), vec!["pocket.pdb".to_string()]);
    }

    #[test]
    fn failed_write_to_a_new_path_creates_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("pocket.pdb");

        let structure = Structure::new();
        let result = InterruptedFormat::write_selected_to_path(&structure, &output, |_| true);
        assert!(result.is_err());
        assert!(file_names(dir.path()).is_empty());
    }

    #[test]
    fn successful_write_replaces_the_previous_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("pocket.pdb");
        fs::write(&output, "stale contents\n").unwrap();

        PdbFile::write_selected_to_path(&Structure::new(), &output, |_| true).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "END\n");
        assert_eq!(file_names(dir.path()), vec!["pocket.pdb".to_string()]);
    }
}
