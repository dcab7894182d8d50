//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::GtfError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check if a file is a gzipped by looking for the magic numbers.
///
/// Files shorter than the magic number (e.g. empty files) are not gzipped.
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let file = File::open(file_path)?;
    let mut buffer = Vec::with_capacity(GZIP_MAGIC.len());
    file.take(GZIP_MAGIC.len() as u64).read_to_end(&mut buffer)?;
    Ok(buffer == GZIP_MAGIC)
}

/// Whether output to this path should be gzip-compressed, i.e. it has a `.gz` extension.
pub fn is_gzip_path(file_path: impl AsRef<Path>) -> bool {
    file_path
        .as_ref()
        .extension()
        .map_or(false, |extension| extension == "gz")
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and gzip-compressed
/// input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. Gzip-compressed files are detected from
    /// their first bytes and uncompressed automatically.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped_file(&self.filepath)? {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

#[derive(Debug)]
enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This abstracts writing both plaintext and gzip-compressed files. Output to a file
/// is all-or-nothing: everything is first written to a temporary file next to the
/// destination, which then replaces the destination only once writing succeeded.
#[derive(Debug)]
pub struct OutputFile {
    destination: OutputDestination,
    pub header: Option<Vec<String>>,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. If the file extension is `.gz`, the
    /// output is gzip-compressed.
    /// * `header` - Optional header lines (e.g. `#!genome-build GRCh38`), written
    /// as-is before anything else.
    pub fn new(filepath: impl Into<PathBuf>, header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
            header,
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout(header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::Stdout,
            header,
        }
    }

    fn write_header<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(lines) = &self.header {
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }

    /// Write the header, then everything `write_body` writes, to this output.
    ///
    /// If `write_body` or any write fails, the error is returned and an output
    /// file is neither created nor modified.
    pub fn write_with<F>(&self, write_body: F) -> Result<(), GtfError>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), GtfError>,
    {
        match &self.destination {
            OutputDestination::Stdout => {
                let mut writer = BufWriter::new(io::stdout().lock());
                self.write_header(&mut writer)?;
                write_body(&mut writer)?;
                writer.flush()?;
            }
            OutputDestination::File(path) => {
                let temp = temporary_sibling(path)?;
                let temp = if is_gzip_path(path) {
                    let mut writer = BufWriter::new(GzEncoder::new(temp, Compression::default()));
                    self.write_header(&mut writer)?;
                    write_body(&mut writer)?;
                    writer.into_inner().map_err(|e| e.into_error())?.finish()?
                } else {
                    let mut writer = BufWriter::new(temp);
                    self.write_header(&mut writer)?;
                    write_body(&mut writer)?;
                    writer.into_inner().map_err(|e| e.into_error())?
                };
                temp.persist(path).map_err(|e| e.error)?;
            }
        }
        Ok(())
    }
}

/// Create a temporary file in the same directory as `path`, so it can be
/// renamed over `path`.
fn temporary_sibling(path: &Path) -> io::Result<NamedTempFile> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(directory)?;

    // temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    #[test]
    fn test_is_gzip_path() {
        assert!(is_gzip_path("out.gtf.gz"));
        assert!(is_gzip_path("some/dir/out.gz"));
        assert!(!is_gzip_path("out.gtf"));
        assert!(!is_gzip_path("gz"));
    }

    #[test]
    fn test_gzipped_detection() {
        assert!(is_gzipped_file("tests_data/unsorted.gtf.gz").unwrap());
        assert!(!is_gzipped_file("tests_data/unsorted.gtf").unwrap());

        let empty = NamedTempFile::new().unwrap();
        assert!(!is_gzipped_file(empty.path()).unwrap());
    }

    #[test]
    fn test_gzipped_input_matches_plaintext() {
        let plain: Vec<String> = InputFile::new("tests_data/unsorted.gtf")
            .reader()
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        let gzipped: Vec<String> = InputFile::new("tests_data/unsorted.gtf.gz")
            .reader()
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(!plain.is_empty());
        assert_eq!(plain, gzipped);
    }

    #[test]
    fn test_write_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gtf");
        let output = OutputFile::new(&path, Some(vec!["#!genome-build test".to_string()]));
        output
            .write_with(|writer| {
                writeln!(writer, "body")?;
                Ok(())
            })
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "#!genome-build test\nbody\n");
    }

    #[test]
    fn test_write_with_gzip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gtf.gz");
        OutputFile::new(&path, None)
            .write_with(|writer| {
                writeln!(writer, "line one")?;
                writeln!(writer, "line two")?;
                Ok(())
            })
            .unwrap();
        assert!(is_gzipped_file(&path).unwrap());
        let lines: Vec<String> = InputFile::new(&path)
            .reader()
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gtf");
        let result = OutputFile::new(&path, None).write_with(|writer| {
            writeln!(writer, "partial")?;
            Err(GtfError::MissingAttribute {
                attribute: "gene_id",
                record: "record".to_string(),
            })
        });
        assert!(result.is_err());
        assert!(!path.exists());
        // and no stray temporary files
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gtf");
        std::fs::write(&path, "previous\n").unwrap();
        let result = OutputFile::new(&path, None).write_with(|writer| {
            writeln!(writer, "partial")?;
            Err(GtfError::MalformedCoordinate {
                field: "start",
                value: "x".to_string(),
                record: "record".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous\n");
    }
}
