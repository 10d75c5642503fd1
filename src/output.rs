//! Output sinks for rendered lines.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::errors::MosaicError;

/// Destination for rendered lines.
pub trait LineSink {
    fn emit(&mut self, line: &str) -> Result<(), MosaicError>;

    fn finish(&mut self) -> Result<(), MosaicError> {
        Ok(())
    }
}

/// OutputBuffer: collects lines in memory for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub lines: Vec<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineSink for OutputBuffer {
    fn emit(&mut self, line: &str) -> Result<(), MosaicError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// FileSink: writes each line followed by `\n` to a file.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> Result<Self, MosaicError> {
        let file = File::create(path).map_err(|source| write_error(path, source))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn emit(&mut self, line: &str) -> Result<(), MosaicError> {
        writeln!(self.writer, "{line}").map_err(|source| write_error(&self.path, source))
    }

    fn finish(&mut self) -> Result<(), MosaicError> {
        self.writer
            .flush()
            .map_err(|source| write_error(&self.path, source))
    }
}

/// StdoutSink: writes lines to stdout for previews.
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit(&mut self, line: &str) -> Result<(), MosaicError> {
        writeln!(io::stdout().lock(), "{line}").map_err(|source| MosaicError::WriteOutput {
            destination: "<stdout>".into(),
            source,
        })
    }
}

/// Emits every line into `sink`, then finishes it.
pub fn write_lines<S: LineSink + ?Sized>(sink: &mut S, lines: &[String]) -> Result<(), MosaicError> {
    for line in lines {
        sink.emit(line)?;
    }
    sink.finish()
}

/// `<dir>/<stem><suffix>.txt` next to the input file.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}.txt"))
}

fn write_error(path: &Path, source: io::Error) -> MosaicError {
    MosaicError::WriteOutput {
        destination: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn output_path_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("patterns/blanket.tsv"), "_output"),
            PathBuf::from("patterns/blanket_output.txt")
        );
        assert_eq!(
            default_output_path(Path::new("input.txt"), "_output"),
            PathBuf::from("input_output.txt")
        );
    }

    #[test]
    fn dotted_directories_do_not_truncate_the_name() {
        assert_eq!(
            default_output_path(Path::new("v1.2/rows.tsv"), "_annotated"),
            PathBuf::from("v1.2/rows_annotated.txt")
        );
    }

    #[test]
    fn buffer_collects_lines() {
        let mut buffer = OutputBuffer::new();
        write_lines(&mut buffer, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(buffer.lines, vec!["a", "b"]);
    }

    #[test]
    fn file_sink_terminates_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut sink = FileSink::create(&path).unwrap();
        write_lines(&mut sink, &["one".to_string(), "two".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.txt");
        let err = FileSink::create(&path).err().unwrap();
        assert_eq!(err.code_str(), "mosaic::io::write_output");
    }
}
