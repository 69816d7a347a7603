use crate::{errors::ReportError, traits::LineWrite};
use anyhow::Result;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

pub struct StdOutLineWriter {
    stdout_writer: Stdout,
}

impl StdOutLineWriter {
    pub fn new() -> Self {
        StdOutLineWriter {
            stdout_writer: io::stdout(),
        }
    }
}

impl LineWrite for StdOutLineWriter {
    fn write_line(&mut self, line: &str) -> Result<()> {
        Ok(writeln!(self.stdout_writer.lock(), "{line}")?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.stdout_writer.flush()?)
    }
}

/// Writes UTF-8 lines to a file, truncating whatever it held before.
pub struct FileLineWriter {
    path: PathBuf,
    file_writer: BufWriter<File>,
}

impl FileLineWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
        Ok(FileLineWriter {
            path: path.to_path_buf(),
            file_writer: BufWriter::new(file),
        })
    }
}

impl LineWrite for FileLineWriter {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file_writer, "{line}").map_err(|e| ReportError::io(&self.path, e))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file_writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))?;
        Ok(())
    }
}
