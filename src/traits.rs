use anyhow::Result;

/// LineWrite trait provides a sink for rendered report lines.
pub trait LineWrite {
    /// Writes one line; the sink appends the line terminator.
    ///
    /// # Arguments
    /// * `line` - The text of the line, without a trailing newline.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flushes buffered lines to the underlying target.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// LineExport trait renders a report into a line sink.
pub trait LineExport {
    /// Exports the report line by line.
    ///
    /// # Arguments
    /// * `writer` - The sink receiving the rendered lines.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    fn export(&self, writer: &mut impl LineWrite) -> Result<()>;
}

/// AuthorSource trait supplies the author name searched for in a run.
pub trait AuthorSource {
    fn author(&mut self) -> Result<String>;
}
