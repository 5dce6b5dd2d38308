/*
    Nyx Decay, orbital lifetime of small satellites
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use csv::Writer;
use snafu::ResultExt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::{CsvSnafu, FlushSnafu, TraceError};
use crate::md::{TraceRecord, TraceSink};

/// Writes each trace record as a CSV row, with a header.
///
/// Records of all runs of a sweep go to the same writer, the `run` column tells them apart.
pub struct CsvTraceWriter<W: Write> {
    wtr: Writer<W>,
    rows: usize,
}

impl CsvTraceWriter<File> {
    /// Creates (or truncates) the file at the provided path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let wtr = Writer::from_path(path.as_ref()).context(CsvSnafu)?;
        info!("Saving decay trace to {}", path.as_ref().display());
        Ok(Self { wtr, rows: 0 })
    }
}

impl<W: Write> CsvTraceWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            wtr: Writer::from_writer(writer),
            rows: 0,
        }
    }

    /// Number of records written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, TraceError> {
        self.wtr
            .into_inner()
            .map_err(|e| e.into_error())
            .context(FlushSnafu)
    }
}

impl<W: Write> TraceSink for CsvTraceWriter<W> {
    fn handle(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        self.wtr.serialize(record).context(CsvSnafu)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TraceError> {
        self.wtr.flush().context(FlushSnafu)?;
        debug!("Wrote {} trace records", self.rows);
        Ok(())
    }
}
