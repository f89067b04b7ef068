//! Per-trial CSV data log
//!
//! One row per completed trial, header first. The writer is owned by the
//! session for the whole run and flushed on `close` or drop.

use crate::error::ExperimentResult;
use crate::experiment::trial::TrialRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str =
    "stimulus_emotion,stimulus_color,distractor,congruence,key,correct,appear_time,press_time,rt";

/// Fields collected by the startup dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub id: String,
    pub name: String,
}

impl ParticipantInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ParticipantInfo {
            id: id.into(),
            name: name.into(),
        }
    }

    /// `{id}_{name}.csv`
    pub fn data_file_name(&self) -> String {
        format!("{}_{}.csv", self.id, self.name)
    }
}

/// Append-only trial log
pub struct DataLog<W: Write> {
    writer: W,
    rows: usize,
}

impl DataLog<BufWriter<File>> {
    /// Create (truncating) the data file for a participant in `dir`
    pub fn create(dir: &Path, participant: &ParticipantInfo) -> ExperimentResult<(Self, PathBuf)> {
        let path = dir.join(participant.data_file_name());
        let file = File::create(&path)?;
        tracing::info!(path = %path.display(), "data file created");
        Ok((DataLog::new(BufWriter::new(file))?, path))
    }
}

impl<W: Write> DataLog<W> {
    /// Wrap a writer and emit the header row
    pub fn new(mut writer: W) -> ExperimentResult<Self> {
        writeln!(writer, "{}", HEADER)?;
        Ok(DataLog { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &TrialRecord) -> ExperimentResult<()> {
        writeln!(self.writer, "{}", format_row(record))?;
        self.rows += 1;
        Ok(())
    }

    /// Number of trial rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the writer
    pub fn close(mut self) -> ExperimentResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Booleans are written `True`/`False` to stay compatible with existing
/// analysis scripts.
pub fn format_row(record: &TrialRecord) -> String {
    let c = &record.condition;
    format!(
        "{},{},{},{},{},{},{},{},{}",
        c.emotion,
        c.color,
        c.distractor,
        record.congruence.as_str(),
        record.key,
        if record.correct { "True" } else { "False" },
        record.appear_time,
        record.press_time,
        record.rt
    )
}
