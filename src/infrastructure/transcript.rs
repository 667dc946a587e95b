//! Transcript output: console plus a timestamped per-run log file
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE on the console. The log file
//! is always plain text.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use colored::Colorize;
use tracing::{debug, instrument};

use super::error::{InfraError, InfraResult};
use super::traits::TranscriptSink;
use crate::application::TranscriptLine;
use crate::config::Settings;

/// Timestamp format embedded in log file names.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// `<prefix>-<YYYYmmdd-HHMMSS>.log`
pub fn log_file_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}-{}.log", prefix, at.format(LOG_TIMESTAMP_FORMAT))
}

/// Stdout, with warnings and errors colored.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl TranscriptSink for ConsoleSink {
    fn write_line(&mut self, line: &TranscriptLine) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let message = line.message();
        match line {
            TranscriptLine::Echo(_) | TranscriptLine::Entry(_) => writeln!(out, "{}", message),
            TranscriptLine::Warning(_) => writeln!(out, "{}: {}", "Warning".yellow(), message),
            TranscriptLine::Error(_) => writeln!(out, "{}: {}", "Error".red().bold(), message),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Plain-text log file of one run.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create `<dir>/<prefix>-<timestamp>.log`, creating `dir` if needed.
    #[instrument(level = "debug")]
    pub fn create(dir: &Path, prefix: &str) -> InfraResult<Self> {
        fs::create_dir_all(dir).map_err(|source| InfraError::LogFile {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(log_file_name(prefix, Local::now()));
        let file = File::create(&path).map_err(|source| InfraError::LogFile {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened log file");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptSink for FileSink {
    fn write_line(&mut self, line: &TranscriptLine) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Fans every transcript line out to all sinks.
pub struct Transcript {
    sinks: Vec<Box<dyn TranscriptSink>>,
    echo: bool,
    log_path: Option<PathBuf>,
}

impl Transcript {
    pub fn new(echo: bool) -> Self {
        Self {
            sinks: Vec::new(),
            echo,
            log_path: None,
        }
    }

    pub fn with_sink(mut self, sink: impl TranscriptSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Console, plus the log file unless disabled in `settings`.
    pub fn from_settings(settings: &Settings) -> InfraResult<Self> {
        let mut transcript = Self::new(settings.echo).with_sink(ConsoleSink);
        if settings.log_file {
            let sink = FileSink::create(&settings.log_dir, &settings.log_prefix)?;
            transcript.log_path = Some(sink.path().to_path_buf());
            transcript = transcript.with_sink(sink);
        }
        Ok(transcript)
    }

    /// Path of the log file, if one is written.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn record(&mut self, line: &TranscriptLine) -> InfraResult<()> {
        if !self.echo && matches!(line, TranscriptLine::Echo(_)) {
            return Ok(());
        }
        for sink in &mut self.sinks {
            sink.write_line(line).map_err(|e| InfraError::io("write transcript line", e))?;
        }
        Ok(())
    }

    pub fn record_all(&mut self, lines: &[TranscriptLine]) -> InfraResult<()> {
        lines.iter().try_for_each(|line| self.record(line))
    }

    pub fn flush(&mut self) -> InfraResult<()> {
        for sink in &mut self.sinks {
            sink.flush().map_err(|e| InfraError::io("flush transcript", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct MemorySink(Rc<RefCell<Vec<String>>>);

    impl TranscriptSink for MemorySink {
        fn write_line(&mut self, line: &TranscriptLine) -> io::Result<()> {
            self.0.borrow_mut().push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn given_timestamp_when_naming_log_file_then_prefix_and_seconds() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(log_file_name("result", at), "result-20240309-070501.log");
    }

    #[test]
    fn given_echo_disabled_when_recording_then_echo_lines_dropped() {
        let memory = MemorySink::default();
        let mut transcript = Transcript::new(false).with_sink(memory.clone());

        transcript
            .record_all(&[
                TranscriptLine::Echo("LIST".into()),
                TranscriptLine::Entry("a".into()),
                TranscriptLine::Error("boom".into()),
            ])
            .unwrap();

        assert_eq!(*memory.0.borrow(), vec!["a", "Error: boom"]);
    }

    #[test]
    fn given_missing_log_dir_when_creating_file_sink_then_creates_it() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs").join("nested");

        let mut sink = FileSink::create(&log_dir, "result").unwrap();
        sink.write_line(&TranscriptLine::Warning("careful".into())).unwrap();
        sink.flush().unwrap();

        let name = sink.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("result-") && name.ends_with(".log"));
        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "Warning: careful\n");
    }
}
