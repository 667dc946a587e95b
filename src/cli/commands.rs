//! Command loop: settings, input, session and transcript wired together

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::application::Session;
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::{InfraError, InfraResult, InputSource, Transcript};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let settings = resolve_settings(cli, &cwd)?;
    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let reader = InputSource::from_arg(cli.file.clone()).open()?;
    let mut transcript = Transcript::from_settings(&settings)?;
    if let Some(path) = transcript.log_path() {
        info!(path = %path.display(), "writing log file");
    }

    let mut session = Session::new();
    let processed = run(reader, &mut session, &mut transcript)?;
    debug!(processed, directories = session.forest().len(), "done");
    Ok(())
}

/// Settings from config layers (local config in `local_dir`), then CLI flags
/// on top.
pub fn resolve_settings(cli: &Cli, local_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(local_dir))?;
    if let Some(dir) = &cli.log_dir {
        settings.log_dir = dir.clone();
    }
    if cli.no_log_file {
        settings.log_file = false;
    }
    debug!(?settings, "settings resolved");
    Ok(settings)
}

/// Feed every input line through the session into the transcript.
///
/// Returns the number of lines processed. Only I/O failures end the loop;
/// a failing command is just another transcript line. Invalid UTF-8 is
/// replaced, so such a line fails on its own.
#[instrument(level = "debug", skip_all)]
pub fn run(
    mut reader: impl BufRead,
    session: &mut Session,
    transcript: &mut Transcript,
) -> InfraResult<usize> {
    let mut processed = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| InfraError::io("read input line", e))?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        transcript.record_all(&session.execute(line))?;
        processed += 1;
    }
    transcript.flush()?;
    Ok(processed)
}
