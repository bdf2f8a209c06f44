pub mod event;
pub mod formatter;
pub mod game;
pub mod player;
pub mod position;
pub mod summarizer;
pub mod weapon;

use crate::{
    config::{Config, ConfigError},
    source::{DemoSource, OccurrenceStream},
    Result,
};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use summarizer::{CaptureSummary, MatchAnalyzer};
use tracing::{debug, warn};

/// Runs a capture through the analyzer and returns its summary.
pub fn analyze<S: DemoSource>(source: S, config: &Config) -> Result<CaptureSummary> {
    config.validate()?;
    let handler = MatchAnalyzer::new(config);
    let (header, summary) = source.parse(handler)?;
    debug!("Parsed capture of {}", header.map_name);

    Ok(summary?)
}

pub fn parse(buffer: &[u8], config: &Config) -> Result<CaptureSummary> {
    analyze(OccurrenceStream::new(buffer), config)
}

/// Writes the summary as indented JSON followed by a newline.
pub fn write_summary<W: Write>(summary: &CaptureSummary, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// The input path with its extension replaced by `.json`.
pub fn output_path(demo_path: &Path) -> core::result::Result<PathBuf, ConfigError> {
    let out_path = demo_path.with_extension("json");
    if out_path == demo_path {
        return Err(ConfigError::OutputIsInput(out_path));
    }
    Ok(out_path)
}

/// Converts a capture held in `buffer` and writes the document to `out_path`.
///
/// The output file is only created once the capture has parsed, so a failed
/// run leaves any existing document at `out_path` untouched.
pub fn convert(buffer: &[u8], out_path: &Path, config: &Config) -> Result<CaptureSummary> {
    let summary = parse(buffer, config)?;

    let out_file = File::create(out_path).map_err(|source| ConfigError::UnwritableOutput {
        path: out_path.to_path_buf(),
        source,
    })?;
    if let Err(e) = write_summary(&summary, BufWriter::new(out_file)) {
        if let Err(remove_err) = fs::remove_file(out_path) {
            warn!(
                "Failed to remove {} after write error: {}",
                out_path.display(),
                remove_err
            );
        }
        return Err(e);
    }

    Ok(summary)
}
