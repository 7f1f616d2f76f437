use std::fmt;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{LevelFilter, info};
use serde::Serialize;
use shelfnest::io::SvgDocument;
use svg::Document;

use crate::EPOCH;
use crate::config::GAConfig;

pub mod cli;
pub mod output;

pub fn read_config(path: &Path) -> Result<GAConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).context("incorrect config file format")
}

/// Expands folders into the `.svg` files they contain (sorted by name), files are kept as given.
pub fn collect_svg_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for input in inputs {
        if input.is_dir() {
            let mut in_dir = fs::read_dir(input)
                .with_context(|| format!("could not read folder: {}", input.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?
                .into_iter()
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "svg"))
                .collect::<Vec<_>>();
            in_dir.sort();
            paths.extend(in_dir);
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            bail!("input does not exist: {}", input.display());
        }
    }
    Ok(paths)
}

pub fn read_documents(paths: &[PathBuf]) -> Result<Vec<SvgDocument>> {
    paths
        .iter()
        .map(|p| {
            SvgDocument::load(p).with_context(|| format!("could not read svg file: {}", p.display()))
        })
        .collect()
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open solution file: {}", path.display()))?;

    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write solution file: {}", path.display()))?;

    info!(
        "[IO] solution written to file:///{}",
        fs::canonicalize(path)?.to_str().unwrap_or("-")
    );
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!(
        "[IO] svg written to file:///{}",
        fs::canonicalize(path)?.to_str().unwrap_or("-")
    );
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:<5}] [{}] <{}> {message}",
                record.level(),
                Elapsed(EPOCH.elapsed()),
                std::thread::current().name().unwrap_or("-"),
            ))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[MAIN] epoch: {}", jiff::Timestamp::now());
    Ok(())
}

/// Time since [`EPOCH`] as `h:mm:ss.mmm`.
struct Elapsed(Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            self.0.subsec_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Duration::ZERO, "0:00:00.000"; "start")]
    #[test_case(Duration::from_millis(3_723_004), "1:02:03.004"; "hours minutes seconds")]
    #[test_case(Duration::from_secs(36_000), "10:00:00.000"; "hours are not wrapped")]
    fn elapsed_stamp(d: Duration, expected: &str) {
        assert_eq!(Elapsed(d).to_string(), expected);
    }
}
