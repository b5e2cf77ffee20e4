//! Append-only CSV outputs of a run.
//!
//! Every output file is namespaced by the run name, `<outdir>/<name>_<suffix>.csv`. The header is
//! written only when the file does not exist yet, so repeated runs with the same name extend the
//! existing files.

mod catalog;
mod presence;
mod summary;

pub use catalog::{CatalogEntry, catalog_entries};
pub use presence::{PresenceEntry, presence_entries};
pub use summary::SummaryEntry;

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// A single CSV row of an output file.
pub trait OutputEntry: Serialize {
    const HEADER: &'static [&'static str];
    const SUFFIX: &'static str;
}

pub struct EntryWriter<E> {
    path: PathBuf,
    _entry: PhantomData<E>,
}

impl<E: OutputEntry> EntryWriter<E> {
    pub fn new(outdir: &str, name: &str) -> Result<Self> {
        let path = Path::new(outdir).join(format!("{name}_{}.csv", E::SUFFIX));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = Self {
            path,
            _entry: PhantomData,
        };
        writer.init_file()?;
        Ok(writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_file(&self) -> Result<()> {
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
            Err(error) => return Err(error.into()),
        };
        Self::write_header(&mut file)
    }

    pub fn write_header(writer: &mut impl Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(E::HEADER)?;
        csv_writer.flush()?;
        Ok(())
    }

    /// Serialize `entries` to `writer` without header.
    pub fn write_entries(
        writer: &mut impl Write,
        entries: impl IntoIterator<Item = E>,
    ) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for entry in entries {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Append `entries` to the output file and flush.
    pub fn append(&self, entries: impl IntoIterator<Item = E>) -> Result<()> {
        let file = fs::OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = io::BufWriter::new(file);
        Self::write_entries(&mut writer, entries)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;
    use serial_test::serial;

    fn outdir(test: &str) -> String {
        let path = std::env::temp_dir().join(format!("stabsel_readwrite_{test}"));
        let _ = fs::remove_dir_all(&path);
        path.to_string_lossy().into_owned()
    }

    fn summary(tick: usize) -> SummaryEntry {
        SummaryEntry {
            tick,
            segregating: 2,
            heterozygosity: 0.25,
            phenotype_mean: -0.5,
            phenotype_sd: 1.,
        }
    }

    #[test]
    fn header_and_entries() {
        let mut buffer = Vec::new();
        EntryWriter::<SummaryEntry>::write_header(&mut buffer).unwrap();
        EntryWriter::write_entries(&mut buffer, [summary(1), summary(2)]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "tick,segregating,heterozygosity,phenotype_mean,phenotype_sd\n\
             1,2,0.25,-0.5,1.0\n\
             2,2,0.25,-0.5,1.0\n"
        );
    }

    #[test]
    #[serial]
    fn header_written_once() {
        let outdir = outdir("header_written_once");

        let writer = EntryWriter::<SummaryEntry>::new(&outdir, "run").unwrap();
        writer.append([summary(1)]).unwrap();
        assert!(writer.path().ends_with("run_summary.csv"));

        let reopened = EntryWriter::<SummaryEntry>::new(&outdir, "run").unwrap();
        reopened.append([summary(2)]).unwrap();

        let content = fs::read_to_string(reopened.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tick,"));
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));

        fs::remove_dir_all(&outdir).unwrap();
    }

    #[test]
    #[serial]
    fn unwritable_outdir() {
        let outdir = outdir("unwritable_outdir");
        fs::create_dir_all(&outdir).unwrap();
        let blocker = Path::new(&outdir).join("occupied");
        fs::write(&blocker, "not a directory").unwrap();
        let blocker = blocker.to_string_lossy().into_owned();

        assert!(matches!(
            EntryWriter::<SummaryEntry>::new(&blocker, "run"),
            Err(SimulationError::IoError(_))
        ));

        let writer = EntryWriter::<SummaryEntry>::new(&outdir, "run").unwrap();
        fs::remove_file(writer.path()).unwrap();
        fs::create_dir(writer.path()).unwrap();
        assert!(matches!(
            writer.append([summary(1)]),
            Err(SimulationError::IoError(_))
        ));

        fs::remove_dir_all(&outdir).unwrap();
    }
}
