//! Output strategy selection and the run's single output sink.
//!
//! The strategy is a pure function of the destination path, chosen once
//! before anything is written. The sink wraps whichever backend was chosen
//! and enforces the rules both share: the header comes at most once and
//! only before records, every record has the run's kind, and records on
//! contigs missing from the sequence dictionary are refused.
//!
//! `close` and `abort` consume the sink, so nothing can be written after
//! either. Only `close` writes the index of an indexed output.

use super::output::{IndexedEvidenceWriter, PlainEvidenceWriter};
use crate::config::{has_block_compressed_extension, TABIX_INDEX_EXTENSION};
use crate::error::{EvidenceError, Result};
use crate::evidence::{EvidenceKind, EvidenceRecord};
use crate::genome::SequenceDictionary;
use log::debug;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which writer backend a destination gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStrategy {
    /// BGZF-compressed with a tabix index next to it.
    Indexed,
    /// Uncompressed text, no index.
    Plain,
}

impl OutputStrategy {
    /// Pick the strategy for a destination path.
    pub fn for_path(path: &Path) -> Self {
        if has_block_compressed_extension(&path.to_string_lossy()) {
            OutputStrategy::Indexed
        } else {
            OutputStrategy::Plain
        }
    }
}

impl fmt::Display for OutputStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStrategy::Indexed => write!(f, "indexed"),
            OutputStrategy::Plain => write!(f, "plain"),
        }
    }
}

/// Path of the tabix index written alongside a compressed output.
pub fn index_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TABIX_INDEX_EXTENSION);
    PathBuf::from(name)
}

enum Backend {
    Indexed(IndexedEvidenceWriter<File>),
    Plain(PlainEvidenceWriter<File>),
}

/// What a closed sink produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSummary {
    pub strategy: OutputStrategy,
    pub records_written: usize,
    pub header_written: bool,
    pub index_path: Option<PathBuf>,
}

/// The open destination of a run.
pub struct OutputSink<'d> {
    backend: Backend,
    strategy: OutputStrategy,
    path: PathBuf,
    kind: EvidenceKind,
    dictionary: Option<&'d SequenceDictionary>,
    header_written: bool,
    records_written: usize,
}

impl<'d> OutputSink<'d> {
    /// Create the destination file and open the chosen backend.
    ///
    /// The destination is checked first; an unusable path is a
    /// configuration error and leaves nothing on disk.
    pub fn create(
        strategy: OutputStrategy,
        path: &Path,
        kind: EvidenceKind,
        dictionary: Option<&'d SequenceDictionary>,
        compression_level: u8,
    ) -> Result<Self> {
        check_destination(path)?;

        let file = File::create(path)?;
        if strategy == OutputStrategy::Indexed {
            remove_stale_index(&index_path_for(path))?;
        }
        let backend = match strategy {
            OutputStrategy::Indexed => Backend::Indexed(IndexedEvidenceWriter::new(
                file,
                index_path_for(path),
                kind,
                compression_level,
            )?),
            OutputStrategy::Plain => Backend::Plain(PlainEvidenceWriter::new(file)),
        };
        debug!("Opened {} sink at {}", strategy, path.display());

        Ok(Self {
            backend,
            strategy,
            path: path.to_path_buf(),
            kind,
            dictionary,
            header_written: false,
            records_written: 0,
        })
    }

    /// Write the header. Allowed once, before the first record.
    pub fn write_header(&mut self, header: &str) -> Result<()> {
        if self.header_written || self.records_written > 0 {
            return Err(EvidenceError::Internal(
                "header must be written once, before any record".to_string(),
            ));
        }
        match &mut self.backend {
            Backend::Indexed(w) => w.write_header(header)?,
            Backend::Plain(w) => w.write_header(header)?,
        }
        self.header_written = true;
        Ok(())
    }

    /// Append one record.
    pub fn add(&mut self, record: &EvidenceRecord) -> Result<()> {
        if record.kind() != self.kind {
            return Err(EvidenceError::MixedEvidenceKinds {
                expected: self.kind.type_name(),
                found: record.kind().type_name(),
            });
        }
        if let Some(dict) = self.dictionary {
            let (contig, _, _) = record.locus();
            if !dict.has_contig(contig) {
                return Err(EvidenceError::InvalidRecord(format!(
                    "contig '{}' is not in the sequence dictionary",
                    contig
                )));
            }
        }

        match &mut self.backend {
            Backend::Indexed(w) => w.add(record)?,
            Backend::Plain(w) => w.add(record)?,
        }
        self.records_written += 1;
        Ok(())
    }

    /// Flush, finalize compression and indexing, and release the file.
    pub fn close(self) -> Result<SinkSummary> {
        let finalize = |source| EvidenceError::Finalize {
            path: self.path.display().to_string(),
            source,
        };

        let index_path = match self.backend {
            Backend::Indexed(w) => {
                w.close().and_then(|mut f| f.flush()).map_err(finalize)?;
                Some(index_path_for(&self.path))
            }
            Backend::Plain(w) => {
                w.close().and_then(|mut f| f.flush()).map_err(finalize)?;
                None
            }
        };

        Ok(SinkSummary {
            strategy: self.strategy,
            records_written: self.records_written,
            header_written: self.header_written,
            index_path,
        })
    }

    /// Release the destination after a failed run.
    ///
    /// What was written is flushed but no index is produced, so a failed
    /// run never leaves a complete-looking indexed output behind.
    pub fn abort(self) -> Result<()> {
        debug!(
            "Aborting {} sink at {} after {} records",
            self.strategy,
            self.path.display(),
            self.records_written
        );
        match self.backend {
            Backend::Indexed(w) => w.abort().and_then(|mut f| f.flush())?,
            Backend::Plain(w) => w.close().and_then(|mut f| f.flush())?,
        }
        Ok(())
    }
}

/// Remove an index left by an earlier run; it no longer describes the output.
fn remove_stale_index(index_path: &Path) -> Result<()> {
    match fs::remove_file(index_path) {
        Ok(()) => {
            debug!("Removed stale index {}", index_path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Reject destinations that cannot be created as a file.
fn check_destination(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(EvidenceError::Config("Output path is empty".to_string()));
    }
    if path.is_dir() {
        return Err(EvidenceError::Config(format!(
            "Output path {} is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(EvidenceError::Config(format!(
                "Output directory {} does not exist",
                parent.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sr(line: &str) -> EvidenceRecord {
        EvidenceKind::SplitRead.decode(line).unwrap()
    }

    #[test]
    fn test_strategy_for_path() {
        assert_eq!(
            OutputStrategy::for_path(Path::new("out.SR.txt.gz")),
            OutputStrategy::Indexed
        );
        assert_eq!(
            OutputStrategy::for_path(Path::new("out.SR.txt")),
            OutputStrategy::Plain
        );
        assert_eq!(
            OutputStrategy::for_path(Path::new("/tmp/gz/out.txt")),
            OutputStrategy::Plain
        );
    }

    #[test]
    fn test_index_path_for() {
        assert_eq!(
            index_path_for(Path::new("dir/out.SR.txt.gz")),
            PathBuf::from("dir/out.SR.txt.gz.tbi")
        );
    }

    #[test]
    fn test_unusable_destination() {
        let dir = tempfile::tempdir().unwrap();

        let err = OutputSink::create(
            OutputStrategy::Plain,
            dir.path(),
            EvidenceKind::SplitRead,
            None,
            4,
        )
        .err()
        .unwrap();
        assert!(err.is_config());

        let missing = dir.path().join("nope").join("out.SR.txt");
        let err = OutputSink::create(
            OutputStrategy::Plain,
            &missing,
            EvidenceKind::SplitRead,
            None,
            4,
        )
        .err()
        .unwrap();
        assert!(err.is_config());
        assert!(!missing.exists());
    }

    #[test]
    fn test_header_after_record_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt");
        let mut sink =
            OutputSink::create(OutputStrategy::Plain, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();

        sink.add(&sr("chr1\t1\tleft\t1\tS1")).unwrap();
        let err = sink.write_header("#late").unwrap_err();
        assert!(matches!(err, EvidenceError::Internal(_)));
    }

    #[test]
    fn test_second_header_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt");
        let mut sink =
            OutputSink::create(OutputStrategy::Plain, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();

        sink.write_header("#one").unwrap();
        assert!(sink.write_header("#two").is_err());
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt");
        let mut sink =
            OutputSink::create(OutputStrategy::Plain, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();

        let baf = EvidenceKind::Baf.decode("chr1\t1\t0.5\tS1").unwrap();
        let err = sink.add(&baf).unwrap_err();
        assert!(matches!(err, EvidenceError::MixedEvidenceKinds { .. }));
    }

    #[test]
    fn test_dictionary_contig_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt");
        let mut dict = SequenceDictionary::new();
        dict.insert("chr1".to_string(), 1000);

        let mut sink = OutputSink::create(
            OutputStrategy::Plain,
            &path,
            EvidenceKind::SplitRead,
            Some(&dict),
            4,
        )
        .unwrap();

        sink.add(&sr("chr1\t1\tleft\t1\tS1")).unwrap();
        let err = sink.add(&sr("chrZ\t1\tleft\t1\tS1")).unwrap_err();
        assert!(matches!(err, EvidenceError::InvalidRecord(_)));
    }

    #[test]
    fn test_plain_close_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt");
        let mut sink =
            OutputSink::create(OutputStrategy::Plain, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();
        sink.add(&sr("chr1\t1\tleft\t1\tS1")).unwrap();
        let summary = sink.close().unwrap();

        assert_eq!(summary.records_written, 1);
        assert!(!summary.header_written);
        assert_eq!(summary.index_path, None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "chr1\t1\tleft\t1\tS1\n");
    }

    #[test]
    fn test_indexed_abort_leaves_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt.gz");
        let mut sink =
            OutputSink::create(OutputStrategy::Indexed, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();
        sink.add(&sr("chr1\t1\tleft\t1\tS1")).unwrap();
        sink.abort().unwrap();

        assert!(path.exists());
        assert!(!index_path_for(&path).exists());
    }

    #[test]
    fn test_indexed_create_removes_stale_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt.gz");
        fs::write(index_path_for(&path), b"old index").unwrap();

        let sink =
            OutputSink::create(OutputStrategy::Indexed, &path, EvidenceKind::SplitRead, None, 4)
                .unwrap();
        assert!(!index_path_for(&path).exists());
        sink.abort().unwrap();
        assert!(!index_path_for(&path).exists());
    }

    #[test]
    fn test_indexed_close_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.SR.txt.gz");
        let mut sink =
            OutputSink::create(OutputStrategy::Indexed, &path, EvidenceKind::SplitRead, None, 6)
                .unwrap();
        sink.add(&sr("chr1\t1\tleft\t1\tS1")).unwrap();
        let summary = sink.close().unwrap();

        let index_path = summary.index_path.unwrap();
        assert!(index_path.exists());
        assert!(fs::metadata(&index_path).unwrap().len() > 0);
    }
}
