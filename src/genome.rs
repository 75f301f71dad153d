//! Sequence dictionary: contig names and lengths.
//!
//! Loaded from a SAM-style `.dict` file (`@SQ` lines with `SN:`/`LN:` tags)
//! or from any two-column `contig\tlength` file such as a `.genome` or
//! `.fai`.

use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{EvidenceError, Result};

/// Contig lengths keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SequenceDictionary {
    lengths: FxHashMap<String, u64>,
}

impl SequenceDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dictionary from `.dict` or two-column text.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dict = Self::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim_end();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let entry = if line.starts_with('@') {
                if !line.starts_with("@SQ") {
                    continue;
                }
                parse_sq_line(line)
            } else {
                parse_length_line(line)
            };

            let (name, length) = entry.map_err(|message| EvidenceError::Parse {
                line: line_num + 1,
                message,
            })?;
            dict.insert(name, length);
        }

        Ok(dict)
    }

    /// Get the length of a contig.
    #[inline]
    pub fn contig_length(&self, contig: &str) -> Option<u64> {
        self.lengths.get(contig).copied()
    }

    /// Check if a contig exists.
    #[inline]
    pub fn has_contig(&self, contig: &str) -> bool {
        self.lengths.contains_key(contig)
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Insert a contig, replacing any earlier length.
    pub fn insert(&mut self, contig: String, length: u64) {
        self.lengths.insert(contig, length);
    }
}

fn parse_sq_line(line: &str) -> std::result::Result<(String, u64), String> {
    let mut name = None;
    let mut length = None;
    for field in line.split('\t').skip(1) {
        if let Some(sn) = field.strip_prefix("SN:") {
            name = Some(sn.to_string());
        } else if let Some(ln) = field.strip_prefix("LN:") {
            length = Some(
                ln.parse::<u64>()
                    .map_err(|_| format!("Invalid contig length: {}", ln))?,
            );
        }
    }
    match (name, length) {
        (Some(name), Some(length)) => Ok((name, length)),
        _ => Err("@SQ line requires SN and LN tags".to_string()),
    }
}

fn parse_length_line(line: &str) -> std::result::Result<(String, u64), String> {
    let mut fields = line.split('\t');
    match (fields.next(), fields.next()) {
        (Some(name), Some(length)) => {
            let length = length
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("Invalid contig length: {}", length))?;
            Ok((name.to_string(), length))
        }
        _ => Err("Dictionary line requires two columns: contig and length".to_string()),
    }
}
