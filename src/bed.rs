//! BED interval files supplied with `-L`.
//!
//! Only the first three columns are read; any further columns are ignored.
//! Coordinates are 0-based, half-open.

use crate::interval::Interval;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during BED parsing.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, BedError>;

/// Read every interval from a BED file.
pub fn read_intervals<P: AsRef<Path>>(path: P) -> Result<Vec<Interval>> {
    let file = File::open(path)?;
    read_from(BufReader::new(file))
}

fn read_from<R: BufRead>(reader: R) -> Result<Vec<Interval>> {
    let mut intervals = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if is_preamble(line) {
            continue;
        }
        intervals.push(parse_target(line).map_err(|message| BedError::Parse {
            line: idx + 1,
            message,
        })?);
    }
    Ok(intervals)
}

/// Blank, comment, `track` and `browser` lines carry no interval.
fn is_preamble(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

fn parse_target(line: &str) -> std::result::Result<Interval, String> {
    let mut fields = line.split('\t');
    let (Some(chrom), Some(start), Some(end)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err("expected chrom, start and end columns".to_string());
    };

    let coordinate = |s: &str, what: &str| {
        s.trim()
            .parse::<u64>()
            .map_err(|_| format!("invalid {} '{}'", what, s))
    };
    let start = coordinate(start, "start")?;
    let end = coordinate(end, "end")?;
    if start > end {
        return Err(format!("start {} is after end {}", start, end));
    }

    Ok(Interval::new(chrom, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<Interval>> {
        read_from(content.as_bytes())
    }

    #[test]
    fn test_parse_bed3() {
        let intervals = parse("chr1\t100\t200\nchr1\t300\t400\n").unwrap();

        assert_eq!(
            intervals,
            vec![Interval::new("chr1", 100, 200), Interval::new("chr1", 300, 400)]
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let intervals = parse("chr2\t5\t10\tdel1\t0\t+\n").unwrap();
        assert_eq!(intervals, vec![Interval::new("chr2", 5, 10)]);
    }

    #[test]
    fn test_skip_preamble_lines() {
        let content = "# comment\ntrack name=test\nbrowser position chr1:1-1000\n\nchr1\t100\t200\n";
        assert_eq!(parse(content).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_bed() {
        assert!(parse("chr1\t100\n").is_err());
        assert!(parse("chr1\tabc\t200\n").is_err());
    }

    #[test]
    fn test_start_after_end_reports_line() {
        let err = parse("chr1\t1\t2\nchr1\t300\t200\n").unwrap_err();
        match err {
            BedError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.bed");
        std::fs::write(&path, "chrX\t0\t50\n").unwrap();

        assert_eq!(
            read_intervals(&path).unwrap(),
            vec![Interval::new("chrX", 0, 50)]
        );
    }
}
