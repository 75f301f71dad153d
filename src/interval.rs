//! Genomic intervals and `-L` interval arguments.

use crate::bed;
use crate::error::{EvidenceError, Result};
use crate::genome::SequenceDictionary;
use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A genomic interval with chromosome, start, and end positions.
/// Uses 0-based, half-open coordinates (BED format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Create a new interval.
    #[inline]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the interval has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this interval overlaps with another.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.chrom == other.chrom && self.overlaps_span(other.start, other.end)
    }

    /// Check overlap against a span already known to be on this chromosome.
    #[inline]
    pub fn overlaps_span(&self, start: u64, end: u64) -> bool {
        self.start < end && start < self.end
    }

    /// Parse a region string such as `chr1`, `chr1:100-200`, `chr1:100`
    /// or `chr1:100+`.
    ///
    /// Positions in region strings are 1-based and inclusive; commas are
    /// accepted as digit separators. When a dictionary is given the contig
    /// must exist in it and its length bounds whole-contig intervals.
    pub fn parse_region(spec: &str, dictionary: Option<&SequenceDictionary>) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(malformed(spec, "empty interval"));
        }

        // Contig names may themselves contain ':' (e.g. HLA alleles).
        if dictionary.is_some_and(|d| d.has_contig(spec)) {
            return whole_contig(spec, dictionary);
        }

        let Some((contig, range)) = spec.rsplit_once(':') else {
            return whole_contig(spec, dictionary);
        };
        if contig.is_empty() {
            return Err(malformed(spec, "missing contig"));
        }

        let contig_end = contig_length(contig, dictionary)?;

        let (start, end) = if let Some(open) = range.strip_suffix('+') {
            (parse_base(spec, open)?, contig_end)
        } else if let Some((s, e)) = range.split_once('-') {
            let start = parse_base(spec, s)?;
            let end = parse_base(spec, e)?;
            if end < start {
                return Err(malformed(spec, "end is before start"));
            }
            (start, end)
        } else {
            let base = parse_base(spec, range)?;
            (base, base)
        };

        if dictionary.is_some() && end > contig_end {
            return Err(malformed(
                spec,
                &format!("end {} is past the contig length {}", end, contig_end),
            ));
        }

        Ok(Interval::new(contig, start - 1, end))
    }
}

fn malformed(spec: &str, reason: &str) -> EvidenceError {
    EvidenceError::Config(format!("Malformed interval '{}': {}", spec, reason))
}

fn contig_length(contig: &str, dictionary: Option<&SequenceDictionary>) -> Result<u64> {
    match dictionary {
        Some(dict) => dict.contig_length(contig).ok_or_else(|| {
            EvidenceError::Config(format!(
                "Interval contig '{}' is not in the sequence dictionary",
                contig
            ))
        }),
        None => Ok(u64::MAX),
    }
}

fn whole_contig(contig: &str, dictionary: Option<&SequenceDictionary>) -> Result<Interval> {
    let end = contig_length(contig, dictionary)?;
    Ok(Interval::new(contig, 0, end))
}

/// Parse a 1-based position, accepting `,` separators.
fn parse_base(spec: &str, s: &str) -> Result<u64> {
    let digits: String = s.chars().filter(|&c| c != ',').collect();
    match digits.parse::<u64>() {
        Ok(0) => Err(malformed(spec, "positions are 1-based")),
        Ok(n) => Ok(n),
        Err(_) => Err(malformed(spec, &format!("invalid position '{}'", s))),
    }
}

/// Resolve every `-L` argument into a flat list of intervals.
///
/// An argument naming an existing `.bed` file is read as BED, any other
/// existing file as an interval list (one region per line), and anything
/// else as a region string.
pub fn collect_intervals(
    specs: &[String],
    dictionary: Option<&SequenceDictionary>,
) -> Result<Vec<Interval>> {
    let mut intervals = Vec::new();
    for spec in specs {
        let path = Path::new(spec);
        if path.is_file() {
            if has_bed_extension(path) {
                let from_bed = bed::read_intervals(path)?;
                if let Some(dict) = dictionary {
                    if let Some(unknown) = from_bed.iter().find(|i| !dict.has_contig(&i.chrom)) {
                        return Err(EvidenceError::Config(format!(
                            "Interval contig '{}' in {} is not in the sequence dictionary",
                            unknown.chrom, spec
                        )));
                    }
                }
                intervals.extend(from_bed);
            } else {
                read_interval_list(path, dictionary, &mut intervals)?;
            }
        } else {
            intervals.push(Interval::parse_region(spec, dictionary)?);
        }
    }
    Ok(intervals)
}

fn has_bed_extension(path: &Path) -> bool {
    let name = path.to_string_lossy().to_ascii_lowercase();
    name.ends_with(".bed")
}

fn read_interval_list(
    path: &Path,
    dictionary: Option<&SequenceDictionary>,
    out: &mut Vec<Interval>,
) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('@') || line.starts_with('#') {
            continue;
        }
        if line.contains('\t') {
            out.push(parse_interval_list_row(line, dictionary)?);
        } else {
            out.push(Interval::parse_region(line, dictionary)?);
        }
    }
    Ok(())
}

/// Parse a Picard-style `contig  start  end  strand  name` row (1-based,
/// inclusive).
fn parse_interval_list_row(line: &str, dictionary: Option<&SequenceDictionary>) -> Result<Interval> {
    let mut fields = line.split('\t');
    let (Some(contig), Some(start), Some(end)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed(line, "expected contig, start and end columns"));
    };
    Interval::parse_region(&format!("{}:{}-{}", contig, start, end), dictionary)
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn dict() -> SequenceDictionary {
        let mut d = SequenceDictionary::new();
        d.insert("chr1".to_string(), 1000);
        d.insert("HLA-A*01:01".to_string(), 50);
        d
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new("chr1", 100, 200);
        let b = Interval::new("chr1", 150, 250);
        let c = Interval::new("chr1", 200, 300);
        let d = Interval::new("chr2", 100, 200);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // Adjacent, not overlapping
        assert!(!a.overlaps(&d)); // Different chromosome
    }

    #[test]
    fn test_zero_length_never_overlaps() {
        let a = Interval::new("chr1", 100, 100);
        assert!(a.is_empty());
        assert!(!a.overlaps(&a));
    }

    #[test]
    fn test_parse_region_range() {
        let i = Interval::parse_region("chr1:100-200", None).unwrap();
        assert_eq!(i, Interval::new("chr1", 99, 200));

        let i = Interval::parse_region("chr1:1,000-2,000", None).unwrap();
        assert_eq!(i, Interval::new("chr1", 999, 2000));
    }

    #[test]
    fn test_parse_region_single_base_and_open() {
        assert_eq!(
            Interval::parse_region("chr1:10", None).unwrap(),
            Interval::new("chr1", 9, 10)
        );
        assert_eq!(
            Interval::parse_region("chr1:10+", Some(&dict())).unwrap(),
            Interval::new("chr1", 9, 1000)
        );
    }

    #[test]
    fn test_parse_region_whole_contig() {
        assert_eq!(
            Interval::parse_region("chr1", None).unwrap(),
            Interval::new("chr1", 0, u64::MAX)
        );
        assert_eq!(
            Interval::parse_region("chr1", Some(&dict())).unwrap(),
            Interval::new("chr1", 0, 1000)
        );
        assert_eq!(
            Interval::parse_region("HLA-A*01:01", Some(&dict())).unwrap(),
            Interval::new("HLA-A*01:01", 0, 50)
        );
    }

    #[test]
    fn test_parse_region_errors() {
        assert!(Interval::parse_region("", None).is_err());
        assert!(Interval::parse_region(":1-2", None).is_err());
        assert!(Interval::parse_region("chr1:0-10", None).is_err());
        assert!(Interval::parse_region("chr1:20-10", None).is_err());
        assert!(Interval::parse_region("chr1:a-10", None).is_err());
        assert!(Interval::parse_region("chr2:1-10", Some(&dict())).is_err());
        assert!(Interval::parse_region("chr1:1-1001", Some(&dict())).is_err());

        let err = Interval::parse_region("chr1:x", None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_collect_intervals_from_files() {
        let mut bed = Builder::new().suffix(".bed").tempfile().unwrap();
        writeln!(bed, "chr1\t0\t10").unwrap();
        let mut list = Builder::new().suffix(".intervals").tempfile().unwrap();
        writeln!(list, "@HD\tVN:1.6").unwrap();
        writeln!(list, "chr2:5-6").unwrap();
        writeln!(list, "chr4\t11\t20\t+\ttarget_1").unwrap();

        let specs = vec![
            bed.path().to_string_lossy().to_string(),
            list.path().to_string_lossy().to_string(),
            "chr3:1".to_string(),
        ];
        let intervals = collect_intervals(&specs, None).unwrap();
        assert_eq!(
            intervals,
            vec![
                Interval::new("chr1", 0, 10),
                Interval::new("chr2", 4, 6),
                Interval::new("chr4", 10, 20),
                Interval::new("chr3", 0, 1),
            ]
        );
    }

    #[test]
    fn test_interval_ordering() {
        let mut intervals = [
            Interval::new("chr2", 100, 200),
            Interval::new("chr1", 200, 300),
            Interval::new("chr1", 100, 200),
        ];
        intervals.sort();

        assert_eq!(intervals[0].chrom, "chr1");
        assert_eq!(intervals[0].start, 100);
        assert_eq!(intervals[1].start, 200);
        assert_eq!(intervals[2].chrom, "chr2");
    }
}
