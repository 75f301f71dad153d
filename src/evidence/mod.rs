//! Structural-variant evidence records and the registry of supported kinds.
//!
//! Every kind has a canonical tab-delimited line encoding. Coordinates are
//! kept exactly as they appear in the file (0-based), so decoding and
//! re-encoding a record is lossless.

pub mod baf;
pub mod depth;
pub mod discordant_pair;
pub mod split_read;

pub use baf::BafEvidence;
pub use depth::DepthEvidence;
pub use discordant_pair::{DiscordantPairEvidence, PairStrand};
pub use split_read::{ClipSide, SplitReadEvidence};

use crate::error::{EvidenceError, Result};
use crate::streaming::LineEncoder;
use std::fmt;
use std::str::Split;

/// The fixed set of evidence kinds this tool can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceKind {
    Baf,
    Depth,
    DiscordantPair,
    SplitRead,
}

/// All supported kinds, in registry order.
pub const SUPPORTED_KINDS: [EvidenceKind; 4] = [
    EvidenceKind::Baf,
    EvidenceKind::Depth,
    EvidenceKind::DiscordantPair,
    EvidenceKind::SplitRead,
];

/// Returns true iff `type_name` names a supported evidence kind.
pub fn is_supported(type_name: &str) -> bool {
    EvidenceKind::from_type_name(type_name).is_some()
}

impl EvidenceKind {
    /// The feature type name produced by codec resolution.
    pub fn type_name(self) -> &'static str {
        match self {
            EvidenceKind::Baf => "BafEvidence",
            EvidenceKind::Depth => "DepthEvidence",
            EvidenceKind::DiscordantPair => "DiscordantPairEvidence",
            EvidenceKind::SplitRead => "SplitReadEvidence",
        }
    }

    /// Look up a kind by feature type name.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        SUPPORTED_KINDS
            .into_iter()
            .find(|kind| kind.type_name() == type_name)
    }

    /// Validate a resolved feature type against the registry.
    pub fn validate(type_name: &str) -> Result<Self> {
        Self::from_type_name(type_name).ok_or_else(|| EvidenceError::UnsupportedEvidenceType {
            type_name: type_name.to_string(),
            supported: SUPPORTED_KINDS
                .iter()
                .map(|k| k.type_name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Conventional file suffix, without compression.
    pub fn file_suffix(self) -> &'static str {
        match self {
            EvidenceKind::Baf => ".BAF.txt",
            EvidenceKind::Depth => ".RD.txt",
            EvidenceKind::DiscordantPair => ".PE.txt",
            EvidenceKind::SplitRead => ".SR.txt",
        }
    }

    /// 0-based column holding the end coordinate, if the kind has one.
    pub fn end_column(self) -> Option<usize> {
        match self {
            EvidenceKind::Depth => Some(2),
            _ => None,
        }
    }

    /// Decode one line of this kind.
    pub fn decode(self, line: &str) -> std::result::Result<EvidenceRecord, String> {
        let mut fields = Fields::new(line);
        let record = match self {
            EvidenceKind::Baf => EvidenceRecord::Baf(BafEvidence::decode(&mut fields)?),
            EvidenceKind::Depth => EvidenceRecord::Depth(DepthEvidence::decode(&mut fields)?),
            EvidenceKind::DiscordantPair => {
                EvidenceRecord::DiscordantPair(DiscordantPairEvidence::decode(&mut fields)?)
            }
            EvidenceKind::SplitRead => {
                EvidenceRecord::SplitRead(SplitReadEvidence::decode(&mut fields)?)
            }
        };
        fields.finish()?;
        Ok(record)
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One decoded evidence record.
#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceRecord {
    Baf(BafEvidence),
    Depth(DepthEvidence),
    DiscordantPair(DiscordantPairEvidence),
    SplitRead(SplitReadEvidence),
}

impl EvidenceRecord {
    pub fn kind(&self) -> EvidenceKind {
        match self {
            EvidenceRecord::Baf(_) => EvidenceKind::Baf,
            EvidenceRecord::Depth(_) => EvidenceKind::Depth,
            EvidenceRecord::DiscordantPair(_) => EvidenceKind::DiscordantPair,
            EvidenceRecord::SplitRead(_) => EvidenceKind::SplitRead,
        }
    }

    /// Contig and 0-based half-open span used for overlap and indexing.
    ///
    /// Discordant pairs are located by their first read.
    pub fn locus(&self) -> (&str, u64, u64) {
        match self {
            EvidenceRecord::Baf(r) => (&r.contig, r.position, r.position.saturating_add(1)),
            EvidenceRecord::Depth(r) => (&r.contig, r.start, r.end),
            EvidenceRecord::DiscordantPair(r) => {
                (&r.start_contig, r.start, r.start.saturating_add(1))
            }
            EvidenceRecord::SplitRead(r) => {
                (&r.contig, r.position, r.position.saturating_add(1))
            }
        }
    }

    /// Append the canonical encoding (without line terminator).
    pub fn encode(&self, encoder: &mut LineEncoder) {
        match self {
            EvidenceRecord::Baf(r) => r.encode(encoder),
            EvidenceRecord::Depth(r) => r.encode(encoder),
            EvidenceRecord::DiscordantPair(r) => r.encode(encoder),
            EvidenceRecord::SplitRead(r) => r.encode(encoder),
        }
    }

    /// Decode a record of the given kind, attributing errors to `line_number`.
    pub fn decode(kind: EvidenceKind, line: &str, line_number: usize) -> Result<Self> {
        kind.decode(line).map_err(|message| EvidenceError::Parse {
            line: line_number,
            message: format!("{}: {}", kind, message),
        })
    }
}

impl fmt::Display for EvidenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut encoder = LineEncoder::new();
        self.encode(&mut encoder);
        f.write_str(&String::from_utf8_lossy(encoder.line()))
    }
}

/// Cursor over the tab-separated columns of one line.
pub(crate) struct Fields<'a> {
    columns: Split<'a, char>,
    column: usize,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            columns: line.split('\t'),
            column: 0,
        }
    }

    pub(crate) fn next_str(&mut self, name: &str) -> std::result::Result<&'a str, String> {
        self.column += 1;
        self.columns
            .next()
            .ok_or_else(|| format!("missing column {} ({})", self.column, name))
    }

    pub(crate) fn next_u64(&mut self, name: &str) -> std::result::Result<u64, String> {
        let s = self.next_str(name)?;
        s.parse()
            .map_err(|_| format!("invalid {} '{}' in column {}", name, s, self.column))
    }

    pub(crate) fn next_u32(&mut self, name: &str) -> std::result::Result<u32, String> {
        let s = self.next_str(name)?;
        s.parse()
            .map_err(|_| format!("invalid {} '{}' in column {}", name, s, self.column))
    }

    pub(crate) fn next_f64(&mut self, name: &str) -> std::result::Result<f64, String> {
        let s = self.next_str(name)?;
        s.parse()
            .map_err(|_| format!("invalid {} '{}' in column {}", name, s, self.column))
    }

    /// Remaining columns, consumed.
    pub(crate) fn rest(&mut self) -> impl Iterator<Item = &'a str> + '_ {
        self.columns.by_ref()
    }

    fn finish(mut self) -> std::result::Result<(), String> {
        match self.columns.next() {
            None => Ok(()),
            Some(_) => Err(format!("expected {} columns, found more", self.column)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_accepts_the_four_kinds() {
        for kind in SUPPORTED_KINDS {
            assert!(is_supported(kind.type_name()));
            assert_eq!(EvidenceKind::validate(kind.type_name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_registry_rejects_other_kinds() {
        for name in ["LocusDepth", "SiteDepth", "VariantContext", "", "splitreadevidence"] {
            assert!(!is_supported(name));
            let err = EvidenceKind::validate(name).unwrap_err();
            assert!(err.is_config());
        }
    }

    #[test]
    fn test_decode_dispatches_on_kind() {
        let rec = EvidenceKind::SplitRead
            .decode("chr1\t100\tleft\t3\tS1")
            .unwrap();
        assert_eq!(rec.kind(), EvidenceKind::SplitRead);
        assert_eq!(rec.locus(), ("chr1", 100, 101));
    }

    #[test]
    fn test_heterogeneous_line_rejected() {
        // A BAF line does not decode as split-read evidence.
        assert!(EvidenceKind::SplitRead.decode("chr1\t100\t0.5\tS1").is_err());
        // A split-read line has too many columns for BAF.
        assert!(EvidenceKind::Baf.decode("chr1\t100\tleft\t3\tS1").is_err());
    }

    #[test]
    fn test_decode_error_carries_line_number() {
        let err = EvidenceRecord::decode(EvidenceKind::Baf, "chr1\tx\t0.5\tS1", 7).unwrap_err();
        match err {
            EvidenceError::Parse { line, message } => {
                assert_eq!(line, 7);
                assert!(message.starts_with("BafEvidence"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_matches_encoding() {
        let rec = EvidenceKind::Depth.decode("chr2\t0\t100\t5\t7").unwrap();
        assert_eq!(rec.to_string(), "chr2\t0\t100\t5\t7");
    }
}
