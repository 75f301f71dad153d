//! Discordant read-pair evidence (`.PE.txt`).
//!
//! Columns: start contig, start, start strand, end contig, end, end strand,
//! sample.

use super::Fields;
use crate::streaming::LineEncoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairStrand {
    Forward,
    Reverse,
}

impl PairStrand {
    pub fn as_str(self) -> &'static str {
        match self {
            PairStrand::Forward => "+",
            PairStrand::Reverse => "-",
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s {
            "+" => Ok(PairStrand::Forward),
            "-" => Ok(PairStrand::Reverse),
            _ => Err(format!("invalid strand '{}'", s)),
        }
    }
}

/// One read pair whose mates map discordantly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordantPairEvidence {
    pub start_contig: String,
    pub start: u64,
    pub start_strand: PairStrand,
    pub end_contig: String,
    pub end: u64,
    pub end_strand: PairStrand,
    pub sample: String,
}

impl DiscordantPairEvidence {
    pub(crate) fn decode(fields: &mut Fields<'_>) -> Result<Self, String> {
        let start_contig = fields.next_str("start contig")?.to_string();
        let start = fields.next_u64("start")?;
        let start_strand = PairStrand::parse(fields.next_str("start strand")?)?;
        let end_contig = fields.next_str("end contig")?.to_string();
        let end = fields.next_u64("end")?;
        let end_strand = PairStrand::parse(fields.next_str("end strand")?)?;
        let sample = fields.next_str("sample")?.to_string();

        Ok(Self {
            start_contig,
            start,
            start_strand,
            end_contig,
            end,
            end_strand,
            sample,
        })
    }

    pub fn encode(&self, encoder: &mut LineEncoder) {
        encoder.write_str(&self.start_contig);
        encoder.write_tab();
        encoder.write_int(self.start);
        encoder.write_tab();
        encoder.write_str(self.start_strand.as_str());
        encoder.write_tab();
        encoder.write_str(&self.end_contig);
        encoder.write_tab();
        encoder.write_int(self.end);
        encoder.write_tab();
        encoder.write_str(self.end_strand.as_str());
        encoder.write_tab();
        encoder.write_str(&self.sample);
    }
}
