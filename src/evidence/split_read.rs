//! Split-read evidence (`.SR.txt`).
//!
//! Columns: contig, position, side, count, sample.

use super::Fields;
use crate::streaming::LineEncoder;

/// Which side of the read the soft clip is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipSide {
    Left,
    Right,
}

impl ClipSide {
    pub fn as_str(self) -> &'static str {
        match self {
            ClipSide::Left => "left",
            ClipSide::Right => "right",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(ClipSide::Left),
            "right" => Some(ClipSide::Right),
            _ => None,
        }
    }
}

/// Count of reads split at one position in one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReadEvidence {
    pub contig: String,
    pub position: u64,
    pub side: ClipSide,
    pub count: u32,
    pub sample: String,
}

impl SplitReadEvidence {
    pub(crate) fn decode(fields: &mut Fields<'_>) -> Result<Self, String> {
        let contig = fields.next_str("contig")?.to_string();
        let position = fields.next_u64("position")?;
        let side = fields.next_str("side")?;
        let side = ClipSide::parse(side).ok_or_else(|| format!("invalid side '{}'", side))?;
        let count = fields.next_u32("count")?;
        let sample = fields.next_str("sample")?.to_string();

        Ok(Self {
            contig,
            position,
            side,
            count,
            sample,
        })
    }

    pub fn encode(&self, encoder: &mut LineEncoder) {
        encoder.write_str(&self.contig);
        encoder.write_tab();
        encoder.write_int(self.position);
        encoder.write_tab();
        encoder.write_str(self.side.as_str());
        encoder.write_tab();
        encoder.write_int(self.count);
        encoder.write_tab();
        encoder.write_str(&self.sample);
    }
}
