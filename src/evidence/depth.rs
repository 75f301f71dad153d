//! Read-depth evidence (`.RD.txt`).
//!
//! Columns: contig, start, end, then one count per sample. Sample names are
//! carried by the file header, not by the records.

use super::Fields;
use crate::streaming::LineEncoder;

/// Binned read counts for every sample over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthEvidence {
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub counts: Vec<u32>,
}

impl DepthEvidence {
    pub(crate) fn decode(fields: &mut Fields<'_>) -> Result<Self, String> {
        let contig = fields.next_str("contig")?.to_string();
        let start = fields.next_u64("start")?;
        let end = fields.next_u64("end")?;
        if end < start {
            return Err(format!("end {} is before start {}", end, start));
        }

        let counts = fields
            .rest()
            .map(|s| s.parse().map_err(|_| format!("invalid count '{}'", s)))
            .collect::<Result<Vec<u32>, String>>()?;
        if counts.is_empty() {
            return Err("no sample counts".to_string());
        }

        Ok(Self {
            contig,
            start,
            end,
            counts,
        })
    }

    pub fn encode(&self, encoder: &mut LineEncoder) {
        encoder.write_str(&self.contig);
        encoder.write_tab();
        encoder.write_int(self.start);
        encoder.write_tab();
        encoder.write_int(self.end);
        for &count in &self.counts {
            encoder.write_tab();
            encoder.write_int(count);
        }
    }
}
