//! B-allele frequency evidence (`.BAF.txt`).
//!
//! Columns: contig, position, value, sample.

use super::Fields;
use crate::streaming::LineEncoder;

/// B-allele frequency of one sample at one heterozygous site.
///
/// `value` is written in shortest round-trip form, so it survives
/// re-encoding bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct BafEvidence {
    pub contig: String,
    pub position: u64,
    pub value: f64,
    pub sample: String,
}

impl BafEvidence {
    pub(crate) fn decode(fields: &mut Fields<'_>) -> Result<Self, String> {
        Ok(Self {
            contig: fields.next_str("contig")?.to_string(),
            position: fields.next_u64("position")?,
            value: fields.next_f64("value")?,
            sample: fields.next_str("sample")?.to_string(),
        })
    }

    pub fn encode(&self, encoder: &mut LineEncoder) {
        encoder.write_str(&self.contig);
        encoder.write_tab();
        encoder.write_int(self.position);
        encoder.write_tab();
        encoder.write_float(self.value);
        encoder.write_tab();
        encoder.write_str(&self.sample);
    }
}
