//! Codec resolution: which feature type a file holds, judged by its name.

use crate::config::{has_block_compressed_extension, BLOCK_COMPRESSED_EXTENSIONS};
use crate::error::{EvidenceError, Result};
use crate::evidence::SUPPORTED_KINDS;
use crate::streaming::buffers::DEFAULT_INPUT_BUFFER;
use log::debug;
use noodles::bgzf;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Known file suffixes (lowercase, compression stripped) and the feature
/// type each decodes to. Only some of these are printable evidence.
const KNOWN_CODECS: &[(&str, &str)] = &[
    (".sr.txt", "SplitReadEvidence"),
    (".pe.txt", "DiscordantPairEvidence"),
    (".baf.txt", "BafEvidence"),
    (".rd.txt", "DepthEvidence"),
    (".ld.txt", "LocusDepth"),
    (".sd.txt", "SiteDepth"),
    (".bed", "BEDFeature"),
    (".vcf", "VariantContext"),
];

/// Resolve the feature type name for a file path.
pub fn resolve_feature_type(path: &Path) -> Result<&'static str> {
    let name = path.to_string_lossy().to_ascii_lowercase();
    let stem = BLOCK_COMPRESSED_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name.as_str());

    KNOWN_CODECS
        .iter()
        .find(|(suffix, _)| stem.ends_with(suffix))
        .map(|&(_, type_name)| {
            debug!("Resolved {} to feature type {}", path.display(), type_name);
            type_name
        })
        .ok_or_else(|| {
            let expected: Vec<&str> = SUPPORTED_KINDS.iter().map(|k| k.file_suffix()).collect();
            EvidenceError::Config(format!(
                "No codec found for {} (expected one of {}, optionally gzipped)",
                path.display(),
                expected.join(", ")
            ))
        })
}

/// Open an input for line reading, decompressing BGZF when the name says so.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if has_block_compressed_extension(&path.to_string_lossy()) {
        debug!("Reading {} as BGZF", path.display());
        Ok(Box::new(BufReader::with_capacity(
            DEFAULT_INPUT_BUFFER,
            bgzf::io::Reader::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(DEFAULT_INPUT_BUFFER, file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_evidence_suffixes() {
        let cases = [
            ("batch.SR.txt", "SplitReadEvidence"),
            ("batch.PE.txt.gz", "DiscordantPairEvidence"),
            ("gs://bucket/batch.BAF.txt.bgz", "BafEvidence"),
            ("x.rd.txt", "DepthEvidence"),
        ];
        for (path, expected) in cases {
            assert_eq!(resolve_feature_type(Path::new(path)).unwrap(), expected);
        }
    }

    #[test]
    fn test_resolve_other_codecs() {
        assert_eq!(
            resolve_feature_type(Path::new("batch.ld.txt.gz")).unwrap(),
            "LocusDepth"
        );
        assert_eq!(
            resolve_feature_type(Path::new("calls.vcf")).unwrap(),
            "VariantContext"
        );
    }

    #[test]
    fn test_unknown_codec_is_config_error() {
        let err = resolve_feature_type(Path::new("notes.txt")).unwrap_err();
        assert!(err.is_config());
        assert!(err
            .to_string()
            .contains(".BAF.txt, .RD.txt, .PE.txt, .SR.txt"));
    }
}
