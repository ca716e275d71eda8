mod ambiguity;
mod pattern;

pub use ambiguity::{expand_base, expand_sequence};
pub use pattern::build_pattern;

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use log::info;
use regex::{Regex, RegexBuilder};

use crate::fasta::FastaReader;
use crate::revcomp::reverse_complement;

/// The three compiled search patterns shared read-only by every worker:
/// forward, reverse, and the reverse complement of the reverse primer
/// (amplicons may have been read from either strand).
pub struct PatternSet {
    pub forward: Regex,
    pub reverse: Regex,
    pub reverse_rc: Regex,
}

pub struct PrimerSet {
    pub forward: String,
    pub reverse: String,
    pub patterns: PatternSet,
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("could not compile primer pattern '{}'", pattern))
}

impl PrimerSet {
    /// Reads forward and reverse primers from a FASTA stream. The two
    /// records are told apart by the word FORWARD or REVERSE (any case)
    /// in the identifier or description; both must be present.
    pub fn load<R: BufRead>(reader: FastaReader<R>, mismatch_tolerant: bool) -> Result<Self> {
        let mut forward = None;
        let mut reverse = None;

        for record in reader {
            let record = record.context("could not read primer file")?;
            let id = record.id.to_uppercase();
            let desc = record.desc.to_uppercase();
            if id.contains("FORWARD") || desc.contains("FORWARD") {
                forward = Some(record.seq);
            } else if id.contains("REVERSE") || desc.contains("REVERSE") {
                reverse = Some(record.seq);
            }
        }

        let (forward, reverse) = match (forward, reverse) {
            (Some(f), Some(r)) => (f, r),
            _ => bail!("could not find forward and reverse primer sequences in primer file"),
        };
        if !forward.is_ascii() || !reverse.is_ascii() {
            bail!("primer sequences must be plain ASCII nucleotide strings");
        }

        info!("forward primer: {} \t reverse primer: {}", forward, reverse);

        let reverse_rc = reverse_complement(&reverse);
        let patterns = PatternSet {
            forward: compile(&build_pattern(&forward, mismatch_tolerant))?,
            reverse: compile(&build_pattern(&reverse, mismatch_tolerant))?,
            reverse_rc: compile(&build_pattern(&reverse_rc, mismatch_tolerant))?,
        };

        Ok(PrimerSet {
            forward,
            reverse,
            patterns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str, mismatch: bool) -> Result<PrimerSet> {
        PrimerSet::load(FastaReader::new(input.as_bytes()), mismatch)
    }

    #[test]
    fn finds_primers_by_id_or_description() {
        let primers = load(
            ">27F forward primer\nAGAGTTTGATCMTGGCTCAG\n>338R this one is the REVERSE\nTGCTGCCTCCCGTAGGAGT\n",
            false,
        )
        .unwrap();
        assert_eq!(primers.forward, "AGAGTTTGATCMTGGCTCAG");
        assert_eq!(primers.reverse, "TGCTGCCTCCCGTAGGAGT");
    }

    #[test]
    fn missing_reverse_is_an_error() {
        assert!(load(">a FORWARD\nACGT\n", false).is_err());
        assert!(load(">a FORWARD\nACGT\n>b something else\nTTTT\n", false).is_err());
    }

    #[test]
    fn missing_forward_is_an_error() {
        assert!(load(">b REVERSE\nTTTT\n", false).is_err());
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(load("", false).is_err());
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let primers = load(">f FORWARD\nACGT\n>r REVERSE\nTTAC\n", false).unwrap();
        assert!(primers.patterns.forward.is_match("aaacgtaa"));
        assert!(primers.patterns.reverse.is_match("GGttacGG"));
    }

    #[test]
    fn ambiguity_codes_widen_in_compiled_pattern() {
        let primers = load(">f FORWARD\nACNT\n>r REVERSE\nTTTT\n", false).unwrap();
        assert!(primers.patterns.forward.is_match("xxACGTxx"));
        assert!(primers.patterns.forward.is_match("xxACCTxx"));
        assert!(!primers.patterns.forward.is_match("xxACXTxx"));
    }

    #[test]
    fn reverse_complement_pattern_is_compiled() {
        let primers = load(">f FORWARD\nACGT\n>r REVERSE\nTTAC\n", false).unwrap();
        // reverse complement of TTAC is GTAA
        assert!(primers.patterns.reverse_rc.is_match("xxGTAAxx"));
        assert!(!primers.patterns.reverse_rc.is_match("xxTTACxx"));
    }

    #[test]
    fn mismatch_tolerant_patterns_accept_one_edit() {
        let primers = load(">f FORWARD\nACGTAC\n>r REVERSE\nTTTTTT\n", false).unwrap();
        assert!(!primers.patterns.forward.is_match("xxACGAACxx"));

        let tolerant = load(">f FORWARD\nACGTAC\n>r REVERSE\nTTTTTT\n", true).unwrap();
        // one internal substitution
        assert!(tolerant.patterns.forward.is_match("xxACGAACxx"));
        // one deletion
        assert!(tolerant.patterns.forward.is_match("xxACGTCxx"));
        // one insertion
        assert!(tolerant.patterns.forward.is_match("xxACGGTACxx"));
    }
}
