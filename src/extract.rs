use crate::config::Sides;
use crate::fasta::FastaRecord;
use crate::filter::{quality_filter, size_filter, RejectReason};
use crate::primer::PatternSet;

/// Outcome of processing one record. A rejection keeps the identifier so
/// the driver can log the reason against it.
pub enum Verdict {
    Kept(FastaRecord),
    Rejected { id: String, reason: RejectReason },
}

/// Immutable per-run context applied to every record: compiled patterns
/// plus filter configuration. Built once, shared across workers.
pub struct Extractor {
    patterns: PatternSet,
    trim: Sides,
    require: Sides,
    sizes: Option<(usize, usize)>,
    badchars: i64,
}

impl Extractor {
    pub fn new(
        patterns: PatternSet,
        trim: Sides,
        require: Sides,
        sizes: Option<(usize, usize)>,
        badchars: i64,
    ) -> Self {
        Self {
            patterns,
            trim,
            require,
            sizes,
            badchars,
        }
    }

    /// Runs the full per-record gate sequence. A kept record carries the
    /// original identifier, an empty description and the final sequence.
    pub fn process(&self, record: FastaRecord) -> Verdict {
        if let Some(reason) = quality_filter(&record.seq, self.badchars) {
            return Verdict::Rejected {
                id: record.id,
                reason,
            };
        }
        match self.extract(&record.seq) {
            Ok(seq) => Verdict::Kept(FastaRecord::new(record.id, String::new(), seq)),
            Err(reason) => Verdict::Rejected {
                id: record.id,
                reason,
            },
        }
    }

    // Forward trimming runs before the reverse search so reverse offsets
    // are relative to the already-trimmed sequence. Once a side is
    // resolved, removed material is never re-examined.
    fn extract(&self, seq: &str) -> Result<String, RejectReason> {
        let mut seq = seq;

        match self.patterns.forward.find(seq) {
            Some(m) => {
                seq = if self.trim.forward() {
                    &seq[m.end()..]
                } else {
                    &seq[m.start()..]
                };
            }
            None if self.require.forward() => return Err(RejectReason::NoForwardPrimer),
            None => {}
        }

        // the reverse complement is only tried when the direct reverse
        // pattern finds nothing at all
        match self
            .patterns
            .reverse
            .find(seq)
            .or_else(|| self.patterns.reverse_rc.find(seq))
        {
            Some(m) => {
                seq = if self.trim.reverse() {
                    &seq[..m.start()]
                } else {
                    &seq[..m.end()]
                };
            }
            None if self.require.reverse() => return Err(RejectReason::NoReversePrimer),
            None => {}
        }

        if let Some(reason) = size_filter(seq.len(), self.sizes) {
            return Err(reason);
        }
        Ok(seq.to_string())
    }
}
