use super::ambiguity::expand_sequence;

/// All single-edit variants of a primer, original first: one `N` inserted
/// between adjacent bases, one internal base replaced by `N`, or one base
/// deleted. The `N` widens to `[ACGTU]` at expansion time, so each variant
/// tolerates any base at the edited position.
fn single_edit_variants(primer: &str) -> Vec<String> {
    let n = primer.len();
    let mut variants = Vec::with_capacity(3 * n);
    variants.push(primer.to_string());
    for i in 1..n {
        variants.push(format!("{}N{}", &primer[..i], &primer[i..]));
    }
    for i in 1..n.saturating_sub(1) {
        variants.push(format!("{}N{}", &primer[..i], &primer[i + 1..]));
    }
    for i in 0..n {
        variants.push(format!("{}{}", &primer[..i], &primer[i + 1..]));
    }
    variants
}

/// Builds the search pattern for a primer. Without mismatch tolerance this
/// is just the ambiguity-expanded literal; with it, an alternation over
/// every single-edit variant, grouped so the result can be embedded as one
/// sub-pattern.
pub fn build_pattern(primer: &str, mismatch_tolerant: bool) -> String {
    if !mismatch_tolerant {
        return expand_sequence(primer);
    }
    let expanded: Vec<String> = single_edit_variants(primer)
        .iter()
        .map(|v| expand_sequence(v))
        .collect();
    format!("(?:{})", expanded.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pattern_is_expanded_literal() {
        assert_eq!(build_pattern("ACGT", false), "ACGT");
        assert_eq!(build_pattern("ACNT", false), "AC[ACGTU]T");
    }

    #[test]
    fn variant_counts_per_category() {
        // length 4: original + 3 insertions + 2 substitutions + 4 deletions
        let variants = single_edit_variants("ACGT");
        assert_eq!(variants.len(), 1 + 3 + 2 + 4);
        assert_eq!(variants[0], "ACGT");
        assert_eq!(&variants[1..4], ["ANCGT", "ACNGT", "ACGNT"]);
        assert_eq!(&variants[4..6], ["ANGT", "ACNT"]);
        assert_eq!(&variants[6..10], ["CGT", "AGT", "ACT", "ACG"]);
    }

    #[test]
    fn short_primers_have_no_substitution_variants() {
        // length 2: original + 1 insertion + 0 substitutions + 2 deletions
        let variants = single_edit_variants("AC");
        assert_eq!(variants, ["AC", "ANC", "C", "A"]);

        // length 1: only the original and its deletion
        let variants = single_edit_variants("A");
        assert_eq!(variants, ["A", ""]);
    }

    #[test]
    fn tolerant_pattern_is_grouped_alternation() {
        let pattern = build_pattern("ACGT", true);
        assert!(pattern.starts_with("(?:"));
        assert!(pattern.ends_with(')'));
        assert_eq!(pattern.matches('|').count(), 9);
        // the unmodified primer is the first alternative
        assert!(pattern.starts_with("(?:ACGT|"));
        // inserted and substituted Ns are widened
        assert!(pattern.contains("A[ACGTU]CGT"));
        assert!(pattern.contains("A[ACGTU]GT"));
    }
}
