// Lookup for widening IUPAC ambiguity codes into character classes.
// Lowercase codes widen to lowercase classes; the compiled patterns are
// case-insensitive anyway, but the expansion stays faithful to its input.
fn class_for(base: char) -> Option<&'static str> {
    Some(match base {
        'R' => "[AG]",
        'r' => "[ag]",
        'Y' => "[CTU]",
        'y' => "[ctu]",
        'K' => "[GTU]",
        'k' => "[gtu]",
        'M' => "[AC]",
        'm' => "[ac]",
        'S' => "[CG]",
        's' => "[cg]",
        'W' => "[ATU]",
        'w' => "[atu]",
        'B' => "[CGTU]",
        'b' => "[cgtu]",
        'D' => "[AGTU]",
        'd' => "[agtu]",
        'H' => "[ACTU]",
        'h' => "[actu]",
        'V' => "[ACG]",
        'v' => "[acg]",
        'N' => "[ACGTU]",
        'n' => "[acgtu]",
        _ => return None,
    })
}

/// Returns the pattern fragment for a single base: a character class for
/// the ambiguity codes, the base itself for everything else (including
/// plain A/C/G/T/U, `X` and `-`).
pub fn expand_base(base: char) -> String {
    match class_for(base) {
        Some(class) => class.to_string(),
        None => base.to_string(),
    }
}

/// Widens every ambiguity code in `seq` into its character class, e.g.
/// `TAGCNTT` becomes `TAGC[ACGTU]TT`.
pub fn expand_sequence(seq: &str) -> String {
    let mut out = String::with_capacity(seq.len());
    for base in seq.chars() {
        match class_for(base) {
            Some(class) => out.push_str(class),
            None => out.push(base),
        }
    }
    out
}
