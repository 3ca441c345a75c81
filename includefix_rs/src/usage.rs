//! Usage Checker: decides whether a symbol tied to an include is referenced
//! anywhere else in the file.
//!
//! The contract is deliberately lexical: a candidate counts as used iff it
//! occurs, case-insensitively, as a literal substring of the include-stripped
//! file body. No tokenization, no word boundaries. This over-approximates
//! usage and biases toward keeping includes; an incidental substring
//! collision keeping a header alive is the accepted cost of never deleting
//! one the build still needs.

/// True iff at least one candidate occurs in the corpus.
///
/// `corpus` must already be lower-cased (see [`crate::classify::parse_source`]);
/// candidates are lower-cased here.
pub fn any_used(candidates: &[String], corpus: &str) -> bool {
    candidates
        .iter()
        .any(|name| corpus.contains(&name.to_lowercase()))
}
