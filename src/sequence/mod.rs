//! Nucleotide sequence helpers
//!
//! Allele classification, reverse complementation and translation.

pub mod codon;

pub use codon::{translate, AminoAcid, CodonTable};

/// Whether a VCF allele is symbolic rather than a literal sequence
///
/// Symbolic alleles are longer than one character and either start with
/// `<` or `.`, end with `>` or `.`, or contain a break-end bracket.
///
/// # Examples
///
/// ```
/// use ferro_annotate::sequence::is_symbolic;
///
/// assert!(is_symbolic("<DEL>"));
/// assert!(is_symbolic("G]17:198982]"));
/// assert!(is_symbolic(".A"));
/// assert!(!is_symbolic("ACGT"));
/// assert!(!is_symbolic("."));
/// ```
pub fn is_symbolic(allele: &str) -> bool {
    allele.len() > 1
        && (allele.starts_with('<')
            || allele.ends_with('>')
            || allele.starts_with('.')
            || allele.ends_with('.')
            || allele.contains('[')
            || allele.contains(']'))
}

/// Complement of a single base, `None` for anything outside ACGTN
pub fn complement_base(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'C' => Some('G'),
        'G' => Some('C'),
        'T' => Some('A'),
        'N' => Some('N'),
        'a' => Some('t'),
        'c' => Some('g'),
        'g' => Some('c'),
        't' => Some('a'),
        'n' => Some('n'),
        _ => None,
    }
}

/// Reverse complement; bases without a complement are kept as they are
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| complement_base(c).unwrap_or(c))
        .collect()
}

/// Reverse complement restricted to A/C/G/T
///
/// Any other character is kept unchanged; the returned flag tells whether
/// such a character was seen.
pub fn reverse_complement_acgt(seq: &str) -> (String, bool) {
    let mut saw_other = false;
    let rc = seq
        .chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'C' => 'G',
            'G' => 'C',
            'T' => 'A',
            other => {
                saw_other = true;
                other
            }
        })
        .collect();
    (rc, saw_other)
}

/// Length of the longest common prefix of two strings, in bytes
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of two strings, in bytes
pub fn common_suffix_len(a: &str, b: &str) -> usize {
    a.bytes()
        .rev()
        .zip(b.bytes().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
