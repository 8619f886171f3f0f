//! Standard genetic code and translation.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Amino acids, the stop signal and an unknown residue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Ala,
    Arg,
    Asn,
    Asp,
    Cys,
    Gln,
    Glu,
    Gly,
    His,
    Ile,
    Leu,
    Lys,
    Met,
    Phe,
    Pro,
    Ser,
    Thr,
    Trp,
    Tyr,
    Val,
    /// Termination (stop codon)
    Ter,
    /// Unknown residue (codon with ambiguous bases)
    Xaa,
}

impl AminoAcid {
    /// Three-letter code as used in HGVS protein descriptions
    pub fn three_letter(&self) -> &'static str {
        match self {
            AminoAcid::Ala => "Ala",
            AminoAcid::Arg => "Arg",
            AminoAcid::Asn => "Asn",
            AminoAcid::Asp => "Asp",
            AminoAcid::Cys => "Cys",
            AminoAcid::Gln => "Gln",
            AminoAcid::Glu => "Glu",
            AminoAcid::Gly => "Gly",
            AminoAcid::His => "His",
            AminoAcid::Ile => "Ile",
            AminoAcid::Leu => "Leu",
            AminoAcid::Lys => "Lys",
            AminoAcid::Met => "Met",
            AminoAcid::Phe => "Phe",
            AminoAcid::Pro => "Pro",
            AminoAcid::Ser => "Ser",
            AminoAcid::Thr => "Thr",
            AminoAcid::Trp => "Trp",
            AminoAcid::Tyr => "Tyr",
            AminoAcid::Val => "Val",
            AminoAcid::Ter => "Ter",
            AminoAcid::Xaa => "Xaa",
        }
    }

    /// One-letter code, `*` for stop
    pub fn one_letter(&self) -> char {
        match self {
            AminoAcid::Ala => 'A',
            AminoAcid::Arg => 'R',
            AminoAcid::Asn => 'N',
            AminoAcid::Asp => 'D',
            AminoAcid::Cys => 'C',
            AminoAcid::Gln => 'Q',
            AminoAcid::Glu => 'E',
            AminoAcid::Gly => 'G',
            AminoAcid::His => 'H',
            AminoAcid::Ile => 'I',
            AminoAcid::Leu => 'L',
            AminoAcid::Lys => 'K',
            AminoAcid::Met => 'M',
            AminoAcid::Phe => 'F',
            AminoAcid::Pro => 'P',
            AminoAcid::Ser => 'S',
            AminoAcid::Thr => 'T',
            AminoAcid::Trp => 'W',
            AminoAcid::Tyr => 'Y',
            AminoAcid::Val => 'V',
            AminoAcid::Ter => '*',
            AminoAcid::Xaa => 'X',
        }
    }

    pub fn is_stop(&self) -> bool {
        *self == AminoAcid::Ter
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.three_letter())
    }
}

/// Standard genetic code table.
#[derive(Debug, Clone)]
pub struct CodonTable {
    codon_to_aa: HashMap<[u8; 3], AminoAcid>,
}

impl CodonTable {
    /// The standard genetic code, built once and shared.
    pub fn standard() -> &'static CodonTable {
        static TABLE: OnceLock<CodonTable> = OnceLock::new();
        TABLE.get_or_init(Self::build_standard)
    }

    fn build_standard() -> Self {
        use AminoAcid::*;

        // Codons grouped by amino acid
        let code: &[(AminoAcid, &[&str])] = &[
            (Phe, &["TTT", "TTC"]),
            (Leu, &["TTA", "TTG", "CTT", "CTC", "CTA", "CTG"]),
            (Ile, &["ATT", "ATC", "ATA"]),
            (Met, &["ATG"]),
            (Val, &["GTT", "GTC", "GTA", "GTG"]),
            (Ser, &["TCT", "TCC", "TCA", "TCG", "AGT", "AGC"]),
            (Pro, &["CCT", "CCC", "CCA", "CCG"]),
            (Thr, &["ACT", "ACC", "ACA", "ACG"]),
            (Ala, &["GCT", "GCC", "GCA", "GCG"]),
            (Tyr, &["TAT", "TAC"]),
            (Ter, &["TAA", "TAG", "TGA"]),
            (His, &["CAT", "CAC"]),
            (Gln, &["CAA", "CAG"]),
            (Asn, &["AAT", "AAC"]),
            (Lys, &["AAA", "AAG"]),
            (Asp, &["GAT", "GAC"]),
            (Glu, &["GAA", "GAG"]),
            (Cys, &["TGT", "TGC"]),
            (Trp, &["TGG"]),
            (Arg, &["CGT", "CGC", "CGA", "CGG", "AGA", "AGG"]),
            (Gly, &["GGT", "GGC", "GGA", "GGG"]),
        ];

        let mut codon_to_aa = HashMap::with_capacity(64);
        for (aa, codons) in code {
            for codon in *codons {
                let b = codon.as_bytes();
                codon_to_aa.insert([b[0], b[1], b[2]], *aa);
            }
        }
        Self { codon_to_aa }
    }

    /// Amino acid for a codon; case-insensitive, `Xaa` for non-ACGT codons
    pub fn translate_codon(&self, codon: &[u8]) -> AminoAcid {
        if codon.len() != 3 {
            return AminoAcid::Xaa;
        }
        let key = [
            codon[0].to_ascii_uppercase(),
            codon[1].to_ascii_uppercase(),
            codon[2].to_ascii_uppercase(),
        ];
        self.codon_to_aa.get(&key).copied().unwrap_or(AminoAcid::Xaa)
    }

    /// Whether a codon is the ATG start codon
    pub fn is_start(&self, codon: &[u8]) -> bool {
        codon.eq_ignore_ascii_case(b"ATG")
    }
}

/// Translate all complete codons of `seq`
///
/// A trailing partial codon is ignored; translation does not stop at
/// termination codons.
pub fn translate(seq: &str) -> Vec<AminoAcid> {
    let table = CodonTable::standard();
    seq.as_bytes()
        .chunks_exact(3)
        .map(|c| table.translate_codon(c))
        .collect()
}

/// Render a peptide with three-letter codes
pub fn three_letter_string(peptide: &[AminoAcid]) -> String {
    peptide.iter().map(|aa| aa.three_letter()).collect()
}
