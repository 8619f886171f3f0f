//! Per-chromosome transcript collections
//!
//! [`TranscriptDb`] groups read-only [`TranscriptModel`]s by chromosome and
//! backs each chromosome with an [`IntervalArray`]. It is immutable after
//! construction and can be shared between threads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use super::index::{IntervalArray, QueryResult};
use super::transcript::{TranscriptModel, TranscriptRecord};
use crate::coords::{GenomeInterval, ReferenceDictionary, Strand};
use crate::error::AnnotateError;
use crate::Result;

/// Contig entry of a transcript bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigRecord {
    pub name: String,
    pub length: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// JSON input bundling contigs and transcripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptBundle {
    pub contigs: Vec<ContigRecord>,
    pub transcripts: Vec<TranscriptRecord>,
}

/// Transcripts of a single chromosome
pub type TranscriptIndex = IntervalArray<Arc<TranscriptModel>>;

/// A database of transcripts indexed by chromosome and position
#[derive(Debug, Clone)]
pub struct TranscriptDb {
    dict: Arc<ReferenceDictionary>,
    chromosomes: HashMap<u32, TranscriptIndex>,
    by_accession: HashMap<String, Arc<TranscriptModel>>,
}

impl TranscriptDb {
    /// Index the given transcripts
    pub fn new(
        dict: Arc<ReferenceDictionary>,
        transcripts: impl IntoIterator<Item = TranscriptModel>,
    ) -> Self {
        let mut per_chr: HashMap<u32, Vec<(i64, i64, Arc<TranscriptModel>)>> = HashMap::new();
        let mut by_accession = HashMap::new();
        for tx in transcripts {
            let fwd = tx.tx_region.with_strand(Strand::Plus);
            let tx = Arc::new(tx);
            by_accession.insert(tx.accession.clone(), Arc::clone(&tx));
            per_chr
                .entry(tx.chr())
                .or_default()
                .push((fwd.begin(), fwd.end(), tx));
        }
        let chromosomes = per_chr
            .into_iter()
            .map(|(chr, items)| (chr, IntervalArray::new(items)))
            .collect();
        Self {
            dict,
            chromosomes,
            by_accession,
        }
    }

    /// Resolve records against `dict` and index them
    pub fn from_records(
        dict: Arc<ReferenceDictionary>,
        records: impl IntoIterator<Item = TranscriptRecord>,
    ) -> Result<Self> {
        let models = records
            .into_iter()
            .map(|r| r.into_model(&dict))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(dict, models))
    }

    /// Build from a bundle, creating the reference dictionary from its contigs
    pub fn from_bundle(bundle: TranscriptBundle) -> Result<Self> {
        let mut dict = ReferenceDictionary::new();
        for (i, contig) in bundle.contigs.iter().enumerate() {
            let id = i as u32 + 1;
            dict.add_contig(id, contig.name.clone(), contig.length);
            for alias in &contig.aliases {
                dict.add_alias(id, alias.clone());
            }
        }
        Self::from_records(Arc::new(dict), bundle.transcripts)
    }

    /// Load a JSON bundle from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let bundle: TranscriptBundle = serde_json::from_reader(reader)?;
        log::debug!(
            "read {} contigs and {} transcripts",
            bundle.contigs.len(),
            bundle.transcripts.len()
        );
        Self::from_bundle(bundle)
    }

    /// Load a JSON bundle, transparently decompressing `.gz` files
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AnnotateError::Io {
            msg: format!("Failed to open transcript file {}: {}", path.display(), e),
        })?;
        let reader = BufReader::new(file);
        if path.extension().map(|e| e == "gz").unwrap_or(false) {
            let decoder = flate2::read::GzDecoder::new(reader);
            Self::from_reader(BufReader::new(decoder))
        } else {
            Self::from_reader(reader)
        }
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    /// Interval index of a chromosome
    pub fn chromosome(&self, chr: u32) -> Option<&TranscriptIndex> {
        self.chromosomes.get(&chr)
    }

    /// Transcript by accession
    pub fn get(&self, accession: &str) -> Option<&Arc<TranscriptModel>> {
        self.by_accession.get(accession)
    }

    /// Number of transcripts
    pub fn len(&self) -> usize {
        self.by_accession.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_accession.is_empty()
    }

    /// Transcripts overlapping `interval`, with neighbors when none overlap
    ///
    /// Empty intervals are answered with a point query at their begin.
    /// Chromosomes without transcripts yield an empty result.
    pub fn query(&self, interval: &GenomeInterval) -> QueryResult<'_, Arc<TranscriptModel>> {
        let fwd = interval.with_strand(Strand::Plus);
        match self.chromosomes.get(&fwd.chr()) {
            Some(index) if fwd.is_empty() => index.find_overlapping_with_point(fwd.begin()),
            Some(index) => index.find_overlapping_with_interval(fwd.begin(), fwd.end()),
            None => QueryResult {
                entries: Vec::new(),
                left: None,
                right: None,
            },
        }
    }
}
