// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! BM25 sparse encoder.
//!
//! Tokenization follows the encoder the index was built with: Penn
//! Treebank-style word splitting (edge punctuation and English clitics split
//! off, inner hyphens kept), lowercasing, removal of single-character
//! punctuation tokens and English stopwords, then the original Porter
//! stemmer. Tokens hash to `u32` indices with MurmurHash3. Parameters persist
//! as JSON (see [`Bm25Params`]).

use std::collections::HashMap;
use std::path::Path;

use hrdesk_core::HrDeskError;
use serde::{Deserialize, Serialize};

use crate::murmur::murmur3_32;
use crate::stopwords;

/// A sparse vector in the index's wire layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Document frequency per hashed token, stored as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocFreq {
    pub indices: Vec<u32>,
    pub values: Vec<f64>,
}

/// Persisted encoder state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub avgdl: f64,
    pub n_docs: u64,
    pub doc_freq: DocFreq,
    #[serde(default = "default_b")]
    pub b: f64,
    #[serde(default = "default_k1")]
    pub k1: f64,
    #[serde(default = "default_true")]
    pub lower_case: bool,
    #[serde(default = "default_true")]
    pub remove_punctuation: bool,
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
    #[serde(default = "default_true")]
    pub stem: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_b() -> f64 {
    0.75
}

fn default_k1() -> f64 {
    1.2
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "english".to_string()
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            avgdl: 0.0,
            n_docs: 0,
            doc_freq: DocFreq::default(),
            b: default_b(),
            k1: default_k1(),
            lower_case: true,
            remove_punctuation: true,
            remove_stopwords: true,
            stem: true,
            language: default_language(),
        }
    }
}

/// Suffixes split off a word as their own token, longest first.
const CLITICS: &[&str] = &["n't", "'re", "'ll", "'ve", "'s", "'d", "'m"];

/// Text to stemmed tokens, configured by the persisted flags.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    lower_case: bool,
    remove_punctuation: bool,
    remove_stopwords: bool,
    stem: bool,
}

impl Tokenizer {
    fn from_params(params: &Bm25Params) -> Result<Self, HrDeskError> {
        if !params.language.eq_ignore_ascii_case("english") {
            return Err(HrDeskError::RetrieverUnavailable(format!(
                "unsupported BM25 language `{}`",
                params.language
            )));
        }
        Ok(Self {
            lower_case: params.lower_case,
            remove_punctuation: params.remove_punctuation,
            remove_stopwords: params.remove_stopwords,
            stem: params.stem,
        })
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokens(text)
            .into_iter()
            .map(|t| {
                if self.lower_case {
                    t.to_lowercase()
                } else {
                    t.to_string()
                }
            })
            .filter(|t| !(self.remove_punctuation && is_punctuation_token(t)))
            .filter(|t| !(self.remove_stopwords && stopwords::is_stopword(t)))
            .map(|t| if self.stem { stem(&t) } else { t })
            .collect()
    }
}

/// Split on whitespace, then peel edge punctuation into one token per
/// character and split a trailing clitic (`'s`, `n't`, ...) off the word.
fn word_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let start = chunk
            .find(|c: char| !c.is_ascii_punctuation())
            .unwrap_or(chunk.len());
        let (lead, rest) = chunk.split_at(start);
        let end = rest
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_ascii_punctuation())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let (word, trail) = rest.split_at(end);

        tokens.extend(lead.split_inclusive(|_: char| true));
        match clitic_split(word) {
            Some(at) => {
                let (stem, clitic) = word.split_at(at);
                tokens.push(stem);
                tokens.push(clitic);
            }
            None if !word.is_empty() => tokens.push(word),
            None => {}
        }
        tokens.extend(trail.split_inclusive(|_: char| true));
    }
    tokens
}

fn clitic_split(word: &str) -> Option<usize> {
    CLITICS.iter().find_map(|clitic| {
        let at = word.len().checked_sub(clitic.len())?;
        (at > 0 && word.is_char_boundary(at) && word[at..].eq_ignore_ascii_case(clitic))
            .then_some(at)
    })
}

fn is_punctuation_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

// Porter works on lowercase ASCII words; anything else is kept verbatim.
fn stem(token: &str) -> String {
    if token.is_ascii() {
        porter_stemmer::stem(&token.to_ascii_lowercase())
    } else {
        token.to_string()
    }
}

/// BM25 encoder over hashed token indices.
#[derive(Debug)]
pub struct Bm25Encoder {
    params: Bm25Params,
    doc_freq: HashMap<u32, f64>,
    tokenizer: Tokenizer,
}

impl Bm25Encoder {
    /// An unfitted encoder with default parameters.
    pub fn new() -> Result<Self, HrDeskError> {
        Self::from_params(Bm25Params::default())
    }

    pub fn from_params(params: Bm25Params) -> Result<Self, HrDeskError> {
        if params.doc_freq.indices.len() != params.doc_freq.values.len() {
            return Err(HrDeskError::RetrieverUnavailable(
                "BM25 doc_freq indices and values differ in length".into(),
            ));
        }
        let tokenizer = Tokenizer::from_params(&params)?;
        let doc_freq = params
            .doc_freq
            .indices
            .iter()
            .copied()
            .zip(params.doc_freq.values.iter().copied())
            .collect();
        Ok(Self {
            params,
            doc_freq,
            tokenizer,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, HrDeskError> {
        let params: Bm25Params = serde_json::from_str(json).map_err(|e| {
            HrDeskError::RetrieverUnavailable(format!("invalid BM25 parameter file: {e}"))
        })?;
        Self::from_params(params)
    }

    /// Read parameters written by [`Bm25Encoder::dump`].
    pub fn load(path: &Path) -> Result<Self, HrDeskError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            HrDeskError::RetrieverUnavailable(format!(
                "cannot read BM25 parameters at {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    pub fn to_json(&self) -> Result<String, HrDeskError> {
        serde_json::to_string(&self.params)
            .map_err(|e| HrDeskError::Internal(format!("failed to serialize BM25 parameters: {e}")))
    }

    pub fn dump(&self, path: &Path) -> Result<(), HrDeskError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| {
            HrDeskError::Internal(format!(
                "cannot write BM25 parameters to {}: {e}",
                path.display()
            ))
        })
    }

    /// Compute corpus statistics from `corpus`, replacing any earlier fit.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
        let mut doc_freq: HashMap<u32, f64> = HashMap::new();
        let mut total_len = 0usize;

        for doc in corpus {
            let (indices, counts) = self.term_frequencies(doc.as_ref());
            total_len += counts.iter().sum::<f64>() as usize;
            for index in indices {
                *doc_freq.entry(index).or_default() += 1.0;
            }
        }

        let n_docs = corpus.len() as u64;
        self.params.n_docs = n_docs;
        self.params.avgdl = if n_docs == 0 {
            0.0
        } else {
            total_len as f64 / n_docs as f64
        };

        let mut entries: Vec<(u32, f64)> = doc_freq.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        self.params.doc_freq = DocFreq {
            indices: entries.iter().map(|(k, _)| *k).collect(),
            values: entries.iter().map(|(_, v)| *v).collect(),
        };
        self.doc_freq = doc_freq;
    }

    /// Query vector: normalized IDF of each distinct query token.
    ///
    /// Tokens unseen at fit time count as occurring in one document.
    pub fn encode_query(&self, text: &str) -> SparseVector {
        let (indices, _) = self.term_frequencies(text);
        let n_docs = self.params.n_docs as f64;
        let idf: Vec<f64> = indices
            .iter()
            .map(|i| {
                let df = self.doc_freq.get(i).copied().unwrap_or(1.0);
                ((n_docs + 1.0) / (df + 0.5)).ln()
            })
            .collect();

        let sum: f64 = idf.iter().sum();
        let values = if sum == 0.0 {
            idf.iter().map(|v| *v as f32).collect()
        } else {
            idf.iter().map(|v| (v / sum) as f32).collect()
        };
        SparseVector { indices, values }
    }

    /// Document vector: BM25 term-frequency saturation.
    pub fn encode_document(&self, text: &str) -> SparseVector {
        let (indices, tf) = self.term_frequencies(text);
        let doc_len: f64 = tf.iter().sum();
        let Bm25Params { k1, b, avgdl, .. } = self.params;
        let length_norm = if avgdl > 0.0 { doc_len / avgdl } else { 1.0 };

        let values = tf
            .iter()
            .map(|f| (f / (k1 * (1.0 - b + b * length_norm) + f)) as f32)
            .collect();
        SparseVector { indices, values }
    }

    /// Distinct hashed tokens in first-seen order, with their counts.
    fn term_frequencies(&self, text: &str) -> (Vec<u32>, Vec<f64>) {
        let mut indices = Vec::new();
        let mut counts: Vec<f64> = Vec::new();
        let mut position: HashMap<u32, usize> = HashMap::new();

        for token in self.tokenizer.tokenize(text) {
            let index = murmur3_32(token.as_bytes(), 0);
            match position.get(&index) {
                Some(&at) => counts[at] += 1.0,
                None => {
                    position.insert(index, indices.len());
                    indices.push(index);
                    counts.push(1.0);
                }
            }
        }
        (indices, counts)
    }
}
