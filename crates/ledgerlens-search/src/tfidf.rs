//! TF-IDF sentence index with cosine scoring.

use std::collections::HashMap;

use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::stopwords::STOP_WORDS;
use ledgerlens_core::{Error, Result};

/// Minimum cosine similarity for a sentence to count as an answer.
pub const SIMILARITY_THRESHOLD: f32 = 0.1;

/// Word tokens of at least two characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Split text into sentences on `.`/`?`/`!` followed by whitespace, keeping
/// the terminator with its sentence (no lookbehind, byte scan instead).
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .collect()
}

fn l2_normalize(mut v: Array1<f32>) -> Array1<f32> {
    let norm = v.dot(&v).sqrt();
    if norm > 0.0 {
        v /= norm;
    }
    v
}

/// Term-weighted vector space over one document's sentences.
pub struct RelevanceIndex {
    sentences: Vec<String>,
    vocab: HashMap<String, usize>,
    idf: Array1<f32>,
    /// L2-normalized sentence vectors, one per sentence.
    vectors: Vec<Array1<f32>>,
}

impl RelevanceIndex {
    /// Build the index for a document.
    ///
    /// Newlines are flattened before sentence splitting. Documents that yield
    /// fewer than two sentences fall back to whitespace tokens as the unit of
    /// retrieval. An empty vocabulary (blank or all-stop-word text) is a
    /// `Search` error for the caller to soften into an advisory message.
    pub fn build(text: &str) -> Result<Self> {
        let flat = text.replace('\n', " ");

        let mut sentences: Vec<String> =
            split_sentences(&flat).into_iter().map(str::to_string).collect();
        if sentences.len() < 2 {
            sentences = flat.split_whitespace().map(str::to_string).collect();
        }
        if sentences.is_empty() {
            return Err(Error::Search("document text is empty".into()));
        }

        let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();

        let mut vocab: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                let next = vocab.len();
                vocab.entry(token.clone()).or_insert(next);
            }
        }
        if vocab.is_empty() {
            return Err(Error::Search("vocabulary is empty".into()));
        }

        // Smoothed inverse document frequency over the sentence set.
        let n = sentences.len() as f32;
        let mut df = vec![0f32; vocab.len()];
        for tokens in &tokenized {
            let mut seen = vec![false; vocab.len()];
            for token in tokens {
                let idx = vocab[token];
                if !seen[idx] {
                    seen[idx] = true;
                    df[idx] += 1.0;
                }
            }
        }
        let idf = Array1::from_iter(df.iter().map(|&d| ((1.0 + n) / (1.0 + d)).ln() + 1.0));

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut tf = Array1::<f32>::zeros(vocab.len());
                for token in tokens {
                    tf[vocab[token]] += 1.0;
                }
                l2_normalize(tf * &idf)
            })
            .collect();

        tracing::debug!(sentences = sentences.len(), terms = vocab.len(), "relevance index built");

        Ok(Self { sentences, vocab, idf, vectors })
    }

    /// Project a query into the index's vector space. Terms outside the
    /// document vocabulary contribute nothing.
    fn query_vector(&self, query: &str) -> Array1<f32> {
        let mut tf = Array1::<f32>::zeros(self.vocab.len());
        for token in tokenize(query) {
            if let Some(&idx) = self.vocab.get(&token) {
                tf[idx] += 1.0;
            }
        }
        l2_normalize(tf * &self.idf)
    }

    /// The sentence most similar to `query`, if it clears the threshold.
    pub fn answer(&self, query: &str) -> Option<&str> {
        let qv = self.query_vector(query);

        let mut best: Option<(usize, f32)> = None;
        for (i, sv) in self.vectors.iter().enumerate() {
            // Both sides are L2-normalized; the dot product is the cosine.
            let score = qv.dot(sv);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }

        match best {
            Some((i, score)) if score > SIMILARITY_THRESHOLD => Some(&self.sentences[i]),
            _ => None,
        }
    }
}
