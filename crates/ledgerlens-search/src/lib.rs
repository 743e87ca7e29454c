//! Relevance search over a document's sentences.
//!
//! Statistical fallback for chat queries with no recognized intent: builds a
//! TF-IDF vector space over the document's sentences and answers with the
//! sentence most cosine-similar to the query, if any clears the threshold.

mod stopwords;
mod tfidf;

pub use tfidf::{RelevanceIndex, SIMILARITY_THRESHOLD};
