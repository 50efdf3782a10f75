// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid passage retrieval for HR Desk.
//!
//! Queries are encoded twice: a BM25 sparse vector over hashed, stemmed
//! tokens, and a dense embedding from the configured [`EmbeddingAdapter`].
//! Both are blended by `alpha` and sent to a Pinecone hybrid index; matches
//! come back as [`Passage`]s carrying their text and remaining metadata.
//!
//! [`EmbeddingAdapter`]: hrdesk_core::EmbeddingAdapter
//! [`Passage`]: hrdesk_core::Passage

pub mod bm25;
pub mod hybrid;
pub mod murmur;
pub mod pinecone;
pub mod stopwords;

pub use bm25::{Bm25Encoder, Bm25Params, SparseVector};
pub use hybrid::{HybridRetriever, hybrid_scale};
pub use pinecone::PineconeIndex;
