//! # Ready-to-use NLP pipelines
//!
//! Currently a single pipeline is provided:
//! - `translation`: sequence-to-sequence translation backed by a pretrained
//!   model repository (SentencePiece tokenization, CTranslate2 inference)

pub mod translation;
