//! Ebooks Engine — Markov-chain generation of short posts.
//!
//! Trains a word-transition table over a corpus of short texts and walks it
//! at random to produce new text in the same style, then reassembles the
//! tokens into a cased, length-bounded string ready to publish.

pub mod core;
pub mod io;
pub mod schema;
