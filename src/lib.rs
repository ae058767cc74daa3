//! Netease Cloud Music lyric retrieval - shared modules for the CLI and embedders.
//!
//! Takes a noisy (title, artist) pair from local file tags, searches the
//! catalog with progressively looser queries, scores the returned candidates
//! and, on a confident match, fetches the lyric text (plus translation when
//! available) and hands assembled records to a host-provided sink.

pub mod client;
pub mod config;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod scoring;
