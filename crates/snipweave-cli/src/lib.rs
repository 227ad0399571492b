//! snipweave CLI library.
//!
//! This crate provides the file-facing half of snipweave: audio decoding and
//! encoding, parameter loading, and the `generate`, `info`, and `validate`
//! commands used by the `snipweave` binary.

pub mod codec;
pub mod commands;
pub mod input;
pub mod logging;
