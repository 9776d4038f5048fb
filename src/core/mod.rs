//! Core library components.
//!
//! Everything here is synchronous and free of global state: the filesystem
//! and environment are handed in, and nothing is cached between calls.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod fs;
pub mod keys;
pub mod store;
pub mod types;
