//! sp - Super Productivity tasks from the command line
//!
//! This crate provides the core functionality for the `sp` CLI tool:
//! a client for the Super Productivity JSON export stored in Dropbox.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`client`] - Document accessor: lazy fetch, mutate, whole-document push
//! - [`model`] - Typed document schema and read views
//! - [`remote`] - File store trait and the Dropbox transport
//! - [`config`] - Configuration loading
//! - [`error`] - Error types and handling
//!
//! Every write replaces the entire remote document with no version
//! check: last writer wins. Concurrent runs of this tool, or the host
//! application's own sync, can silently clobber each other.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;

pub use client::Client;
pub use error::{Error, Result};
