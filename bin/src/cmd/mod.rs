//! CLI subcommand modules.
//!
//! This module contains the implementations for all fundscore CLI subcommands.

pub(crate) mod config;
pub(crate) mod export;
pub(crate) mod rank;
pub(crate) mod serve;
