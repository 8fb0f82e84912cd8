//! requp - requirements file updater library
//!
//! This library provides the core functionality for moving the exact pins
//! (`name==version`) of a pip requirements file to the latest release on a
//! PyPI-compatible index, while leaving every other byte of the file intact.

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod update;
