// src/lib.rs — Library root for learnpath

pub mod cli;
pub mod curation;
pub mod domain;
pub mod infra;
pub mod progress;
pub mod roadmap;
pub mod util;
