//! Core library for the frete-tools command line application.
//!
//! The library consolidates an ESL Desktop freight export and a SIG model
//! spreadsheet into a single billing report. IO adapters live under
//! [`frete::tools::io`], the table representation inside
//! [`frete::tools::model`], the column matching helpers in
//! [`frete::tools::normalize`] and [`frete::tools::dedupe`], and the
//! orchestration under [`frete::tools::pipeline`].

pub mod frete;

pub use frete::tools::{
    Result, ToolError, consolidate, dedupe, derive, error, io, mapping, model, normalize,
    pipeline, report, verify,
};
