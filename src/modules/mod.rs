//! Module system for codemate

pub mod ask;
