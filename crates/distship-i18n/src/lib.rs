//! # distship – i18n
//!
//! Message catalog for the strings the CLI shows: prompt labels, progress
//! lines, and the final success/failure verdicts, in English and Simplified
//! Chinese. The language is an explicit parameter at every call site; there
//! is no process-wide language state.

pub mod i18n;
