//! # distship – deploy engine
//!
//! Recursive directory-upload engine providing:
//!   • Transport-session lifecycle with public-key authentication
//!   • SFTP transfer channel (recursive mkdir, whole-file puts)
//!   • Lazy depth-first walking of the local tree
//!   • Upload orchestration with per-file outcome accounting
//!   • Progress events for an external presentation layer

pub mod deploy;
