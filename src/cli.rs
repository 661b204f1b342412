//! Command-line interface definition. Anything not given as a flag is
//! collected interactively (see `prompts`).

use clap::Parser;
use distship_i18n::i18n::Lang;
use std::path::PathBuf;

/// Deploy a local build directory to a remote host over SSH/SFTP.
#[derive(Debug, Parser)]
#[command(name = "distship", version, about)]
pub struct Cli {
    /// Remote server address.
    #[arg(long)]
    pub host: Option<String>,

    /// Remote SSH port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Remote username.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Path to the private key file.
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Local directory to upload.
    #[arg(short, long)]
    pub local: Option<PathBuf>,

    /// Remote deployment root.
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Message language (en or zh); defaults to the system locale.
    #[arg(long)]
    pub lang: Option<Lang>,

    /// Fail instead of prompting for missing parameters.
    #[arg(long)]
    pub non_interactive: bool,
}
