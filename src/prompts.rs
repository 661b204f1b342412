//! Interactive collection of connection parameters.
//!
//! Flags win; anything missing is asked for with a localized prompt and
//! non-empty validation. `--non-interactive` substitutes defaults where they
//! exist and fails where they don't.

use anyhow::{bail, Result};
use dialoguer::Input;
use distship_i18n::i18n::{translate, Lang};
use std::path::PathBuf;

use crate::cli::Cli;

pub const DEFAULT_PORT: u16 = 22;
pub const DEFAULT_LOCAL_ROOT: &str = "./dist";
pub const DEFAULT_REMOTE_ROOT: &str = "/var/www/html";

/// Connection parameters as collected from flags and prompts, before the
/// key file is read into memory.
#[derive(Debug)]
pub struct Answers {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub key_path: PathBuf,
    pub local_root: PathBuf,
    pub remote_root: String,
}

pub fn collect(cli: &Cli, lang: Lang) -> Result<Answers> {
    let host = resolve(
        cli.host.clone(),
        lang,
        "Please enter the server address",
        None,
        cli.non_interactive,
    )?;

    let port = match cli.port {
        Some(port) => port,
        None if cli.non_interactive => DEFAULT_PORT,
        None => Input::new()
            .with_prompt(translate(lang, "Please enter the server port"))
            .default(DEFAULT_PORT)
            .interact_text()?,
    };

    let username = resolve(
        cli.user.clone(),
        lang,
        "Please enter the server username",
        None,
        cli.non_interactive,
    )?;

    let key_path = resolve(
        cli.key.as_ref().map(|p| p.to_string_lossy().into_owned()),
        lang,
        "Please enter the ssh key path",
        None,
        cli.non_interactive,
    )?;

    let local_root = resolve(
        cli.local.as_ref().map(|p| p.to_string_lossy().into_owned()),
        lang,
        "Please enter the local project path",
        Some(DEFAULT_LOCAL_ROOT),
        cli.non_interactive,
    )?;

    let remote_root = resolve(
        cli.remote.clone(),
        lang,
        "Please enter the server deployment path",
        Some(DEFAULT_REMOTE_ROOT),
        cli.non_interactive,
    )?;

    Ok(Answers {
        host,
        port,
        username,
        key_path: expand_home(&key_path),
        local_root: expand_home(&local_root),
        remote_root,
    })
}

/// One parameter: flag value, else default (non-interactive), else prompt.
fn resolve(
    flag: Option<String>,
    lang: Lang,
    key: &str,
    default: Option<&str>,
    non_interactive: bool,
) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if non_interactive {
        match default {
            Some(value) => return Ok(value.to_string()),
            None => bail!("missing required parameter: {}", key),
        }
    }

    let mut input = Input::<String>::new().with_prompt(translate(lang, key));
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let value = input
        .validate_with(|answer: &String| {
            if answer.trim().is_empty() {
                Err("required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Expand a leading `~/` using the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_bypass_prompting_entirely() {
        let cli = Cli::try_parse_from([
            "distship",
            "--host",
            "h.example.com",
            "--port",
            "2222",
            "-u",
            "deploy",
            "-k",
            "/tmp/key",
            "-l",
            "./out",
            "-r",
            "/srv/www",
        ])
        .unwrap();

        let answers = collect(&cli, Lang::EnUs).unwrap();
        assert_eq!(answers.host, "h.example.com");
        assert_eq!(answers.port, 2222);
        assert_eq!(answers.username, "deploy");
        assert_eq!(answers.key_path, PathBuf::from("/tmp/key"));
        assert_eq!(answers.local_root, PathBuf::from("./out"));
        assert_eq!(answers.remote_root, "/srv/www");
    }

    #[test]
    fn non_interactive_uses_defaults_where_they_exist() {
        let cli = Cli::try_parse_from([
            "distship",
            "--host",
            "h.example.com",
            "-u",
            "deploy",
            "-k",
            "/tmp/key",
            "--non-interactive",
        ])
        .unwrap();

        let answers = collect(&cli, Lang::EnUs).unwrap();
        assert_eq!(answers.port, DEFAULT_PORT);
        assert_eq!(answers.local_root, PathBuf::from(DEFAULT_LOCAL_ROOT));
        assert_eq!(answers.remote_root, DEFAULT_REMOTE_ROOT);
    }

    #[test]
    fn non_interactive_fails_on_missing_required_parameters() {
        let cli = Cli::try_parse_from(["distship", "--non-interactive"]).unwrap();
        assert!(collect(&cli, Lang::EnUs).is_err());
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(expand_home("/etc/ssh/key"), PathBuf::from("/etc/ssh/key"));
        assert_eq!(expand_home("relative/key"), PathBuf::from("relative/key"));
    }

    #[test]
    fn expand_home_resolves_tilde_prefixes() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.ssh/id_rsa"), home.join(".ssh/id_rsa"));
        }
    }
}
