mod cli;
mod logging;
mod prompts;
mod report;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use distship_deploy::deploy::types::DEFAULT_TIMEOUT_SECS;
use distship_deploy::deploy::{deploy, DeployConfig};
use distship_i18n::i18n::{translate, Lang};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init();

    let lang = cli.lang.unwrap_or_else(Lang::detect);

    match run(cli, lang).await {
        Ok(()) => {
            println!(
                "{}",
                translate(lang, "Deployment successful").green().bold()
            );
        }
        Err(e) => {
            eprintln!(
                "{}: {:#}",
                translate(lang, "Deployment failed").red().bold(),
                e
            );
            std::process::exit(1);
        }
    }
}

async fn run(cli: cli::Cli, lang: Lang) -> Result<()> {
    let answers = prompts::collect(&cli, lang)?;

    let private_key = std::fs::read_to_string(&answers.key_path)
        .with_context(|| format!("cannot read key file '{}'", answers.key_path.display()))?;

    let config = DeployConfig {
        host: answers.host,
        port: answers.port,
        username: answers.username,
        private_key,
        local_root: answers.local_root,
        remote_root: answers.remote_root,
        timeout_secs: DEFAULT_TIMEOUT_SECS,
    };
    config.validate()?;
    ensure!(
        config.local_root.is_dir(),
        "local directory '{}' does not exist",
        config.local_root.display()
    );

    let mut reporter = report::ConsoleReporter::new(lang);
    let summary = deploy(&config, &mut reporter).await?;

    println!(
        "{} ({} files, {} bytes, {} ms)",
        translate(lang, "All files uploaded successfully"),
        summary.files_uploaded,
        summary.bytes_transferred,
        summary.duration_ms
    );
    Ok(())
}
