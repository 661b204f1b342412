//! Renders deploy progress events as localized console lines, one per
//! event — the presentation half of the engine's progress-sink contract.

use distship_deploy::deploy::{DeployEvent, ProgressSink};
use distship_i18n::i18n::{translate, Lang};
use owo_colors::OwoColorize;

pub struct ConsoleReporter {
    lang: Lang,
}

impl ConsoleReporter {
    pub fn new(lang: Lang) -> Self {
        ConsoleReporter { lang }
    }
}

impl ProgressSink for ConsoleReporter {
    fn emit(&mut self, event: DeployEvent) {
        match event {
            DeployEvent::ConnectionEstablished { host, port } => {
                println!(
                    "{} ({}:{})",
                    translate(self.lang, "Connection successful").green(),
                    host,
                    port
                );
            }
            DeployEvent::DirectoryEnsured { path } => {
                println!(
                    "{}: {}",
                    translate(self.lang, "Create remote directory"),
                    path
                );
            }
            DeployEvent::FileUploaded { path, .. } => {
                println!(
                    "{}: {}",
                    translate(self.lang, "Upload successful").green(),
                    path
                );
            }
            DeployEvent::FileFailed { path, error } => {
                eprintln!(
                    "{}: {} ({})",
                    translate(self.lang, "Upload failed").red(),
                    path,
                    error
                );
            }
            DeployEvent::ConnectionClosed => {
                println!("{}", translate(self.lang, "Connection closed"));
            }
        }
    }
}
