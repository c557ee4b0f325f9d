use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailverify_lib::VerifierOptions;

#[derive(Parser, Debug)]
#[command(name = "mailverify-cli", version, about = "Vérifie des adresses e-mail sans envoyer de message")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON selon --format)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// format: human|json|ndjson
    #[arg(long, default_value = "human")]
    pub format: String,

    /// inclut le détail des vérifications DNS (pass/fail/unknown, enregistrements)
    #[arg(long)]
    pub details: bool,

    /// fichier de configuration TOML
    #[arg(long, env = "MAILVERIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL de la liste de domaines jetables (tableau JSON)
    #[arg(long, env = "MAILVERIFY_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// liste locale de domaines jetables (prend le pas sur --registry-url)
    #[arg(long, env = "MAILVERIFY_REGISTRY_FILE")]
    pub registry_file: Option<PathBuf>,

    /// désactive la détection des domaines jetables
    #[arg(long)]
    pub no_registry: bool,

    /// échoue si la liste de domaines jetables est indisponible
    #[arg(long)]
    pub strict_registry: bool,

    /// timeout par vérification DNS (ms, 0 = illimité)
    #[arg(long, env = "MAILVERIFY_DNS_TIMEOUT_MS")]
    pub dns_timeout_ms: Option<u64>,

    /// serveur DNS à interroger (répétable, sinon configuration système)
    #[arg(long = "nameserver")]
    pub nameservers: Vec<IpAddr>,

    /// nombre d'adresses vérifiées en parallèle
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// logs détaillés (équivaut à RUST_LOG=mailverify_lib=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Verify {
        /// adresse e-mail à vérifier
        email: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    /// Options from `--config` (or defaults), then CLI/env overrides.
    pub fn verifier_options(&self) -> Result<VerifierOptions> {
        let mut options = match &self.config {
            Some(path) => VerifierOptions::from_file(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => VerifierOptions::default(),
        };

        if let Some(url) = &self.registry_url {
            options = options.with_registry_url(url.clone());
        }
        if let Some(path) = &self.registry_file {
            options = options.with_registry_file(path.clone());
        }
        if self.no_registry {
            options = options.without_registry();
        }
        if self.strict_registry {
            options = options.require_registry(true);
        }
        if let Some(ms) = self.dns_timeout_ms {
            options.dns_timeout_ms = ms;
        }
        if !self.nameservers.is_empty() {
            options = options.with_nameservers(self.nameservers.iter().copied());
        }
        if let Some(concurrency) = self.concurrency {
            options = options.with_concurrency(concurrency);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "mailverify-cli",
            "--no-registry",
            "--dns-timeout-ms",
            "1200",
            "--nameserver",
            "1.1.1.1",
            "--concurrency",
            "3",
            "verify",
            "alice@example.com",
        ])
        .expect("valid args");
        let options = cli.verifier_options().expect("options");
        assert!(!options.registry_enabled);
        assert_eq!(options.dns_timeout_ms, 1200);
        assert_eq!(options.nameservers.len(), 1);
        assert_eq!(options.concurrency, 3);
        assert!(matches!(cli.cmd, Some(Commands::Verify { ref email }) if email == "alice@example.com"));
    }

    #[test]
    fn registry_file_wins_over_url() {
        let cli = Cli::try_parse_from([
            "mailverify-cli",
            "--registry-url",
            "https://example.com/list.json",
            "--registry-file",
            "/tmp/list.json",
            "--stdin",
        ])
        .expect("valid args");
        let options = cli.verifier_options().expect("options");
        assert_eq!(options.registry_url, "https://example.com/list.json");
        assert_eq!(options.registry_file, Some(PathBuf::from("/tmp/list.json")));
    }
}
