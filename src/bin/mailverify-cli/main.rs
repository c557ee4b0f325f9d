mod args;
mod logging;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use mailverify_lib::EmailVerifier;
use tracing::debug;

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let emails = match collect_inputs(&cli)? {
        Some(emails) => emails,
        None => {
            Cli::clap_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let options = cli.verifier_options()?;
    debug!(?options, count = emails.len(), "starting verification");
    let verifier = EmailVerifier::new(options)
        .await
        .context("initialize verifier")?;

    let reports = verifier.verify_many(&emails).await;
    output::write_reports(&reports, &cli)?;

    // codes de sortie : 0 tout probablement valide, 2 au moins un douteux, 1 fatal
    if output::any_not_likely_valid(&reports) {
        std::process::exit(2);
    }
    Ok(())
}

/// `None` when neither `--stdin` nor `verify` was given.
fn collect_inputs(cli: &Cli) -> Result<Option<Vec<String>>> {
    if cli.stdin {
        let mut emails = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            emails.push(line);
        }
        return Ok(Some(emails));
    }

    match &cli.cmd {
        Some(Commands::Verify { email }) => {
            if email.is_empty() {
                bail!("email is required");
            }
            Ok(Some(vec![email.clone()]))
        }
        None => Ok(None),
    }
}
