use std::path::Path;

use anyhow::{Context, Result, bail};
use mailverify_lib::{CheckOutcome, VerificationReport, VerificationResult};

use crate::args::Cli;

pub fn write_reports(reports: &[VerificationReport], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            write_human(reports, cli.details);
            Ok(())
        }
        "json" => write_json(reports, cli),
        "ndjson" => write_ndjson(reports, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson"),
    }
}

pub fn any_not_likely_valid(reports: &[VerificationReport]) -> bool {
    reports.iter().any(|report| !report.result.is_likely_valid)
}

fn write_human(reports: &[VerificationReport], details: bool) {
    for report in reports {
        println!("{}", human_line(&report.result));
        if details {
            for line in detail_lines(report) {
                println!("        {line}");
            }
        }
    }
}

fn human_line(result: &VerificationResult) -> String {
    let verdict = if result.is_likely_valid {
        "[LIKELY VALID]"
    } else {
        "[NOT LIKELY]  "
    };
    format!(
        "{verdict} {} :: score={} syntax={} domain={} mx={} disposable={}",
        result.email,
        result.overall_score,
        yes_no(result.is_valid_syntax),
        yes_no(result.domain_exists),
        yes_no(result.has_mx_record),
        yes_no(result.is_disposable),
    )
}

fn detail_lines(report: &VerificationReport) -> Vec<String> {
    if !report.result.is_valid_syntax {
        return vec!["dns: skipped (invalid syntax)".to_string()];
    }

    let mut lines = Vec::new();
    if let Some(outcome) = &report.domain_check {
        let addresses = report
            .addresses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(with_detail("domain", outcome, &addresses));
    }
    if let Some(outcome) = &report.mx_check {
        let records = report
            .mx_records
            .iter()
            .map(|r| format!("{}:{}", r.preference, r.exchange))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(with_detail("mx", outcome, &records));
    }
    lines
}

fn with_detail(label: &str, outcome: &CheckOutcome, detail: &str) -> String {
    if detail.is_empty() {
        format!("{label}: {outcome}")
    } else {
        format!("{label}: {outcome} [{detail}]")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn write_json(reports: &[VerificationReport], cli: &Cli) -> Result<()> {
    let s = if cli.details {
        serde_json::to_string_pretty(reports)?
    } else {
        serde_json::to_string_pretty(&flat_results(reports))?
    };
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

fn write_ndjson(reports: &[VerificationReport], cli: &Cli) -> Result<()> {
    let mut buf = Vec::new();
    for report in reports {
        let line = if cli.details {
            serde_json::to_string(report)?
        } else {
            serde_json::to_string(&report.result)?
        };
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
    }

    if let Some(path) = &cli.out {
        write_all_atomically(path, &buf)?;
    } else {
        print!("{}", String::from_utf8_lossy(&buf));
    }
    Ok(())
}

fn flat_results(reports: &[VerificationReport]) -> Vec<&VerificationResult> {
    reports.iter().map(|report| &report.result).collect()
}

fn write_all_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("create {}", Path::new(&tmp).display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| {
        format!(
            "rename {} -> {}",
            Path::new(&tmp).display(),
            path.display()
        )
    })?;
    Ok(())
}
