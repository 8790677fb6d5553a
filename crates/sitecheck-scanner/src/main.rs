//! Sitecheck Scanner - audits captured pages from the command line
//!
//! Reads an HTML capture from disk, reconstructs a page model (links,
//! forms, plus headers/cookies supplied on the command line), runs every
//! applicable built-in check and reports the findings.

mod capture;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sitecheck_audit::{Auditor, IssueRegistry};
use sitecheck_checks::{builtin, CheckRegistry};
use sitecheck_common::{Config, LogConfig, LogFormat};
use sitecheck_core::{Cookie, Issue, Page};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Sitecheck page scanner
#[derive(Parser, Debug)]
#[command(name = "sitecheck")]
#[command(version)]
#[command(about = "Audit a captured page for security issues", long_about = None)]
struct Args {
    /// Path to the captured HTML file
    html: PathBuf,

    /// URL the capture was taken from
    #[arg(short, long, default_value = "http://localhost/")]
    url: String,

    /// Configuration file path
    #[arg(short, long, default_value = "/etc/sitecheck/sitecheck.toml")]
    config: String,

    /// Response header from the capture, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Cookie from the capture, as "name=value[;Secure][;HttpOnly]" (repeatable)
    #[arg(short = 'C', long = "cookie")]
    cookies: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format (pretty, json, compact)
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// Emit findings as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    sitecheck_common::init_logging_with_config(
        LogConfig::new()
            .level(&args.log_level)
            .format(LogFormat::from_name(&args.log_format)),
    );

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        info!("config file not found, using defaults");
        Config::default()
    };
    let config = config.merge_env();

    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("reading {}", args.html.display()))?;
    let mut page = capture::page_from_html(&args.url, &html)?;
    apply_capture_args(&mut page, &args)?;

    let checks = Arc::new(CheckRegistry::default());
    builtin::register_all(&checks)?;

    let issues = Arc::new(IssueRegistry::new());
    if config.scanner.no_store {
        issues.disable_store();
    }

    let auditor = Auditor::new(checks, issues, config.audit.clone());
    let summary = auditor.run(&page);
    let findings = auditor.issues().issues();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        report(&findings);
        println!(
            "{} issues ({} checks run, {} skipped, {} failed)",
            findings.len(),
            summary.executed,
            summary.skipped,
            summary.failed
        );
    }

    Ok(())
}

/// Fold command-line headers and cookies into the parsed page
fn apply_capture_args(page: &mut Page, args: &Args) -> Result<()> {
    for header in &args.headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("invalid header {header:?}, expected \"Name: value\"");
        };
        page.headers.push(sitecheck_core::Header::new(
            name.trim(),
            value.trim(),
        ));
    }

    for cookie in &args.cookies {
        let mut parts = cookie.split(';');
        let pair = parts.next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid cookie {cookie:?}, expected \"name=value[;Secure][;HttpOnly]\"");
        };

        let mut parsed = Cookie::new(name.trim(), value.trim());
        for attr in parts {
            match attr.trim().to_ascii_lowercase().as_str() {
                "secure" => parsed.secure = true,
                "httponly" => parsed.http_only = true,
                other => bail!("unknown cookie attribute {other:?} in {cookie:?}"),
            }
        }
        page.cookies.push(parsed);
    }

    Ok(())
}

fn report(findings: &[Issue]) {
    for issue in findings {
        println!("[{}] {} ({})", issue.severity, issue.title, issue.check);
        println!("    at {}", issue.url);
        if !issue.proof.is_empty() {
            println!("    proof: {}", issue.proof);
        }
        if let Some(remediation) = &issue.remediation {
            println!("    fix: {}", remediation);
        }
    }
}
