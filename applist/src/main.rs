use anyhow::Context;
use applist_scan::Record;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use sysinfo::System;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the scan as a JSON report instead of paging through it.
    #[arg(long)]
    json: bool,

    #[arg(short, long, default_value = "false")]
    pretty: bool,

    /// ID to map the report to a host. Defaults to hostname if not provided.
    #[arg(long)]
    id: Option<String>,

    /// URL to POST the JSON report to.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Serialize)]
struct ScanReport {
    metadata: Metadata,
    applications: Vec<Record>,
}

#[derive(Serialize)]
struct Metadata {
    // The user may provide this id to map the report to a host. If not
    // provided, the hostname is used.
    id: String,
    timestamp: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    let applications =
        applist_scan::scan_installed().context("scanning installed applications")?;
    debug!(count = applications.len(), "scan finished");

    if args.url.is_none() && !args.json {
        return page_applications(&applications);
    }

    // Determine Host ID: Argument > Hostname > "unknown"
    let host_id = args
        .id
        .or_else(System::host_name)
        .unwrap_or_else(|| "unknown".to_string());

    let report = ScanReport {
        metadata: Metadata {
            id: host_id,
            timestamp: Utc::now(),
        },
        applications,
    };

    if let Some(url) = args.url {
        let client = reqwest::Client::new();
        match client.post(&url).json(&report).send().await {
            Ok(res) => {
                if res.status().is_success() {
                    println!("Successfully sent report to {}", url);
                } else {
                    eprintln!("Failed to send report to {}: Status {}", url, res.status());
                }
            }
            Err(e) => eprintln!("Error sending report to {}: {}", url, e),
        }
    } else {
        let output = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", output);
    }

    Ok(())
}

fn init_logging() {
    // Keep stdout clean for the pager and the JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Shows the records one screen at a time: Enter advances, `q` quits.
fn page_applications(applications: &[Record]) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut keys = stdin.lock().lines();

    println!("Found {} applications:", applications.len());
    println!("Press Enter to show the list");
    if keys.next().is_none() {
        return Ok(());
    }

    for application in applications {
        // ANSI clear-screen, cursor home
        print!("\x1b[2J\x1b[H");
        println!("Enter for next, q to quit\n");
        print!("{}", application);
        io::stdout().flush()?;

        match keys.next() {
            Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => break,
            Some(Ok(_)) => {}
            // EOF or a broken terminal ends the tour
            _ => break,
        }
    }

    println!("The end!");
    Ok(())
}
