mod echo;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use mailsift_core::{CrawlConfig, EmailSet, FetchConfig, ScrapeReport, Scraper, scan_html};
use owo_colors::OwoColorize;

use echo::{print_banner, print_info, print_step, print_success, print_timing, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crawl a web domain and list the email addresses its pages expose
#[derive(Parser, Debug)]
#[command(name = "mailsift")]
#[command(author = "Mailsift Contributors")]
#[command(version)]
#[command(about = "Extract email addresses from a web domain", long_about = None)]
struct Args {
    /// Domain or URL to crawl, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit a JSON report instead of one address per line
    #[arg(long)]
    json: bool,

    /// How many link hops to follow from the start page
    #[arg(long, default_value = "2", value_name = "NUM")]
    depth: usize,

    /// Maximum number of pages to fetch
    #[arg(long, default_value = "100", value_name = "NUM")]
    max_pages: usize,

    /// How many pages to fetch in parallel
    #[arg(long, default_value = "8", value_name = "NUM")]
    concurrency: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Follow links leaving the start domain
    #[arg(long)]
    follow_external: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Scans a single already-loaded page (file or stdin input).
fn scan_one_page(input: &str, html: &str) -> ScrapeReport {
    let set = EmailSet::new();
    scan_html(&set, html);

    ScrapeReport {
        requested_url: input.to_string(),
        pages_crawled: 1,
        emails: set.snapshot(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mailsift_core=debug")),
            )
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .init();
    }

    let started = Instant::now();

    let report = if args.input == "-" {
        if args.verbose {
            print_step(1, 2, "Scanning stdin");
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;

        scan_one_page(&args.input, &buffer)
    } else if Path::new(&args.input).is_file() {
        if args.verbose {
            print_step(1, 2, &format!("Scanning file {}", args.input.bright_white()));
        }

        let html = fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read file: {}", args.input))?;

        scan_one_page(&args.input, &html)
    } else {
        if args.verbose {
            print_step(
                1,
                2,
                &format!("Crawling {}", args.input.bright_white().underline()),
            );
        }

        let config = CrawlConfig {
            max_depth: args.depth,
            max_pages: args.max_pages,
            concurrency: args.concurrency,
            follow_external_links: args.follow_external,
            fetch: FetchConfig {
                timeout: args.timeout,
                user_agent: args
                    .user_agent
                    .clone()
                    .unwrap_or_else(|| FetchConfig::default().user_agent),
            },
        };

        Scraper::new(config)
            .scrape(&args.input)
            .await
            .with_context(|| format!("Failed to crawl {}", args.input))?
    };

    if args.verbose {
        print_step(2, 2, "Writing output");
        print_timing("elapsed", started.elapsed());
        eprintln!();
    }

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        json.push('\n');
        json
    } else {
        report
            .emails
            .iter()
            .map(|email| format!("{email}\n"))
            .collect()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => print!("{output}"),
    }

    if args.verbose {
        if report.emails.is_empty() {
            print_warning("No addresses found");
        } else {
            print_success(&format!(
                "{} distinct addresses across {} pages",
                report.emails.len(),
                report.pages_crawled
            ));
        }
    }

    Ok(())
}
