//! recent-txns - view of the transactions currently open on a CockroachDB
//! cluster.
//!
//! Usage:
//!   recent-txns                          # TUI over the cluster from PG* env vars
//!   recent-txns --url postgresql://root@db:26257/defaultdb?sslmode=disable --insecure
//!   recent-txns --file txns.json         # TUI over a JSON dump, re-read every tick
//!   recent-txns --file txns.json --print --app movr --longer-than 5s
//!   recent-txns --print --watch -i 2     # print every 2 seconds until Ctrl-C

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use recent_txns::filter::{RecentTransactionFilters, application_names};
use recent_txns::model::ExecutionStatus;
use recent_txns::page::ActiveTransactionsPage;
use recent_txns::print::render_plain;
use recent_txns::section::RecentTransactionsSection;
use recent_txns::source::{
    CockroachSource, FileSource, SourceError, TlsMode, TransactionSource,
};
use recent_txns::table::{Pagination, SortSetting};
use recent_txns::tui::App;
use recent_txns::util::parse_duration;

/// Recent transactions viewer.
#[derive(Parser)]
#[command(
    name = "recent-txns",
    about = "Transactions currently open on a CockroachDB cluster",
    version
)]
struct Args {
    /// Read transactions from a JSON file instead of a cluster.
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Cluster connection string (URL or key=value).
    /// Default: built from PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE.
    #[arg(long, value_name = "CONN")]
    url: Option<String>,

    /// Connect without TLS.
    #[arg(long, conflicts_with = "accept_invalid_certs")]
    insecure: bool,

    /// Use TLS but accept self-signed certificates.
    #[arg(long)]
    accept_invalid_certs: bool,

    /// The cluster is a tenant (no contention columns, no lock wait query).
    #[arg(long)]
    tenant: bool,

    /// Only show these applications. Repeatable.
    #[arg(long = "app", value_name = "NAME")]
    apps: Vec<String>,

    /// Only show these statuses (executing, preparing, waiting, idle). Repeatable.
    #[arg(long = "status", value_name = "STATUS", value_parser = parse_status)]
    statuses: Vec<ExecutionStatus>,

    /// Only show transactions open longer than this (e.g. 500ms, 5s, 2m).
    #[arg(long, value_name = "DURATION")]
    longer_than: Option<String>,

    /// Initial search text (statement substring or execution ID prefix).
    #[arg(long, value_name = "TEXT", default_value = "")]
    search: String,

    /// Comma-separated column ids to show (e.g. executionID,status,retries).
    #[arg(long, value_name = "IDS")]
    columns: Option<String>,

    /// Column id marked as sorted.
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Sort direction ascending.
    #[arg(long)]
    asc: bool,

    /// Rows per page shown in the statistics line.
    #[arg(long, default_value = "20")]
    page_size: usize,

    /// Refresh interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Print the table once as plain text and exit.
    #[arg(long)]
    print: bool,

    /// With --print, keep printing every interval until Ctrl-C.
    #[arg(long, requires = "print")]
    watch: bool,

    /// Print application names of the current transactions and exit.
    #[arg(long)]
    list_apps: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_status(s: &str) -> Result<ExecutionStatus, String> {
    ExecutionStatus::parse(s).ok_or_else(|| {
        let names: Vec<&str> = ExecutionStatus::all().iter().map(|s| s.name()).collect();
        format!("unknown status '{}', expected one of {}", s, names.join(", "))
    })
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(args: &Args) -> std::io::Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("recent_txns={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // The TUI owns the terminal, so logs go to a file or nowhere.
    let (writer, ansi) = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if args.print || args.list_apps => (BoxMakeWriter::new(std::io::stderr), true),
        None => (BoxMakeWriter::new(std::io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

/// Builds the initial page state from the command line.
fn build_page(args: &Args) -> Result<ActiveTransactionsPage, String> {
    let mut filters = RecentTransactionFilters {
        app_names: args.apps.clone(),
        execution_statuses: args.statuses.clone(),
        ..Default::default()
    };
    if let Some(input) = &args.longer_than {
        filters.time_range = parse_duration(input).map_err(|e| e.to_string())?;
    }

    let mut page = ActiveTransactionsPage::new();
    page.is_tenant = args.tenant.then_some(true);
    page.pagination = Pagination {
        current: 1,
        page_size: args.page_size,
    };
    page.selected_columns = args.columns.as_deref().map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    });
    if let Some(column) = &args.sort {
        page.sort_setting = SortSetting::new(column.as_str(), args.asc);
    } else if args.asc {
        page.sort_setting = page.sort_setting.toggled();
    }
    page.set_filters(filters);
    page.set_search(args.search.as_str());
    Ok(page)
}

/// Creates the transaction source from the command line. A cluster source
/// must accept a connection before anything is shown.
fn build_source(args: &Args) -> Result<Box<dyn TransactionSource>, SourceError> {
    if let Some(path) = &args.file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let tls = if args.insecure {
        TlsMode::Disable
    } else if args.accept_invalid_certs {
        TlsMode::AcceptInvalidCerts
    } else {
        TlsMode::Verify
    };
    let mut source = match &args.url {
        Some(url) => CockroachSource::with_connection_string(url.clone(), tls),
        None => CockroachSource::from_env(tls),
    }
    .with_tenant(args.tenant);
    source.try_connect()?;
    Ok(Box::new(source))
}

/// Fetches once and prints. Returns false if the fetch failed.
fn print_once(
    page: &mut ActiveTransactionsPage,
    section: &mut RecentTransactionsSection,
    source: &mut dyn TransactionSource,
) -> bool {
    page.refresh(source);
    if let Some(err) = &page.last_error {
        eprintln!("Error: {}", err);
        return false;
    }
    print!("{}", render_plain(&section.render(&page.props())));
    true
}

fn run_print(
    mut page: ActiveTransactionsPage,
    mut source: Box<dyn TransactionSource>,
    watch: bool,
    interval: Duration,
) -> bool {
    let mut section = RecentTransactionsSection::new();
    if !watch {
        return print_once(&mut page, &mut section, source.as_mut());
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    while running.load(Ordering::SeqCst) {
        // Errors are reported per iteration; keep watching
        print_once(&mut page, &mut section, source.as_mut());
        println!();

        let deadline = Instant::now() + interval;
        while running.load(Ordering::SeqCst) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(100));
        }
    }
    true
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let page = match build_page(&args) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut source = match build_source(&args) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let interval = Duration::from_secs(args.interval.max(1));

    if args.list_apps {
        match source.fetch() {
            Ok(txns) => {
                for name in application_names(&txns) {
                    println!("{}", name);
                }
                return;
            }
            Err(e) => {
                eprintln!("Error: {}: {}", source.describe(), e);
                std::process::exit(1);
            }
        }
    }

    if args.print {
        if !run_print(page, source, args.watch, interval) {
            std::process::exit(1);
        }
        return;
    }

    info!("Starting TUI over {}", source.describe());
    let app = App::new(source, page);
    if let Err(e) = app.run(interval) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
