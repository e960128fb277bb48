//! Demo application: generate users in a chosen layout, count active users
//! per country and print the result with the layout comparison.
//!
//! Run with:
//! ```bash
//! cargo run --release --example demo --features demo -- --help
//! RUST_LOG=debug cargo run --release --example demo --features demo -- --layout inline
//! ```

use std::time::Instant;

use cachelayout::count::{country_count, CountMap};
use cachelayout::generator::{generate, GeneratorConfig};
use cachelayout::image::{HeapImage, Image, InlineImage, LayoutKind};
use cachelayout::layout::LayoutReport;
use cachelayout::observers::json::JsonObserver;
use cachelayout::observers::table::{TableObserver, TableStyle};
use cachelayout::LayoutError;
use clap::{Parser, ValueEnum};
use log::info;

/// Output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty ASCII table
    Table,
    /// JSON format
    Json,
}

/// Icon layout selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutChoice {
    /// `[u8; 16384]` stored in the record
    Inline,
    /// `Vec<u8>` stored behind a pointer
    Heap,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Dots,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Dots => TableStyle::Dots,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Counts active users per country over inline or heap-backed records.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Icon layout of the generated users
    #[arg(short, long, value_enum, default_value = "heap")]
    layout: LayoutChoice,

    /// Number of users
    #[arg(short = 'n', long, default_value = "10000")]
    size: usize,

    /// Countries assigned round-robin
    #[arg(short, long, value_delimiter = ',', default_value = "AD,BB,CA,DK")]
    countries: Vec<String>,

    /// Every N-th user (starting at 0) is inactive; 0 keeps everyone active
    #[arg(long, default_value = "5")]
    inactive_every: usize,

    /// Allocate heap icons (inline icons are always present)
    #[arg(long)]
    icons: bool,

    /// Number of timed aggregation passes
    #[arg(short, long, default_value = "10")]
    rounds: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style (for table format)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip the layout comparison
    #[arg(long)]
    no_layout: bool,
}

/// Generates users of layout `I` and times `rounds` aggregation passes.
fn run<I: Image>(config: &GeneratorConfig, rounds: u32) -> Result<CountMap, LayoutError> {
    let users = generate::<I>(config)?;

    let mut counts = country_count(&users);
    let start = Instant::now();
    for _ in 0..rounds {
        counts = country_count(std::hint::black_box(&users));
    }
    let elapsed = start.elapsed();

    info!(
        "{} layout: {} users, {} rounds, {:?} per pass",
        I::KIND,
        users.len(),
        rounds,
        elapsed / rounds.max(1)
    );
    Ok(counts)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = GeneratorConfig::new()
        .with_size(args.size)
        .with_countries(args.countries.iter().cloned())
        .with_inactive_every(args.inactive_every)
        .with_icons(args.icons);

    let (kind, result) = match args.layout {
        LayoutChoice::Inline => (LayoutKind::Inline, run::<InlineImage>(&config, args.rounds)),
        LayoutChoice::Heap => (LayoutKind::Indirect, run::<HeapImage>(&config, args.rounds)),
    };

    let counts = match result {
        Ok(counts) => counts,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let report = LayoutReport::for_records(args.size);

    match args.format {
        OutputFormat::Table => {
            let observer = TableObserver::new()
                .with_style(args.style.into())
                .with_total(true)
                .with_title(format!("Active users ({} layout)", kind));
            println!("{}", observer.render(&counts));

            if !args.no_layout {
                let observer = TableObserver::new()
                    .with_style(args.style.into())
                    .with_title(format!("Record layout (cache line: {} B)", report.cache_line));
                println!("\n{}", observer.render_layout(&report));
                if let Some(ratio) = report.scan_ratio() {
                    println!("inline scan touches {:.1}x the cache lines of the heap scan", ratio);
                }
            }
        }

        OutputFormat::Json => {
            let observer = JsonObserver::new()
                .pretty(args.pretty)
                .wrap_in_snapshot(true)
                .include_timestamp(true)
                .with_layout(kind);

            let output = observer.to_json(&counts).and_then(|counts| {
                if args.no_layout {
                    Ok(counts)
                } else {
                    observer
                        .layout_to_json(&report)
                        .map(|layout| format!("{}\n{}", counts, layout))
                }
            });
            match output {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
