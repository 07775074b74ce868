use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use day_layout::{
    events_from_json, layout_day_with_options, parse_day, parse_timezone, DayLayout,
    LayoutConfig, LayoutOptions,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "day-layout",
    about = "Lay out a day of calendar events into non-colliding columns",
    version
)]
struct Cli {
    /// JSON array of events (reads stdin if omitted or "-")
    input: Option<PathBuf>,

    /// Reference day (YYYY-MM-DD); defaults to today in --timezone
    #[arg(short, long)]
    day: Option<String>,

    /// IANA timezone for the day and for naive event times
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// JSON file overriding window bounds, minimum duration or padding
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let timezone = parse_timezone(&cli.timezone)?;
    let day = match &cli.day {
        Some(s) => parse_day(s)?,
        None => Utc::now().with_timezone(&timezone).date_naive(),
    };
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LayoutConfig::from_json_str(&text)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };

    let input = read_input(cli.input.as_ref())?;
    let events = events_from_json(&input).context("failed to parse events")?;
    tracing::info!(count = events.len(), %day, %timezone, "laying out events");

    let layout = layout_day_with_options(&events, day, &LayoutOptions { timezone, config });

    let output = match cli.format {
        Format::Json if cli.pretty => serde_json::to_string_pretty(&layout)?,
        Format::Json => serde_json::to_string(&layout)?,
        Format::Table => render_table(&layout, timezone),
    };
    println!("{output}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render_table(layout: &DayLayout, timezone: Tz) -> String {
    let mut lines = vec![format!(
        "{:<16} {:<11} {:>6} {:>9} {:>9} {:>9} {:>9}",
        "ID", "TIME", "COLUMN", "TOP", "HEIGHT", "LEFT", "WIDTH"
    )];
    for e in &layout.events {
        let style = e.layout.style();
        lines.push(format!(
            "{:<16} {:<11} {:>6} {:>9} {:>9} {:>9} {:>9}",
            e.id,
            format!(
                "{}-{}",
                e.clamped_start.with_timezone(&timezone).format("%H:%M"),
                e.clamped_end.with_timezone(&timezone).format("%H:%M")
            ),
            format!("{}/{}", e.column.column_index + 1, e.column.num_columns),
            style.top,
            style.height,
            style.left,
            style.width,
        ));
    }
    for d in &layout.dropped {
        lines.push(format!("dropped {} ({}): {}", d.id, d.reason, d.detail));
    }
    lines.join("\n")
}
