//! `showtime` CLI — plan back-to-back movie screenings from cached listings.
//!
//! ## Usage
//!
//! ```sh
//! # Optimize a raw options document (no listing snapshot needed)
//! showtime solve -i options.json --summary
//!
//! # Plan two movies in Shinjuku from a listing snapshot
//! showtime --data snapshot.json optimize -m "ズートピア2" -m "シャドウズ・エッジ" -a 新宿
//!
//! # Browse the snapshot
//! showtime --data snapshot.json showtimes --area 日比谷 --movie ズートピア
//! showtime --data snapshot.json movies --date 2026-10-20
//! showtime --data snapshot.json theaters
//! showtime --data snapshot.json status
//!
//! # Invoke any tool with a JSON argument document
//! echo '{"areas":["新宿"]}' | showtime --data snapshot.json call list_movies
//! showtime tools
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use showtime_engine::{
    AnchorPolicy, AreaAliases, Catalog, ExclusionReason, OptimizeOptions, OptimizeResult,
    Optimizer, OptimizerConfig, MAX_CANDIDATES,
};
use showtime_tools::service::DEFAULT_ANCHOR_FORMAT;
use showtime_tools::{tool_definitions, ToolConfig, ToolService};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIRECTIVES: &str = "warn";

#[derive(Parser)]
#[command(
    name = "showtime",
    version,
    about = "Plan back-to-back movie screenings from cached showtime listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Listing snapshot JSON (needed by every command except solve and tools)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Extra area aliases as a JSON object, merged over the built-in table
    #[arg(long, global = true)]
    aliases: Option<String>,

    /// Venue substring a runner-up schedule should include
    #[arg(long, global = true, conflicts_with = "no_anchor")]
    anchor_venue: Option<String>,

    /// Format the anchor venue screening must have (requires --anchor-venue)
    #[arg(long, global = true, requires = "anchor_venue")]
    anchor_format: Option<String>,

    /// Disable the anchor venue promotion
    #[arg(long, global = true)]
    no_anchor: bool,

    /// Maximum number of candidate schedules
    #[arg(long, global = true)]
    max_candidates: Option<usize>,

    /// Date used when a command omits --date (YYYY-MM-DD, defaults to the local date)
    #[arg(long, global = true)]
    today: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a raw options document (movieTitles, showtimes, ...)
    Solve {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print a readable itinerary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Plan a schedule from the listing snapshot
    Optimize {
        /// Movie title, in priority order (repeatable)
        #[arg(short = 'm', long = "movie", required = true)]
        movies: Vec<String>,
        /// Area name or alias (repeatable)
        #[arg(short = 'a', long = "area", required = true)]
        areas: Vec<String>,
        #[arg(long)]
        date: Option<String>,
        /// Earliest start (HH:MM)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Latest end (HH:MM)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Minutes between screenings (0-120)
        #[arg(long)]
        buffer: Option<i64>,
        #[arg(long)]
        prefer_premium: bool,
    },
    /// Showtimes grouped by movie and theater
    Showtimes {
        #[arg(long)]
        date: Option<String>,
        #[arg(short = 'a', long = "area")]
        areas: Vec<String>,
        /// Theater name substring
        #[arg(long)]
        theater: Option<String>,
        /// Movie title (fuzzy)
        #[arg(short = 'm', long)]
        movie: Option<String>,
    },
    /// Movies showing on a date
    Movies {
        #[arg(long)]
        date: Option<String>,
        #[arg(short = 'a', long = "area")]
        areas: Vec<String>,
    },
    /// Theaters per area
    Theaters {
        #[arg(short = 'a', long = "area")]
        areas: Vec<String>,
    },
    /// Snapshot freshness and size
    Status,
    /// Invoke a tool with a JSON argument document
    Call {
        /// Tool name (see `showtime tools`)
        tool: String,
        /// Argument file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List the available tools
    Tools,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    if !run(&cli)? {
        process::exit(1);
    }
    Ok(())
}

fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
        .context("Failed to parse RUST_LOG")?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
    Ok(())
}

/// Run the selected command. `Ok(false)` means a tool reported an error
/// payload, which has already been printed.
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Solve {
            input,
            output,
            summary,
        } => {
            let json = read_input(input.as_deref())?;
            let options: OptimizeOptions =
                serde_json::from_str(&json).context("Failed to parse optimize options")?;

            let optimizer = Optimizer::new(OptimizerConfig {
                max_candidates: cli.max_candidates.unwrap_or(MAX_CANDIDATES),
                anchor: anchor_policy(cli, None),
            });
            let result = optimizer.optimize(&options);

            let rendered = if *summary {
                render_summary(&result)
            } else {
                let mut pretty = serde_json::to_string_pretty(&result)?;
                pretty.push('\n');
                pretty
            };
            write_output(output.as_deref(), &rendered)?;
            Ok(true)
        }
        Commands::Optimize {
            movies,
            areas,
            date,
            from,
            to,
            buffer,
            prefer_premium,
        } => {
            let time_range = match (from, to) {
                (Some(start), Some(end)) => json!({ "start": start, "end": end }),
                _ => Value::Null,
            };
            let args = json!({
                "movieTitles": movies,
                "areas": areas,
                "date": date,
                "timeRange": time_range,
                "bufferMinutes": buffer,
                "preferPremium": prefer_premium,
            });
            respond(&load_service(cli)?, "optimize_schedule", &args)
        }
        Commands::Showtimes {
            date,
            areas,
            theater,
            movie,
        } => {
            let args = json!({
                "date": date,
                "areas": areas,
                "theater": theater,
                "movieTitle": movie,
            });
            respond(&load_service(cli)?, "get_showtimes", &args)
        }
        Commands::Movies { date, areas } => {
            let args = json!({ "date": date, "areas": areas });
            respond(&load_service(cli)?, "list_movies", &args)
        }
        Commands::Theaters { areas } => {
            respond(&load_service(cli)?, "list_theaters", &json!({ "areas": areas }))
        }
        Commands::Status => respond(&load_service(cli)?, "get_data_status", &json!({})),
        Commands::Call { tool, input } => {
            let service = load_service(cli)?;
            let args = read_input(input.as_deref())?;
            let response = service.call_json(tool, &args);
            println!("{}", response.text);
            Ok(!response.is_error)
        }
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(tool_definitions())?);
            Ok(true)
        }
    }
}

/// Anchor policy from the global flags, falling back to `default`.
fn anchor_policy(cli: &Cli, default: Option<AnchorPolicy>) -> Option<AnchorPolicy> {
    if cli.no_anchor {
        return None;
    }
    match &cli.anchor_venue {
        Some(venue) => Some(AnchorPolicy::new(
            venue.as_str(),
            cli.anchor_format.as_deref().unwrap_or(DEFAULT_ANCHOR_FORMAT),
        )),
        None => default,
    }
}

fn load_service(cli: &Cli) -> Result<ToolService> {
    let path = cli
        .data
        .as_deref()
        .context("This command needs a listing snapshot: pass --data <snapshot.json>")?;
    let json = read_file(path)?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("Failed to load listing snapshot: {}", path))?;

    let mut aliases = AreaAliases::builtin();
    if let Some(path) = cli.aliases.as_deref() {
        let extra = AreaAliases::from_json(&read_file(path)?)
            .with_context(|| format!("Failed to load area aliases: {}", path))?;
        aliases = aliases.extend(extra);
    }

    let defaults = ToolConfig::default();
    let today = cli
        .today
        .as_deref()
        .map(showtime_tools::validate::parse_date)
        .transpose()
        .context("Invalid --today")?;
    let config = ToolConfig {
        anchor: anchor_policy(cli, defaults.anchor.clone()),
        max_candidates: cli.max_candidates.unwrap_or(defaults.max_candidates),
        today,
        ..defaults
    };
    debug!(
        theaters = catalog.theaters().len(),
        rows = catalog.rows().len(),
        aliases = aliases.len(),
        "listing snapshot loaded"
    );

    Ok(ToolService::new(catalog, aliases, config))
}

/// Call a tool and print its text. Returns whether the call succeeded.
fn respond(service: &ToolService, tool: &str, args: &Value) -> Result<bool> {
    let response = service.call(tool, args);
    println!("{}", response.text);
    Ok(!response.is_error)
}

fn render_summary(result: &OptimizeResult) -> String {
    if result.candidates.is_empty() {
        return "No schedule found.\n".to_string();
    }

    let mut out = String::new();
    for (i, candidate) in result.candidates.iter().enumerate() {
        let stats = &candidate.stats;
        out.push_str(&format!(
            "Plan {} of {}: {} movie(s), {} watching, {} between screenings\n",
            i + 1,
            result.total_candidates,
            stats.total_movies,
            format_total(stats.total_watch_time_minutes),
            format_total(stats.total_break_time_minutes),
        ));

        for item in &candidate.schedule {
            if item.order > 1 {
                out.push_str(&format!("     ({} min break)\n", item.break_minutes_before));
            }
            let format = item
                .format
                .as_deref()
                .map(|f| format!(" [{}]", f))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}. {}-{}  {} @ {}{}\n",
                item.order, item.start_time, item.end_time, item.movie_title, item.theater, format
            ));
        }

        for excluded in &candidate.excluded {
            let reason = match excluded.reason {
                ExclusionReason::NotFound => "not found",
                ExclusionReason::TimeConflict => "does not fit",
            };
            out.push_str(&format!("  - {}: {}\n", excluded.title, reason));
        }
        out.push('\n');
    }
    out
}

/// A minute total as `{h}h{mm}m`. Totals can exceed a day, so no wrapping.
fn format_total(minutes: i64) -> String {
    format!("{}h{:02}m", minutes / 60, minutes % 60)
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
