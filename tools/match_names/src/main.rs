use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use scraper::{Html, Selector};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use readymatch::matching::SearchOutcome;
use readymatch::{clean_search_names, Candidate, MatchMode, MatcherConfig, SearchSummary};

#[derive(Parser, Debug)]
#[command(name = "match_names")]
#[command(about = "Classify saved person-search results against one or more searched names")]
struct Args {
    /// Name to search for (repeatable)
    #[arg(short, long = "name")]
    names: Vec<String>,

    /// File with one name per line (a leading `name` header is skipped,
    /// a trailing `,<birth year>` is dropped)
    #[arg(long)]
    names_file: Option<PathBuf>,

    /// JSON array of candidates: [{"name": ..., "location": ..., ...}]
    #[arg(long, conflicts_with = "html")]
    candidates: Option<PathBuf>,

    /// Saved HTML results page; each table row becomes a candidate
    #[arg(long)]
    html: Option<PathBuf>,

    /// Matching mode: lenient, strict or legacy (overrides READYMATCH_MODE)
    #[arg(long)]
    mode: Option<String>,

    /// Strict mode: require the first name to match exactly
    /// (overrides READYMATCH_EXACT_FIRST_NAME; `--exact-first-name=false` turns it off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    exact_first_name: Option<bool>,

    /// Classify candidates in parallel
    /// (overrides READYMATCH_PARALLEL; `--parallel=false` turns it off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    parallel: Option<bool>,

    /// Debug logging (per-candidate reasoning)
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct NameReport {
    search_name: String,
    searched_at: DateTime<Utc>,
    mode: MatchMode,
    summary: SearchSummary,
    #[serde(flatten)]
    outcome: SearchOutcome,
}

fn main() -> Result<()> {
    // Load .env before the matcher config reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let env_config = MatcherConfig::from_env().context("Invalid matcher configuration")?;
    let config = resolve_config(&args, env_config)?;
    info!("Matching with {:?}", config);

    let names = load_names(&args)?;
    if names.is_empty() {
        bail!("No valid names to search; pass --name or --names-file");
    }

    let candidates = load_candidates(&args)?;
    info!("Loaded {} candidate(s)", candidates.len());

    let reports: Vec<NameReport> = names
        .into_iter()
        .map(|name| {
            let outcome = config.find_matches(&name, &candidates);
            NameReport {
                summary: SearchSummary::from_stats(&outcome.stats),
                searched_at: Utc::now(),
                mode: config.mode,
                search_name: name,
                outcome,
            }
        })
        .collect();

    let output = serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
    println!("{}", output);

    Ok(())
}

/// Flags given on the command line win over the environment in both directions.
fn resolve_config(args: &Args, mut config: MatcherConfig) -> Result<MatcherConfig> {
    if let Some(ref mode) = args.mode {
        config.mode = mode.parse().context("Invalid --mode")?;
    }
    if let Some(exact_first_name) = args.exact_first_name {
        config.exact_first_name = exact_first_name;
    }
    if let Some(parallel) = args.parallel {
        config.parallel = parallel;
    }

    if config.exact_first_name && config.mode != MatchMode::Strict {
        warn!("--exact-first-name only affects strict mode (current mode: {})", config.mode);
    }

    Ok(config)
}

fn load_names(args: &Args) -> Result<Vec<String>> {
    let mut raw = args.names.clone();

    if let Some(ref path) = args.names_file {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read names file: {}", path.display()))?;
        raw.extend(parse_names_file(&content));
    }

    Ok(clean_search_names(raw))
}

fn parse_names_file(content: &str) -> Vec<String> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let field = strip_birth_year(line.trim()).trim_matches('"').trim();
            if i == 0 && field.eq_ignore_ascii_case("name") {
                None
            } else {
                Some(field.to_string())
            }
        })
        .collect()
}

/// `"Anthony Bek",1980` -> `"Anthony Bek"`. Commas inside the name are kept
/// unless the text after the last one is a year.
fn strip_birth_year(line: &str) -> &str {
    match line.rsplit_once(',') {
        Some((name, tail)) if tail.trim().parse::<u16>().is_ok() => name.trim(),
        _ => line,
    }
}

fn load_candidates(args: &Args) -> Result<Vec<Candidate>> {
    if let Some(ref path) = args.candidates {
        let content = read_file(path)?;
        return serde_json::from_str(&content)
            .context(format!("Failed to parse candidates JSON: {}", path.display()));
    }

    if let Some(ref path) = args.html {
        let content = read_file(path)?;
        let candidates = parse_result_rows(&content);
        if candidates.is_empty() {
            warn!("No result rows found in {}", path.display());
        }
        return Ok(candidates);
    }

    bail!("No candidates given; pass --candidates or --html")
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).context(format!("Failed to read file: {}", path.display()))
}

/// Extract candidates from every results table on a saved page.
///
/// First cell is the name, second the location, the rest is joined as
/// additional info. The first row of a multi-row table is treated as a header.
fn parse_result_rows(html: &str) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    let (Ok(table_selector), Ok(row_selector), Ok(cell_selector)) = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("td"),
    ) else {
        return candidates;
    };

    for table in document.select(&table_selector) {
        // Skip layout tables with hardly any text
        let table_text = table.text().collect::<String>();
        if table_text.trim().chars().count() < 10 {
            continue;
        }

        let rows: Vec<_> = table.select(&row_selector).collect();
        let start_row = if rows.len() > 1 { 1 } else { 0 };

        for row in &rows[start_row..] {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| clean_text(&cell.text().collect::<Vec<_>>().join(" ")))
                .collect();

            let Some(name) = cells.first().filter(|name| !name.is_empty()) else {
                continue;
            };

            candidates.push(Candidate {
                name: name.clone(),
                location: cells.get(1).cloned().unwrap_or_default(),
                additional_info: cells.get(2..).map(|rest| rest.join(" | ")).unwrap_or_default(),
                ..Candidate::default()
            });
        }
    }

    candidates
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
