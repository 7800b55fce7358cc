//! Command-line driver for the exhibitor dashboard core.
//!
//! Usage:
//!     vipboard load companies.json
//!     vipboard ranking companies.json --filter gold
//!     vipboard search companies.json "惠州" --limit 5
//!     vipboard company companies.json "TCL实业控股股份有限公司"
//!     vipboard demo

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use vipboard_model::CompanyRecord;
use vipboard_query::{
    find_company, rank_companies, ranking_statistics, search_companies, RankingFilter,
    SearchQuery,
};
use vipboard_report::{completion, radar_profile, render_report, summarize_company};
use vipboard_scoring::{aggregate_statistics, ScoringConfig};
use vipboard_store::{health, load_demo, load_rows, CompanyStore, InMemoryStore};

#[derive(Parser)]
#[command(name = "vipboard")]
#[command(about = "Structure, score and rank VIP exhibitor spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scoring config (JSON); omitted keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-row detail
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a rows file and print the assembled records
    Load {
        /// JSON array of row objects keyed by column header
        rows: PathBuf,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Load the built-in demo company
    Demo {
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Rank companies by weighted total
    Ranking {
        rows: PathBuf,

        /// all, gold, silver, brand, top10, high_score
        #[arg(long, default_value = "all")]
        filter: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Search by name, city or introduction
    Search {
        rows: PathBuf,

        query: String,

        #[arg(short, long, default_value_t = SearchQuery::DEFAULT_LIMIT)]
        limit: usize,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Dashboard and leaderboard statistics
    Stats { rows: PathBuf },

    /// Show one company's report and chart data
    Company {
        rows: PathBuf,

        name: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Report store health, optionally after loading a rows file
    Health { rows: Option<PathBuf> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let directive = if cli.verbose { "vipboard=debug" } else { "vipboard=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_json_file(path)
            .with_context(|| format!("loading scoring config {}", path.display()))?,
        None => ScoringConfig::default(),
    };
    tracing::debug!(?config, "Scoring config");

    let store = InMemoryStore::new();

    match cli.command {
        Commands::Load { rows, format } => {
            run_load(&store, &config, &rows, format)?;
        }
        Commands::Demo { format } => {
            load_demo(&store, &config)?;
            print_records(&store.snapshot()?, format)?;
        }
        Commands::Ranking {
            rows,
            filter,
            format,
        } => {
            load_file(&store, &config, &rows)?;
            run_ranking(&store, &filter, format)?;
        }
        Commands::Search {
            rows,
            query,
            limit,
            format,
        } => {
            load_file(&store, &config, &rows)?;
            run_search(&store, &query, limit, format)?;
        }
        Commands::Stats { rows } => {
            load_file(&store, &config, &rows)?;
            run_stats(&store)?;
        }
        Commands::Company { rows, name, format } => {
            load_file(&store, &config, &rows)?;
            run_company(&store, &name, format)?;
        }
        Commands::Health { rows } => {
            if let Some(rows) = rows {
                load_file(&store, &config, &rows)?;
            }
            print_json(&health(&store)?)?;
        }
    }

    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading rows file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing rows file {}", path.display()))?;

    match value {
        serde_json::Value::Array(rows) => Ok(rows),
        _ => bail!("{} must contain a JSON array of rows", path.display()),
    }
}

fn load_file(store: &InMemoryStore, config: &ScoringConfig, path: &Path) -> Result<()> {
    let rows = read_rows(path)?;
    let summary = load_rows(store, rows, config)?;
    for skipped in &summary.skipped {
        eprintln!("Skipped row {}: {}", skipped.index + 1, skipped.reason);
    }
    Ok(())
}

fn run_load(store: &InMemoryStore, config: &ScoringConfig, path: &Path, format: Format) -> Result<()> {
    load_file(store, config, path)?;
    let records = store.snapshot()?;
    print_records(&records, format)?;

    if format == Format::Text {
        let stats = aggregate_statistics(&records);
        println!("\n---");
        println!(
            "Loaded {} companies | average {} | gold VIP {} | brands {}",
            stats.total_companies, stats.average_score, stats.gold_vip_count, stats.brand_companies
        );
    }
    Ok(())
}

fn run_ranking(store: &InMemoryStore, filter: &str, format: Format) -> Result<()> {
    let filter: RankingFilter = filter.parse()?;
    let records = store.snapshot()?;
    let ranked = rank_companies(&records, filter);

    if format == Format::Json {
        return print_json(&ranked);
    }

    println!("Ranking ({})", filter.name());
    println!("---");
    for entry in &ranked {
        println!("{:>3}. {}", entry.rank, summarize_company(entry.company));
    }
    println!("---");
    println!("Total: {} companies", ranked.len());
    Ok(())
}

fn run_search(store: &InMemoryStore, text: &str, limit: usize, format: Format) -> Result<()> {
    let records = store.snapshot()?;
    let query = SearchQuery::new(text).with_limit(limit);
    let hits = search_companies(&records, &query)?;

    if format == Format::Json {
        return print_json(&hits);
    }

    println!("Searching for: {}", text.trim());
    println!("---");
    for (i, hit) in hits.iter().enumerate() {
        println!("{}. {}", i + 1, summarize_company(hit));
    }
    println!("---");
    println!("Total: {} results", hits.len());
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    dashboard: vipboard_scoring::AggregateStatistics,
    ranking: Option<vipboard_query::RankingStatistics>,
    store: &'a str,
}

fn run_stats(store: &InMemoryStore) -> Result<()> {
    let records = store.snapshot()?;
    print_json(&StatsOutput {
        dashboard: aggregate_statistics(&records),
        ranking: ranking_statistics(&records),
        store: store.name(),
    })
}

fn run_company(store: &InMemoryStore, name: &str, format: Format) -> Result<()> {
    let records = store.snapshot()?;
    let Some(company) = find_company(&records, name) else {
        bail!("Company not found: {}", name);
    };

    if format == Format::Json {
        return print_json(company);
    }

    print!("{}", render_report(company));
    println!("\nRadar");
    for spoke in radar_profile(&company.scores) {
        println!(
            "  {} ({}): {}/{} = {:.1}%",
            spoke.label, spoke.label_en, spoke.score, spoke.max, spoke.percent
        );
    }
    let done = completion(&company.scores);
    println!(
        "\nCompletion: {}/{} ({:.1}%)",
        done.total, done.max_total, done.completed_percent
    );
    if !company.honors.is_empty() {
        println!("\nHonors");
        for honor in &company.honors {
            println!("  [{:?}] {} - {}", honor.level, honor.category.label(), honor.name);
        }
    }
    Ok(())
}

fn print_records(records: &[CompanyRecord], format: Format) -> Result<()> {
    if format == Format::Json {
        return print_json(&records);
    }

    for (i, record) in records.iter().enumerate() {
        println!("\n{}. {}", i + 1, summarize_company(record));
        if !record.city.is_empty() {
            println!("   City: {}", record.city);
        }
        if !record.highlights.is_empty() {
            println!("   Highlights: {}", record.highlights.join(" / "));
        }
        for (category, products) in record.main_products.iter() {
            println!("   {}: {}", category, products.join("、"));
        }
        for (category, products) in &record.vip_products {
            println!("   VIP {}: {} item(s)", category.label(), products.len());
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
