use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use glean::index::IndexStats;
use glean::resources;
use glean::{EngineConfig, FsSource, PageItem, Result, SearchEngine, SearchError};

mod cli;
use cli::display::{self, BOX_WIDTH};
use cli::{Cli, Commands, EngineArgs, ResourceArgs};

/// Environment variable holding the log filter, e.g. `GLEAN_LOG=glean=debug`.
const LOG_ENV: &str = "GLEAN_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Suggest {
            resources,
            engine,
            query,
            limit,
        } => run_suggest(&resources, &engine, &query, limit),
        Commands::Search {
            resources,
            engine,
            query,
            limit,
            page,
        } => run_search(&resources, &engine, &query, limit, page),
        Commands::Inspect { index, json } => run_inspect(&index, json),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {} [{}]", e, e.code());
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file first, then flag overrides, then payload paths.
fn build_config(resources: &ResourceArgs, args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| SearchError::resource_load(path, e))?;
            EngineConfig::from_json(&json).map_err(|e| SearchError::resource_load(path, e))?
        }
        None => EngineConfig::default(),
    };

    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(confidence) = args.confidence {
        config.confidence = confidence;
    }
    if let Some(mark) = &args.mark {
        config.mark = mark.clone();
    }
    if let Some(base) = &args.base {
        config.base = base.clone();
    }

    config.resources.index = resources.index.clone();
    config.resources.registry = resources.registry.clone();
    config.resources.language = resources.language.clone();
    Ok(config)
}

fn open_engine(
    resources: &ResourceArgs,
    args: &EngineArgs,
) -> Result<(SearchEngine, EngineConfig)> {
    let config = build_config(resources, args)?;
    let mut engine = SearchEngine::new();
    engine.initialize(config.clone(), FsSource::new("."));
    Ok((engine, config))
}

fn run_suggest(
    resources: &ResourceArgs,
    args: &EngineArgs,
    query: &str,
    limit: usize,
) -> Result<()> {
    let (mut engine, config) = open_engine(resources, args)?;
    let items = engine.suggest(query, limit)?;

    if args.json {
        print_json(&items);
    } else {
        print_items(&format!("SUGGEST \"{}\"", query), &items, &config.mark, 1);
        display::row(&format!(
            " {} {}",
            display::count(items.len()),
            display::label("suggestions")
        ));
        display::section_bot();
    }
    Ok(())
}

fn run_search(
    resources: &ResourceArgs,
    args: &EngineArgs,
    query: &str,
    limit: usize,
    page: usize,
) -> Result<()> {
    let (mut engine, config) = open_engine(resources, args)?;
    let result = engine.search_page(query, limit, page)?;

    if args.json {
        print_json(&result);
    } else {
        let page = page.max(1);
        let first = (page - 1).saturating_mul(limit) + 1;
        let heading = format!("SEARCH \"{}\" page {}", query, page);
        print_items(&heading, &result.items, &config.mark, first);
        display::row(&format!(
            " {} {} {}",
            display::count(result.items.len()),
            display::label("shown of"),
            display::count(result.total)
        ));
        display::section_bot();
    }
    Ok(())
}

fn run_inspect(path: &str, json: bool) -> Result<()> {
    let index = resources::load_index(&FsSource::new("."), path, None)?;
    let stats = index.stats();

    if json {
        print_json(&stats);
    } else {
        print_stats(path, &stats);
    }
    Ok(())
}

fn print_items(heading: &str, items: &[PageItem], mark: &str, first: usize) {
    display::section_top(heading);
    if items.is_empty() {
        display::row(&format!(" {}", display::label("no matches")));
    }
    for (n, item) in items.iter().enumerate() {
        let title = display::render_highlights(&item.title, mark);
        display::row(&format!("{} {}", display::ordinal(first + n), title));
        display::row(&format!("    {}", display::link(&item.link)));

        let description = display::single_line(&item.description);
        for line in display::wrap(&display::render_highlights(&description, mark), BOX_WIDTH - 6) {
            display::row(&format!("    {}", line));
        }
        display::row("");
    }
}

fn stat_row(name: &str, value: usize) {
    display::row(&format!(
        " {} {}",
        display::pad_right(&display::label(name), 14),
        display::count(value)
    ));
}

fn print_stats(path: &str, stats: &IndexStats) {
    display::section_top(&format!("INDEX {}", path));
    stat_row("documents", stats.documents);
    stat_row("vocabulary", stats.vocabulary);
    stat_row("postings", stats.postings);
    stat_row("occurrences", stats.occurrences);
    display::section_bot();

    display::section_top("FIELDS");
    for field in &stats.fields {
        display::row(&format!(
            " {} boost {}",
            display::pad_right(&field.name, 14),
            field.boost
        ));
    }
    display::section_bot();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("❌ cannot serialize output: {}", e),
    }
}
