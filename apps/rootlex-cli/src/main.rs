//! rootlex command-line interface.
//!
//! `init` creates the schema, `import` loads the canonical chapter/verse/
//! translation data, `ingest` runs the morphology pipeline, `stats` and
//! `search` read the result back.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use rootlex_core::config::{expand_path, Config};
use rootlex_morph::MorphPipeline;
use rootlex_store::import;
use rootlex_store::query::RootSort;
use rootlex_store::SqliteStore;

#[derive(Parser)]
#[command(name = "rootlex")]
#[command(about = "Morphology ingestion and root cross-reference catalogue")]
struct Cli {
    /// Database path; falls back to `data.db_path` in config.toml,
    /// then to ./rootlex.db
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database schema (idempotent).
    Init,
    /// Import chapters, verses, translators and translations from a data
    /// directory.
    Import {
        /// Directory holding chapters.json and translations/
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Run the morphology ingestion pipeline over a tagged corpus file.
    Ingest {
        /// Morphology corpus (one tagged segment per line)
        #[arg(long)]
        morphology: Option<PathBuf>,
        /// Turkish root-meaning dictionaries, later files override earlier
        #[arg(long = "meanings-tr")]
        meanings_tr: Vec<PathBuf>,
        /// English root-meaning dictionaries, later files override earlier
        #[arg(long = "meanings-en")]
        meanings_en: Vec<PathBuf>,
        /// Word-gloss dictionary keyed by lemma or surface text
        #[arg(long)]
        glosses: Option<PathBuf>,
    },
    /// Print row counts per table.
    Stats,
    /// Substring search over translation text, or over the root
    /// catalogue with --roots.
    Search {
        query: String,
        #[arg(long)]
        translator: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// Search root strings and glosses instead of translations.
        #[arg(long)]
        roots: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let db_path = cli
        .db
        .or_else(|| config.get::<String>("data.db_path").ok().map(expand_path))
        .unwrap_or_else(|| PathBuf::from("rootlex.db"));

    match cli.command {
        Command::Init => {
            let store = SqliteStore::open(&db_path)?;
            store.init_schema()?;
            println!("Schema ready at {}", db_path.display());
        }
        Command::Import { data } => {
            let data_dir = data
                .or_else(|| config.get::<String>("data.data_dir").ok().map(expand_path))
                .context("no data directory: pass --data or set data.data_dir")?;
            let mut store = SqliteStore::open(&db_path)?;
            store.init_schema()?;
            let report = store.transaction(|s| import::import_data_dir(s, &data_dir))?;
            println!(
                "Imported {} chapters, {} verses, {} translators, {} translation rows ({} dropped)",
                report.chapters,
                report.verses,
                report.translators,
                report.translations,
                report.translation_rows_dropped
            );
        }
        Command::Ingest { morphology, meanings_tr, meanings_en, glosses } => {
            let morphology = morphology
                .or_else(|| config.get::<String>("data.morphology_file").ok().map(expand_path))
                .context("no corpus: pass --morphology or set data.morphology_file")?;
            let corpus = fs::read_to_string(&morphology)
                .with_context(|| format!("reading {}", morphology.display()))?;

            let mut pipeline = MorphPipeline::new();
            for path in &meanings_tr {
                pipeline = pipeline.with_meanings_tr(import::load_dictionary(path)?);
            }
            for path in &meanings_en {
                pipeline = pipeline.with_meanings_en(import::load_dictionary(path)?);
            }
            if let Some(path) = &glosses {
                pipeline = pipeline.with_glosses(import::load_dictionary(path)?);
            }

            let mut store = SqliteStore::open(&db_path)?;
            store.init_schema()?;

            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
            pb.set_message(format!("ingesting {}", morphology.display()));

            let report = store.transaction(|s| {
                let verses = s.verse_lookup()?;
                pipeline.run(&corpus, &verses, s)
            })?;
            pb.finish_and_clear();

            println!("Lines read:        {}", report.lines_read);
            println!("Segments parsed:   {}", report.segments_parsed);
            println!("Malformed lines:   {}", report.lines_malformed);
            println!("Unknown-tag lines: {}", report.lines_unknown_tag);
            println!("Words assembled:   {}", report.words_assembled);
            println!("Roots registered:  {}", report.roots_registered);
            println!("Words linked:      {}", report.words_linked);
            println!("Orphans dropped:   {}", report.orphans_dropped);
        }
        Command::Stats => {
            let store = SqliteStore::open(&db_path)?;
            let counts = store.counts()?;
            println!("chapters:     {}", counts.chapters);
            println!("verses:       {}", counts.verses);
            println!("translators:  {}", counts.translators);
            println!("translations: {}", counts.translations);
            println!("roots:        {}", counts.roots);
            println!("words:        {}", counts.words);

            // Top roots as a quick sanity view.
            for root in store.list_roots(RootSort::Count, 10, 0)? {
                println!("  {:<12} {:>6}", root.root, root.occurrence_count);
            }
        }
        Command::Search { query, translator, language, limit, roots } => {
            let store = SqliteStore::open(&db_path)?;
            if roots {
                for root in store.search_roots(&query, limit)? {
                    println!(
                        "{:<12} {:>6}  {}",
                        root.root,
                        root.occurrence_count,
                        root.meaning_en.or(root.meaning_tr).unwrap_or_default()
                    );
                }
                return Ok(());
            }
            let hits = store.search_translations(
                &query,
                translator.as_deref(),
                language.as_deref(),
                limit,
                0,
            )?;
            println!("{} hits for '{}'", hits.len(), query);
            for hit in hits {
                println!(
                    "{}:{} [{}] {}",
                    hit.chapter_id, hit.verse_number, hit.translator_code, hit.text
                );
            }
        }
    }

    Ok(())
}
