use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::{
    DocId, DocumentStatus, SearchConfig, SearchServer, StopWords, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_EPSILON,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod corpus;
mod shell;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Rank documents against a query with TF-IDF", long_about = None)]
struct Cli {
    /// Maximum number of ranked results to print
    #[arg(long, global = true, default_value_t = MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Relevances closer than this are ordered by rating
    #[arg(long, global = true, default_value_t = RELEVANCE_EPSILON)]
    epsilon: f64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read stop words, a document count, documents and a query from stdin
    Stdin,
    /// Rank documents from a JSON-lines corpus
    Query {
        /// Corpus file, one {"id", "text", "status", "ratings"} object per line
        #[arg(long)]
        corpus: PathBuf,
        /// Query text; prefix a word with '-' to exclude documents containing it
        #[arg(long)]
        query: String,
        /// Space separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Only rank documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Print results as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which query words a document matches
    Match {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value = "")]
        stop_words: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let config = SearchConfig::default()
        .with_max_result_count(cli.max_results)
        .with_relevance_epsilon(cli.epsilon);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Stdin => {
            let stdin = io::stdin();
            shell::run(stdin.lock(), &mut out, config)
        }
        Commands::Query { corpus, query, stop_words, status, json } => {
            let server = load_server(&corpus, &stop_words, config)?;
            let docs = server.find_top_documents_by_status(&query, status)?;
            if json {
                serde_json::to_writer_pretty(&mut out, &docs)?;
                writeln!(out)?;
            } else {
                for doc in &docs {
                    writeln!(out, "{doc}")?;
                }
            }
            Ok(())
        }
        Commands::Match { corpus, query, id, stop_words } => {
            let server = load_server(&corpus, &stop_words, config)?;
            let (words, status) = server.match_document(&query, id)?;
            let words = words.join(", ");
            writeln!(out, "{{ document_id = {id}, status = {status}, words = [{words}] }}")?;
            Ok(())
        }
    }
}

fn load_server(path: &Path, stop_words: &str, config: SearchConfig) -> Result<SearchServer> {
    let stop_words = StopWords::from_text(stop_words).context("parsing stop words")?;
    let mut server = SearchServer::with_config(stop_words, config);
    let added = corpus::load_jsonl(path, &mut server)?;
    tracing::info!(path = %path.display(), added, total = server.document_count(), "corpus loaded");
    Ok(server)
}
