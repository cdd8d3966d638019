//! Line protocol: stop words, document count, that many documents, a query.

use anyhow::{anyhow, Context, Result};
use search_core::{
    DocumentStatus, ScoredDocument, SearchConfig, SearchResult, SearchServer, StopWords,
};
use std::io::{BufRead, Write};

pub fn run<R: BufRead, W: Write>(input: R, out: &mut W, config: SearchConfig) -> Result<()> {
    let mut lines = input.lines();
    let mut next_line = |what: &str| -> Result<String> {
        lines
            .next()
            .ok_or_else(|| anyhow!("missing {what} line"))?
            .with_context(|| format!("reading {what} line"))
    };

    let stop_words = next_line("stop words")?;
    let count_line = next_line("document count")?;
    let count: usize = count_line
        .trim()
        .parse()
        .with_context(|| format!("invalid document count {count_line:?}"))?;
    let mut documents = Vec::new();
    for _ in 0..count {
        documents.push(next_line("document")?);
    }
    let query = next_line("query")?;

    // Core failures are reported on the output and end the run.
    match rank(&stop_words, &documents, &query, config) {
        Ok(docs) => {
            for doc in &docs {
                writeln!(out, "{doc}")?;
            }
        }
        Err(err) => {
            tracing::debug!(%err, "run stopped");
            writeln!(out, "{err}")?;
        }
    }
    Ok(())
}

fn rank(
    stop_words: &str,
    documents: &[String],
    query: &str,
    config: SearchConfig,
) -> SearchResult<Vec<ScoredDocument>> {
    let mut server = SearchServer::with_config(StopWords::from_text(stop_words)?, config);
    for (id, text) in (0..).zip(documents) {
        server.add_document(id, text, DocumentStatus::Actual, &[])?;
    }
    server.find_top_documents(query)
}
