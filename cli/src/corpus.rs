use anyhow::{Context, Result};
use search_core::{DocId, DocumentStatus, Rating, SearchServer};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<Rating>,
}

/// Add every document of a JSON-lines file, returning how many were accepted.
pub fn load_jsonl(path: &Path, server: &mut SearchServer) -> Result<usize> {
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    load_lines(BufReader::new(f), server)
}

/// Documents the engine rejects are logged and skipped; malformed JSON aborts.
pub fn load_lines<R: BufRead>(reader: R, server: &mut SearchServer) -> Result<usize> {
    let mut added = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("corpus line {}", lineno + 1))?;
        match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            Ok(()) => added += 1,
            Err(err) => tracing::warn!(line = lineno + 1, id = doc.id, %err, "skipping document"),
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_documents_and_skips_rejected_ones() {
        let input = r#"{"id": 0, "text": "white cat and fashionable collar", "ratings": [7, 2, 7]}

{"id": 1, "text": "fluffy cat fluffy tail", "status": "actual", "ratings": [1, 2]}
{"id": 1, "text": "duplicate"}
{"id": -4, "text": "negative"}
{"id": 3, "text": "white fashionable cat", "status": "irrelevant"}
"#;
        let mut server = SearchServer::new("and").unwrap();
        let added = load_lines(input.as_bytes(), &mut server).unwrap();
        assert_eq!(added, 3);
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![0, 1, 3]);
        let (_, status) = server.match_document("cat", 3).unwrap();
        assert_eq!(status, DocumentStatus::Irrelevant);
        assert_eq!(server.find_top_documents("collar").unwrap()[0].rating, 5);
    }

    #[test]
    fn malformed_json_reports_line() {
        let mut server = SearchServer::new("").unwrap();
        let input = "{\"id\": 0, \"text\": \"cat\"}\nnot json\n";
        let err = load_lines(input.as_bytes(), &mut server).unwrap_err();
        assert!(err.to_string().contains("corpus line 2"));
    }
}
