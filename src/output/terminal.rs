// Colored terminal output for query results and corpus listings.
//
// main.rs delegates all printing here.

use colored::Colorize;

use crate::corpus::Corpus;
use crate::pipeline::query::QueryResult;

/// Longest document text shown per line in corpus listings. Query results
/// always print the full text.
const MAX_TEXT_CHARS: usize = 140;

/// Print the query, then each neighbour's text, best first.
pub fn display_query_result(result: &QueryResult) {
    println!("{} {}", "Query:".bold(), result.query);
    match &result.tag {
        Some(tag) => println!("  matched {}", tag.dimmed()),
        None => println!("  {}", "not in corpus, vector inferred".dimmed()),
    }
    println!();

    if result.matches.is_empty() {
        println!("No similar documents.");
        return;
    }

    println!(
        "{}",
        format!("=== Most similar ({}) ===", result.matches.len()).bold()
    );
    for (i, doc) in result.matches.iter().enumerate() {
        println!(
            "  {:>2}. {:<14} {}  {}",
            i + 1,
            doc.tag,
            colorize_score(doc.score),
            doc.text,
        );
    }
}

/// Print one document's text.
pub fn display_document(tag: &str, text: &str) {
    println!("{} {}", tag.bold(), text);
}

/// Print every tag in corpus order with its text.
pub fn display_corpus(corpus: &Corpus) {
    if corpus.is_empty() {
        println!("Corpus is empty.");
        return;
    }

    println!(
        "{}",
        format!("=== Corpus ({} documents) ===", corpus.len()).bold()
    );
    for doc in corpus.documents() {
        let text = doc.text();
        let shown = if text.is_empty() {
            "(no words after filtering)".dimmed().to_string()
        } else {
            super::truncate_chars(&text, MAX_TEXT_CHARS)
        };
        println!("  {:<14} {}", doc.tag, shown);
    }
}

fn colorize_score(score: f32) -> colored::ColoredString {
    let s = format!("{score:>6.3}");
    if score >= 0.5 {
        s.bright_green()
    } else if score >= 0.2 {
        s.yellow()
    } else {
        s.dimmed()
    }
}
