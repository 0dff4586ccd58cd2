//! CLI output formatting utilities

use crate::models::LegalDocument;
use crate::rag::AnswerOutcome;
use crate::rag::LegalAnswer;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Thai text is multi-byte UTF-8, so byte slicing would panic mid-character.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// One-line summary of a retrieved document
#[must_use]
pub fn format_document(idx: usize, doc: &LegalDocument) -> String {
    let score = doc
        .similarity
        .map_or_else(|| "n/a".to_string(), |s| format!("{:.2}%", s * 100.0));
    format!(
        "{}. {} section {} ({}) - Similarity: {}\n   {}",
        idx + 1,
        doc.law_type,
        doc.section,
        doc.title,
        score,
        truncate_str(&doc.content, 120)
    )
}

/// Print retrieved documents
pub fn print_documents(documents: &[LegalDocument]) {
    if documents.is_empty() {
        println!("No matching documents found.");
        return;
    }
    println!("Found {} document(s):\n", documents.len());
    for (idx, doc) in documents.iter().enumerate() {
        println!("{}\n", format_document(idx, doc));
    }
}

/// Print a grounded answer and its sources
pub fn print_answer(answer: &LegalAnswer) {
    println!("{}\n", answer.answer);
    if answer.outcome == AnswerOutcome::Answered {
        println!("Sources:");
        for (idx, doc) in answer.sources.iter().enumerate() {
            println!("{}", format_document(idx, doc));
        }
    }
}

/// Print configuration info with secrets masked
pub fn print_config(config: &AppConfig) {
    println!("📋 lexsearch Configuration");
    println!("==========================\n");
    match toml::to_string_pretty(&config.redacted()) {
        Ok(text) => println!("{text}"),
        Err(e) => println!("Failed to render configuration: {e}"),
    }
}
