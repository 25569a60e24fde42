//! Quick demonstration of corpus loading, search, and highlighting
//!
//! This demo loads the bundled sample corpora, runs a few searches, and
//! prints the results the way the interactive shell would.

use norma_search::{
    clipboard, corpus,
    render::{self, ArticleStatus, RenderOptions},
    SessionState,
};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("📚 Norma Search - Quick Search Demo");
    println!("===================================");

    // Load the bundled sample corpora
    let paths: Vec<PathBuf> = vec![
        "data/lead.json".into(),
        "data/rpsad.json".into(),
        "data/rreepp.json".into(),
    ];
    let sources = corpus::load_sources(&paths)?;

    println!("\n📦 Loaded {} sources:", sources.len());
    for source in &sources {
        println!("  {} ({} artículos)", source.name, source.article_count());
    }

    // Select everything
    let mut session = SessionState::new(sources);
    for name in ["LEAD", "RPSAD", "RREEPP"] {
        session.toggle_source(name);
    }

    let options = RenderOptions {
        color: false,
        max_width: None,
    };

    // Accent-insensitive searches across all three sources
    for query in ["educacion", "régimen", "dependencia"] {
        session.set_query(query);
        let view = session.view();
        println!(
            "\n🔍 Query \"{}\": {}",
            query,
            render::render_result_count(view.articles.len())
        );
        for article in &view.articles {
            println!(
                "{}",
                render::render_article(article, &ArticleStatus::default(), query, &options)
            );
        }
    }

    // Show the clipboard rendering of the first article
    session.set_query("");
    let view = session.view();
    if let Some(first) = view.articles.first() {
        println!("\n📋 Clipboard format for {}:", first.id);
        println!("{}", clipboard::format_article(first));
    }

    println!("\n🎉 Demo completed successfully!");
    Ok(())
}
