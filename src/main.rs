//! # Corpus Browser Main Driver
//!
//! ## Purpose
//! Main entry point for the corpus browser. Loads configuration and corpus
//! files, then runs either a one-shot query, a corpus validation pass, or the
//! interactive shell.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, command line arguments, environment variables
//! - **Output**: Rendered article lists on stdout, logs on stderr
//! - **Modes**: Interactive shell (default), `--query`, `--validate`
//!
//! ## Key Features
//! - Line-oriented interactive shell with explicit render passes
//! - One-shot query mode for scripted use
//! - Structured logging kept off the interactive output stream
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Load and validate corpus files
//! 4. Seed the session selection from config and flags
//! 5. Run the requested mode

use clap::{Arg, ArgAction, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use norma_search::{
    clipboard,
    config::Config,
    corpus::{self, Source},
    errors::{NormaError, Result},
    render::{self, ArticleStatus, RenderOptions},
    ArticleId, SessionState,
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("norma-browser")
        .version("0.1.0")
        .author("Norma Search Team")
        .about("Interactive browser and search over structured legal-text corpora")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("norma-search.toml"),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("FILE")
                .help("Corpus file to load; repeatable, replaces configured paths")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("select")
                .long("select")
                .value_name("ACRONYM")
                .help("Select a source at startup; repeatable")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Run one search over the selected sources and exit"),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .help("Load and validate the corpus files, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable ANSI colors in output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    if let Some(paths) = matches.get_many::<String>("source") {
        config.corpus.paths = paths.map(PathBuf::from).collect();
    }
    if matches.get_flag("no-color") {
        config.ui.color = false;
    }

    // Initialize logging
    init_logging(&config)?;

    info!("Starting norma-browser v0.1.0");
    info!("Configuration loaded from: {}", config_path);

    // Load and validate the corpus
    let sources = corpus::load_sources(&config.corpus.paths)?;

    if matches.get_flag("validate") {
        return run_validation(&sources);
    }

    let mut session = SessionState::with_feedback_window(sources, config.copy_feedback_window());
    for name in &config.corpus.preselect {
        select_source(&mut session, name);
    }
    if let Some(names) = matches.get_many::<String>("select") {
        for name in names {
            select_source(&mut session, name);
        }
    }

    if let Some(query) = matches.get_one::<String>("query") {
        return run_query(&mut session, query, &config);
    }

    run_shell(&mut session, &config)
}

/// Initialize logging and tracing. Logs go to stderr so the interactive
/// output stream stays clean.
fn init_logging(config: &Config) -> Result<()> {
    let log_level: tracing::Level =
        config
            .logging
            .level
            .parse()
            .map_err(|_| NormaError::Config {
                message: format!("Invalid log level: {}", config.logging.level),
            })?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_string()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(fmt_layer.json().with_filter(filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt_layer.with_filter(filter))
            .init();
    }

    info!("Logging initialized with level: {}", config.logging.level);
    Ok(())
}

/// Report the loaded corpus files. Loading already validated them.
fn run_validation(sources: &[Source]) -> anyhow::Result<()> {
    for source in sources {
        println!("✓ {} ({} artículos)", source.name, source.article_count());
    }
    println!("Todos los ficheros de corpus son válidos.");
    Ok(())
}

/// One-shot mode: run a single query and print every hit expanded. With no
/// explicit selection, every loaded source is searched.
fn run_query(session: &mut SessionState, query: &str, config: &Config) -> anyhow::Result<()> {
    if session
        .source_names()
        .all(|name| !session.is_source_selected(name))
    {
        let names: Vec<String> = session.source_names().map(str::to_string).collect();
        for name in &names {
            session.toggle_source(name);
        }
        info!("No sources selected, searching all {}", names.len());
    }
    session.set_query(query);

    let options = RenderOptions {
        color: config.ui.color,
        max_width: None,
    };
    let view = session.view();
    println!("{}", render::render_result_count(view.articles.len()));
    if view.articles.is_empty() {
        println!("{}", render::NO_RESULTS);
        return Ok(());
    }
    for article in &view.articles {
        let status = ArticleStatus {
            expanded: true,
            ..Default::default()
        };
        println!();
        println!("{}", render::render_article(article, &status, query, &options));
    }
    Ok(())
}

/// The interactive shell: read a command, mutate the session, render.
fn run_shell(session: &mut SessionState, config: &Config) -> anyhow::Result<()> {
    let options = render_options(config);
    println!("norma-browser: escriba 'help' para ver los comandos");
    render_view(session, &options);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };
        match command {
            "quit" | "exit" => break,
            "help" | "?" => print_help(),
            "sources" => list_sources(session),
            "source" | "src" => {
                toggle_source_command(session, rest);
                render_view(session, &options);
            }
            "num" => {
                toggle_number_command(session, rest);
                render_view(session, &options);
            }
            "find" => {
                session.set_query(rest);
                render_view(session, &options);
            }
            "clear" => {
                session.set_query("");
                render_view(session, &options);
            }
            "pin" => {
                toggle_pin_command(session, rest);
                render_view(session, &options);
            }
            "pinned" => {
                session.toggle_pinned_only();
                render_view(session, &options);
            }
            "open" => {
                toggle_open_command(session, rest);
                render_view(session, &options);
            }
            "copy" => {
                copy_command(session, rest);
                render_view(session, &options);
            }
            "list" | "ls" => render_view(session, &options),
            _ => println!("Comando desconocido: '{command}'. Escriba 'help'."),
        }
    }
    Ok(())
}

/// Render settings for the interactive shell, sized to the terminal.
fn render_options(config: &Config) -> RenderOptions {
    let max_width = crossterm::terminal::size()
        .ok()
        .map(|(columns, _)| columns as usize);
    RenderOptions {
        color: config.ui.color,
        max_width,
    }
}

/// One full render pass over the current session state.
fn render_view(session: &mut SessionState, options: &RenderOptions) {
    let copied = session.copy_feedback(Instant::now()).cloned();
    let sources: Vec<(&str, bool)> = session
        .source_names()
        .map(|name| (name, session.is_source_selected(name)))
        .collect();
    let view = session.view();

    println!();
    println!("{}", render::render_option_row("Fuentes:", &sources));
    if !view.number_options.is_empty() {
        let numbers: Vec<(&str, bool)> = view
            .number_options
            .iter()
            .map(|number| (*number, session.is_number_selected(number)))
            .collect();
        println!("{}", render::render_option_row("Números:", &numbers));
    }

    let mut status_parts = Vec::new();
    if !session.query().is_empty() {
        status_parts.push(format!("Búsqueda: \"{}\"", session.query()));
    }
    if session.pinned_only() {
        status_parts.push(format!("Solo fijados ({})", session.pinned_count()));
    }
    if !status_parts.is_empty() {
        println!("{}", status_parts.join(" | "));
    }

    if !session.query().is_empty() {
        println!("{}", render::render_result_count(view.articles.len()));
    }

    if view.articles.is_empty() {
        if !session.query().is_empty() {
            println!("{}", render::NO_RESULTS);
        } else if view.total_merged == 0 {
            println!("No hay fuentes seleccionadas. Use 'source <ACRONYM>'.");
        }
        return;
    }

    for article in &view.articles {
        let status = ArticleStatus {
            expanded: session.is_expanded(&article.id),
            pinned: session.is_pinned(&article.id),
            copied: copied.as_ref() == Some(&article.id),
        };
        println!();
        println!(
            "{}",
            render::render_article(article, &status, session.query(), options)
        );
    }
}

fn list_sources(session: &SessionState) {
    for source in session.sources() {
        let marker = if session.is_source_selected(&source.name) {
            "[x]"
        } else {
            "[ ]"
        };
        println!(
            "{} {} ({} artículos)",
            marker,
            source.name,
            source.article_count()
        );
    }
}

/// Select a source if it exists and is not selected yet. Used for startup
/// seeding, where repeated names must not toggle the selection off.
fn select_source(session: &mut SessionState, name: &str) {
    if !session.source_names().any(|known| known == name) {
        warn!("Unknown source '{}', ignoring", name);
        return;
    }
    if !session.is_source_selected(name) {
        session.toggle_source(name);
    }
}

fn toggle_source_command(session: &mut SessionState, name: &str) {
    if name.is_empty() {
        println!("Uso: source <ACRONYM>");
        return;
    }
    if !session.source_names().any(|known| known == name) {
        println!("Fuente desconocida: '{name}'");
        return;
    }
    let selected = session.toggle_source(name);
    info!(source = name, selected, "Toggled source");
}

fn toggle_number_command(session: &mut SessionState, number: &str) {
    if number.is_empty() {
        println!("Uso: num <NÚMERO>");
        return;
    }
    let selected = session.toggle_number(number);
    if selected
        && !session
            .view()
            .number_options
            .iter()
            .any(|option| *option == number)
    {
        println!("Aviso: el número '{number}' no aparece en las fuentes seleccionadas.");
    }
}

fn toggle_pin_command(session: &mut SessionState, raw_id: &str) {
    if raw_id.is_empty() {
        println!("Uso: pin <ID>");
        return;
    }
    let id = ArticleId::from(raw_id);
    if !article_exists(session, &id) {
        println!("No hay ningún artículo con id '{raw_id}'.");
        return;
    }
    let pinned = session.toggle_pin(id);
    info!(id = raw_id, pinned, "Toggled pin");
}

fn toggle_open_command(session: &mut SessionState, raw_id: &str) {
    if raw_id.is_empty() {
        println!("Uso: open <ID>");
        return;
    }
    let id = ArticleId::from(raw_id);
    if !article_exists(session, &id) {
        println!("No hay ningún artículo con id '{raw_id}'.");
        return;
    }
    session.toggle_expanded(id);
}

/// Copy one article to the clipboard. Feedback is armed only when the
/// clipboard write succeeded.
fn copy_command(session: &mut SessionState, raw_id: &str) {
    if raw_id.is_empty() {
        println!("Uso: copy <ID>");
        return;
    }
    let id = ArticleId::from(raw_id);
    let formatted = session
        .merged()
        .iter()
        .find(|article| article.id == id)
        .map(clipboard::format_article);
    let Some(formatted) = formatted else {
        println!("No hay ningún artículo con id '{raw_id}'.");
        return;
    };
    match clipboard::copy_to_clipboard(&formatted) {
        Ok(()) => {
            session.mark_copied(id, Instant::now());
            info!(id = raw_id, "Copied article to clipboard");
        }
        Err(err) => warn!("No se pudo copiar al portapapeles: {}", err),
    }
}

fn article_exists(session: &SessionState, id: &ArticleId) -> bool {
    session.merged().iter().any(|article| &article.id == id)
}

fn print_help() {
    println!("Comandos:");
    println!("  source <ACRONYM>   alterna la selección de una fuente");
    println!("  sources            lista las fuentes cargadas");
    println!("  num <N>            alterna el filtro por número de artículo");
    println!("  find <texto>       busca en las fuentes seleccionadas");
    println!("  clear              borra la búsqueda");
    println!("  pin <ID>           fija o desfija un artículo (p. ej. LEAD-5)");
    println!("  pinned             alterna la vista de solo fijados");
    println!("  open <ID>          expande o pliega un artículo");
    println!("  copy <ID>          copia el artículo al portapapeles");
    println!("  list               vuelve a mostrar la vista");
    println!("  help               muestra esta ayuda");
    println!("  quit               sale");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_log_layer_builds() {
        let filter = tracing_subscriber::EnvFilter::new("info");
        let _subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_filter(filter),
        );
    }
}
