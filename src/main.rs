mod analysis;
mod config;
mod error;
mod output;
mod query;
mod term;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use config::ParserConfig;
use query::QueryParser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quern")]
#[command(about = "Analyzing query parser for full-text search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Query to parse (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Path to a JSON parser configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default field for unscoped clauses
    #[arg(short, long)]
    field: Option<String>,

    /// Default analyzer (standard, simple, whitespace, keyword)
    #[arg(short, long)]
    analyzer: Option<String>,

    /// Allow terms that begin with * or ?
    #[arg(long)]
    leading_wildcard: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis pipeline over a text and print the tokens
    Analyze {
        /// Text to analyze
        text: String,

        /// Field whose analyzer should be used
        #[arg(short, long)]
        field: Option<String>,
    },
    /// Show how a term splits into literal, wildcard, and escaped spans
    Spans {
        /// Raw term
        term: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };
    if let Some(field) = cli.field {
        config.default_field = field;
    }
    if let Some(analyzer) = cli.analyzer {
        config.analyzer = analyzer;
    }
    if cli.leading_wildcard {
        config.allow_leading_wildcard = true;
    }
    let color = !cli.no_color;

    match cli.command {
        Some(Commands::Analyze { text, field }) => {
            let analyzer = config.build_analyzer()?;
            let field = field.unwrap_or_else(|| config.default_field.clone());
            let tokens = analysis::collect_tokens(analyzer.as_ref(), &field, &text)?;
            output::print_tokens(&tokens, color)?;
        }
        Some(Commands::Spans { term }) => {
            let spans = term::segment::segment(&term);
            output::print_spans(&spans, color)?;
        }
        None => {
            if cli.query.is_empty() {
                Cli::command().print_help()?;
                return Ok(());
            }
            let query_str = cli.query.join(" ");
            let analyzer = config.build_analyzer()?;
            let parser = QueryParser::new(config, analyzer);
            let parsed = parser.parse(&query_str)?;
            output::print_query(&parsed, color)?;
        }
    }

    Ok(())
}
