use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use jsonextractor::config::Config;
use jsonextractor::document::parser::{parse_json, validate_json};
use jsonextractor::document::serializer::{to_compact_string, to_pretty_string};
use jsonextractor::document::tree::JsonTree;
use jsonextractor::export::{self, parse_delimiter, ExportFormat, ExportOptions};
use jsonextractor::file::loader::{
    load_json_file, load_json_from_stdin, read_file_text, read_stdin_text, LoadOptions,
};
use jsonextractor::file::saver::write_output;
use jsonextractor::jsonpath::{QueryResult, QueryService, SearchValue};

/// JSON Extractor - parse, query, format and export JSON from the command line
#[derive(Parser)]
#[command(name = "jsonextractor")]
#[command(version)]
#[command(about = "Parse, query, format and export JSON documents", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/jsonextractor/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write output to this file instead of stdout (.gz is compressed)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where the document comes from. Without `--file` or `--json`, stdin is read.
#[derive(Args)]
struct InputArgs {
    /// JSON file to read (.gz is decompressed)
    #[arg(short, long, conflicts_with = "json")]
    file: Option<PathBuf>,

    /// JSON text given inline
    #[arg(long)]
    json: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a document and pretty-print it
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Pretty-print or minify a document
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Spaces per indentation level (default from config)
        #[arg(long, conflicts_with = "compact")]
        indent: Option<usize>,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Check that a document is valid JSON
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Run one or more JSONPath queries
    Query {
        /// JSONPath expressions, e.g. '$.store.book[?(@.price < 10)]'
        #[arg(required = true)]
        queries: Vec<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Find the values of every property with the given name
    FindKey {
        key: String,

        #[arg(short, long)]
        ignore_case: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Find every scalar equal to the given value
    FindValue {
        /// Value to look for; true/false and numbers are matched by type
        value: String,

        #[arg(short, long)]
        ignore_case: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the elements of the array at a path
    Array {
        path: String,

        #[arg(long)]
        skip: Option<usize>,

        #[arg(long)]
        take: Option<usize>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Export the document, or the results of a query, as csv, xml or json
    Export {
        /// Output format (default from config)
        format: Option<String>,

        /// Export the results of this query instead of the whole document
        #[arg(short, long)]
        query: Option<String>,

        /// CSV field delimiter
        #[arg(long)]
        delimiter: Option<String>,

        /// XML root element name
        #[arg(long)]
        root: Option<String>,

        /// XML element name for each result
        #[arg(long)]
        item: Option<String>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    init_logging(&config.logging.level, cli.verbose);

    let options = config.load_options();
    let output = cli.output.as_deref();

    match cli.command {
        Command::Parse { input } => {
            let tree = load_tree(&input, &options)?;
            log::info!(
                "Parsed {} elements (max depth {})",
                tree.node_count(),
                tree.max_depth()
            );
            emit(output, &to_pretty_string(tree.root(), config.json.indent_size)?)
        }
        Command::Format {
            input,
            indent,
            compact,
        } => {
            let tree = load_tree(&input, &options)?;
            let text = if compact {
                to_compact_string(tree.root())
            } else {
                to_pretty_string(tree.root(), indent.unwrap_or(config.json.indent_size))?
            };
            emit(output, &text)
        }
        Command::Validate { input } => {
            let text = read_text(&input, &options)?;
            validate_json(&text, &options.parse).context("JSON is invalid")?;
            emit(output, "JSON is valid")
        }
        Command::Query { queries, input } => {
            let tree = load_tree(&input, &options)?;
            let service = QueryService::new(tree.root());
            let result = match queries.as_slice() {
                [single] => service.execute_json_path(single),
                many => service.execute_multiple_queries(many),
            };
            print_result(&result, output, config.json.indent_size)
        }
        Command::FindKey {
            key,
            ignore_case,
            input,
        } => {
            let tree = load_tree(&input, &options)?;
            let result = QueryService::new(tree.root()).find_by_key(&key, !ignore_case);
            print_result(&result, output, config.json.indent_size)
        }
        Command::FindValue {
            value,
            ignore_case,
            input,
        } => {
            let tree = load_tree(&input, &options)?;
            let target = SearchValue::infer(&value);
            let result = QueryService::new(tree.root()).find_by_value(&target, !ignore_case);
            print_result(&result, output, config.json.indent_size)
        }
        Command::Array {
            path,
            skip,
            take,
            input,
        } => {
            let tree = load_tree(&input, &options)?;
            let result = QueryService::new(tree.root()).get_array_elements(&path, skip, take);
            print_result(&result, output, config.json.indent_size)
        }
        Command::Export {
            format,
            query,
            delimiter,
            root,
            item,
            compact,
            input,
        } => {
            let tree = load_tree(&input, &options)?;
            let format: ExportFormat = format
                .as_deref()
                .unwrap_or(config.export.default_format.as_str())
                .parse()?;
            let export_options = ExportOptions {
                format,
                csv_delimiter: parse_delimiter(
                    delimiter.as_deref().unwrap_or(config.export.csv_delimiter.as_str()),
                )?,
                xml_root: root.unwrap_or_else(|| config.export.xml_root.clone()),
                xml_item: item.unwrap_or_else(|| config.export.xml_item.clone()),
                indent: config.json.indent_size,
                compact,
            };

            let elements = match query {
                Some(query) => {
                    let result = QueryService::new(tree.root()).execute_json_path(&query);
                    ensure_success(&result)?;
                    result.into_results()
                }
                None => vec![tree.root().clone()],
            };

            let text = export::export(&elements, &export_options)?;
            log::info!("Exported {} elements as {}", elements.len(), format);
            emit(output, &text)
        }
    }
}

/// Sets up `env_logger`. `RUST_LOG` wins over the configured level, and
/// `--verbose` wins over both.
fn init_logging(level: &str, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(level);
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn read_text(input: &InputArgs, options: &LoadOptions) -> Result<String> {
    if let Some(path) = &input.file {
        return read_file_text(path, options.max_file_size);
    }
    if let Some(json) = &input.json {
        return Ok(json.clone());
    }
    require_piped_stdin()?;
    read_stdin_text(options.max_file_size)
}

fn load_tree(input: &InputArgs, options: &LoadOptions) -> Result<JsonTree> {
    if let Some(path) = &input.file {
        return load_json_file(path, options);
    }
    if let Some(json) = &input.json {
        return parse_json(json, &options.parse);
    }
    require_piped_stdin()?;
    load_json_from_stdin(options)
}

fn require_piped_stdin() -> Result<()> {
    if io::stdin().is_terminal() {
        bail!("No input given: use --file, --json, or pipe JSON on stdin");
    }
    Ok(())
}

fn ensure_success(result: &QueryResult) -> Result<()> {
    if !result.is_success() {
        bail!("{}", result.error_message().unwrap_or("Query failed"));
    }
    Ok(())
}

/// Prints the results as a JSON array with a timing summary on stderr.
fn print_result(result: &QueryResult, output: Option<&Path>, indent: usize) -> Result<()> {
    ensure_success(result)?;
    emit(output, &to_pretty_string(result.results(), indent)?)?;
    eprintln!(
        "Found {} results in {:.2}ms",
        result.len(),
        result.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => write_output(path, text),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
