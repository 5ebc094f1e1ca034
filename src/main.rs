mod config;
mod csv_render;
mod parser;
mod pdf_text;

use std::path::{Path, PathBuf};
use std::{env, fs, process};

use csv_render::SizeStyle;
use tracing::{info, warn};

/// Usage: `invoice_import <invoice.pdf|invoice.txt> [--dutch] [--json] [--out <file>] [--config <file>]`
///
/// Parses one supplier invoice into per-size stock rows and writes them as
/// CSV to stdout (or `--out`). `--dutch` spells month/year sizes out in
/// Dutch; `--json` additionally prints the parsed products as JSON.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // init tracing
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter("info")
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(cli) = CliArgs::parse(&args[1..]) else {
        eprintln!(
            "Usage: {} <invoice.pdf|invoice.txt> [--dutch] [--json] [--out <file>] [--config <file>]",
            args.first().map(String::as_str).unwrap_or("invoice_import")
        );
        process::exit(2);
    };

    run(&cli)
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load(&cli.config)?;

    let text = load_document_text(&cli.input)?;
    let lines = parser::normalize_lines(&text);
    info!(file = %cli.input.display(), lines = lines.len(), "Document text ready");

    let products = parser::parse_lines(&lines, &cfg.parser_options());
    if products.is_empty() {
        warn!(file = %cli.input.display(), "No products parsed from document");
        dump_raw_text(&text);
    }

    let csv = csv_render::render_csv(&products, cli.style);
    match &cli.out {
        Some(path) => {
            fs::write(path, &csv)?;
            info!(
                file = %path.display(),
                products = products.len(),
                rows = csv.lines().count() - 1,
                "CSV written"
            );
        }
        None => print!("{csv}"),
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    }

    Ok(())
}

/// PDF inputs go through the extraction step; anything else is read as
/// already-extracted plain text.
fn load_document_text(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        let bytes = fs::read(path)?;
        pdf_text::extract_text(&bytes)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Debug aid for empty parses: show what the extractor actually produced.
fn dump_raw_text(text: &str) {
    println!("\n--- Extracted Text (first 2000 chars) ---");
    println!("{}", text.chars().take(2000).collect::<String>());
    println!("--- End ---\n");
}

struct CliArgs {
    input: PathBuf,
    style: SizeStyle,
    json: bool,
    out: Option<PathBuf>,
    config: PathBuf,
}

impl CliArgs {
    fn parse(args: &[String]) -> Option<Self> {
        let mut input = None;
        let mut style = SizeStyle::Raw;
        let mut json = false;
        let mut out = None;
        let mut config = PathBuf::from(".config/invoice_import.toml");

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--dutch" => style = SizeStyle::Dutch,
                "--json" => json = true,
                "--out" => out = Some(PathBuf::from(iter.next()?)),
                "--config" => config = PathBuf::from(iter.next()?),
                flag if flag.starts_with("--") => return None,
                path => {
                    // at most one input file
                    if input.replace(PathBuf::from(path)).is_some() {
                        return None;
                    }
                }
            }
        }

        Some(Self {
            input: input?,
            style,
            json,
            out,
            config,
        })
    }
}
