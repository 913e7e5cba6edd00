//! wikilex - Wiktionary entry extractor

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use wikilex::{Dialect, EntryLayout, Extractor, ExtractorConfig, PageResult, extract_conjugation_bytes};

#[derive(Parser)]
#[command(name = "wikilex")]
#[command(version, about = "Extract Finnish dictionary entries from Wiktionary pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    wikilex talo.html                     Extract an en.wiktionary.org page
    wikilex -d fi talo.html --pretty      Extract a fi.wiktionary.org page
    wikilex -d fi lukea.html -c taivutus.html
                                          Include the verb's conjugation page")]
struct Cli {
    /// Saved Wiktionary page (HTML)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Wiktionary edition the page comes from
    #[arg(short, long, value_enum, default_value = "en")]
    dialect: Dialect,

    /// Language headline to scope the page to
    #[arg(short, long, value_name = "NAME")]
    marker: Option<String>,

    /// How category headings map to entries
    #[arg(short, long, value_enum, default_value = "entry")]
    layout: EntryLayout,

    /// Saved conjugation page of the verb (fi.wiktionary.org)
    #[arg(short, long, value_name = "PAGE")]
    conjugation: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Suppress diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = ExtractorConfig::for_dialect(cli.dialect).with_layout(cli.layout);
    if let Some(ref marker) = cli.marker {
        config = config.with_marker(marker);
    }

    let mut page = Extractor::new()
        .with_config(config)
        .extract_file(&cli.input)
        .map_err(|e| format!("{}: {e}", cli.input))?;

    if let Some(ref path) = cli.conjugation {
        let bytes = fs::read(path).map_err(|e| format!("{path}: {e}"))?;
        if !page.attach_conjugation_page(extract_conjugation_bytes(&bytes)) && !cli.quiet {
            eprintln!("warning: no entry links to a conjugation page, {path} ignored");
        }
    }

    if !cli.quiet {
        report(&page);
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&page)
    } else {
        serde_json::to_string(&page)
    }
    .map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(())
}

fn report(page: &PageResult) {
    for diagnostic in &page.diagnostics {
        eprintln!("{diagnostic}");
    }
    if !page.is_empty() {
        eprintln!(
            "{}: {} entries, {} morphemes",
            page.term,
            page.entries.len(),
            page.entries.iter().map(|e| e.morphemes().len()).sum::<usize>()
        );
    }
}
