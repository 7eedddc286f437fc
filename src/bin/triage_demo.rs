//! Classify text from the command line (or stdin) and print the full response
//! as JSON. Honors WELLNESS_LEXICON_PATH / WELLNESS_CATALOG_PATH.
//!
//!   cargo run --bin triage_demo -- "I can't sleep and feel anxious about work"

use std::io::Read;

use anyhow::Context;
use wellness_analyzer::analyze::{classify_and_recommend, validate_user_input};
use wellness_analyzer::catalog::Catalog;
use wellness_analyzer::guidance::build_response;
use wellness_analyzer::lexicon::Lexicon;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let mut text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading text from stdin")?;
    }

    if let Err(e) = validate_user_input(&text) {
        eprintln!("invalid input: {e}");
        std::process::exit(2);
    }

    let lexicon = Lexicon::load()?;
    let catalog = Catalog::load()?;
    let classification = classify_and_recommend(&text, None, None, &lexicon, &catalog)?;
    let response = build_response(classification, None);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
