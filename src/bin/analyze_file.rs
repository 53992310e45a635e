//! Analyze a file of pasted reviews (separated by `─────`) and print the JSON report.
//! Without an argument the built-in Play Store sample corpus is used.

use std::fs;

use anyhow::Context;
use app_review_analyzer::fetch::split_pasted_reviews;
use app_review_analyzer::samples::PLAY_STORE_SAMPLES;
use app_review_analyzer::Analyzer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let reviews: Vec<String> = match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            split_pasted_reviews(&text)
        }
        None => PLAY_STORE_SAMPLES.iter().map(|s| s.to_string()).collect(),
    };

    let report = Analyzer::default().analyze(&reviews);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
