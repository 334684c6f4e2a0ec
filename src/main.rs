use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use snomed_extract::config::{self, GeminiConfig};
use snomed_extract::extraction::{filter_entities, resolve_narrative, EntityExtractor, GeminiClient};
use snomed_extract::report;

fn main() -> ExitCode {
    // Keys live in .env for local runs; a missing file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    println!("--- {} ---", config::APP_NAME);
    println!("This application extracts clinical entities using Gemini AI and directly maps them to SNOMED CT codes.");
    println!();
    println!("Security Note: Your Gemini API key is loaded from an environment variable.");
    println!("It is NOT hardcoded in this binary, enhancing security for local execution.");
    println!("--------------------------------------");
    println!();

    // Fail fast: no network I/O without a credential.
    let gemini_config = match GeminiConfig::from_env() {
        Ok(gemini_config) => gemini_config,
        Err(e) => {
            println!("Error: {e}.");
            println!("Please create a .env file in the working directory with:");
            println!("GEMINI_API_KEY='YOUR_GEMINI_API_KEY_HERE'");
            println!("Or set it directly in your system's environment variables.");
            return ExitCode::from(1);
        }
    };

    println!("Masukkan narasi klinis (atau tekan Enter untuk contoh default berbahasa Indonesia):");
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        println!("Error: gagal membaca input: {e}");
        return ExitCode::from(1);
    }
    let input = line.trim_end_matches(['\r', '\n']);

    let (narrative, used_default) = resolve_narrative(input);
    if used_default {
        println!("\nMenggunakan teks default:\n{narrative}\n");
    } else {
        println!("\nMemproses teks yang diberikan:\n{narrative}\n");
    }

    println!("Status: Menganalisis narasi klinis dengan Gemini AI...");

    let client = GeminiClient::new(gemini_config);
    run_extraction(&client, narrative);

    // Extraction-path failures are reported above but do not change the exit
    // status; only a missing credential exits nonzero.
    ExitCode::SUCCESS
}

/// One analyze-and-filter cycle against the given extractor.
///
/// Failures are printed, never propagated; timing covers the API call through
/// the end of filtering.
fn run_extraction(extractor: &dyn EntityExtractor, narrative: &str) {
    let started = Instant::now();
    match extractor.extract(narrative) {
        Ok(raw_entities) => {
            let entities = filter_entities(raw_entities);
            let elapsed = started.elapsed();
            print!("{}", report::format_report(&entities, elapsed));
        }
        Err(e) => {
            tracing::error!(error = %e, "extraction failed");
            println!("\nError: {e}");
        }
    }
}
