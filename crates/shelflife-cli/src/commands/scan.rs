//! Scan command - interpret the text of a single label.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use shelflife_core::{InterpretError, InterpretResult, LabelInterpreter, LabelParser};

use super::output::{format_items, format_metadata, OutputFormat};
use super::{build_interpreter, load_config};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input text file, or "-" for stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Processing date (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Show confidence scores in text output
    #[arg(long)]
    show_confidence: bool,

    /// Emit candidates and warnings alongside items (JSON only)
    #[arg(long)]
    metadata: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.show_confidence {
        config.output.show_confidence = true;
    }

    let bytes = read_input(&args.input).await?;
    info!("Read {} bytes from {}", bytes.len(), args.input);

    let interpreter = build_interpreter(&config, args.today);
    let today = interpreter.processing_date();
    let result = interpret(&interpreter, &bytes);

    let output = match (&result, args.metadata) {
        (Some(result), true) => format_metadata(result)?,
        (_, true) => format_metadata_empty()?,
        (result, false) => {
            let items = result.as_ref().map(|r| r.items.as_slice()).unwrap_or_default();
            format_items(items, args.format, today, &config.output)?
        }
    };

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(result) = &result {
        for warning in &result.warnings {
            debug!("{}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if input == "-" {
        tokio::io::stdin().read_to_end(&mut bytes).await?;
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        bytes = tokio::fs::read(&path).await?;
    }
    Ok(bytes)
}

/// Run the interpreter, reporting boundary failures as "nothing extracted".
fn interpret(interpreter: &LabelInterpreter, bytes: &[u8]) -> Option<InterpretResult> {
    let result = std::str::from_utf8(bytes)
        .map_err(|e| InterpretError::InvalidEncoding(e.to_string()))
        .and_then(|text| interpreter.parse(text));

    match result {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("Label interpretation failed: {}", e);
            eprintln!("{} Nothing extracted: {}", style("!").yellow(), e);
            None
        }
    }
}

fn format_metadata_empty() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "items": [] }))?)
}
