// crates/catfeed-cli/src/main.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use comfy_table::Table as DisplayTable;

use catfeed_core::{normalize, AvailabilityRule, FeedConfig, ImagePolicy, Table};

/// A CLI for the catalog feed normalizer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Normalize a catalog export into an advertising feed.
    Process {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Domain prepended to derived product links, e.g. https://yourdomain.com
        #[arg(long)]
        domain: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Constant category emitted on every row when set.
        #[arg(long)]
        google_product_category: Option<String>,
        /// Image distribution policy: explode | first-only
        #[arg(long, default_value = "explode")]
        image_policy: String,
        /// Fallback for non-numeric stock cells: forward-fill | zero-default
        #[arg(long, default_value = "forward-fill")]
        availability: String,
        /// Emit a constant `condition = new` column.
        #[arg(long)]
        condition: bool,
        /// Print the run summary as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the header columns and row count of a catalog export.
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            domain,
            currency,
            google_product_category,
            image_policy,
            availability,
            condition,
            json,
        } => {
            let image_policy = ImagePolicy::try_from(image_policy.as_str()).map_err(|e| anyhow!(e))?;
            let availability =
                AvailabilityRule::try_from(availability.as_str()).map_err(|e| anyhow!(e))?;

            let bytes = fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let table = Table::from_csv(&bytes)?;
            let rows_in = table.height();

            let mut config = FeedConfig::new(domain);
            config.currency = currency;
            config.google_product_category = google_product_category;
            config.set_condition = condition;
            config.image_policy = image_policy;
            config.availability_rule = availability;

            let outcome = normalize(table, &config)?;
            let feed = outcome.table.to_csv()?;
            fs::write(&output, feed)
                .with_context(|| format!("failed to write {}", output.display()))?;

            if json {
                let summary = serde_json::json!({
                    "rows_in": rows_in,
                    "rows_out": outcome.table.height(),
                    "rows_dropped": outcome.dropped.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let mut summary = DisplayTable::new();
                summary.set_header(vec!["rows in", "rows out", "rows dropped"]);
                summary.add_row(vec![
                    rows_in.to_string(),
                    outcome.table.height().to_string(),
                    outcome.dropped.len().to_string(),
                ]);
                println!("{summary}");
                println!("Feed written to {}", output.display());
            }
        }
        Commands::Inspect { input } => {
            let bytes = fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let table = Table::from_csv(&bytes)?;

            let mut columns = DisplayTable::new();
            columns.set_header(vec!["column"]);
            for name in &table.header {
                columns.add_row(vec![name.clone()]);
            }
            println!("{columns}");
            println!("{} data rows", table.height());
        }
    }

    Ok(())
}
