//! `pricebook`: price-list board and admin workflows from the command line.

mod board;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::json;

use pricebook_core::{Timestamp, parse_timestamp};
use pricebook_infra::handlers::{self, HandlerError};
use pricebook_infra::{AppContext, Config};
use pricebook_pricing::{Locale, PriceListRecord, parse_price_lists_lossy};

#[derive(Parser)]
#[command(name = "pricebook")]
#[command(about = "Price-list status board and admin workflows", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides PRICEBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a price-list board from a JSON export
    Board {
        /// JSON file: `{"price_lists": [...]}` or a bare array
        #[arg(short, long)]
        input: PathBuf,

        /// Instant to classify at (default: now)
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<Timestamp>,

        /// en or ru (default: PRICEBOOK_LOCALE)
        #[arg(long)]
        locale: Option<Locale>,

        /// Show sections with no price lists
        #[arg(long)]
        show_empty: bool,
    },

    /// Print `id<TAB>status` for every record
    Classify {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, value_parser = parse_timestamp)]
        now: Option<Timestamp>,
    },

    /// Run create-brand against in-memory stores
    CreateBrand {
        #[arg(short, long)]
        name: String,
    },

    /// Run create-price-set (default prices) against in-memory stores
    CreatePriceSet,

    /// Next firing instant of the daily job
    NextRun {
        #[arg(long, value_parser = parse_timestamp)]
        after: Option<Timestamp>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    pricebook_observability::init(&config.log);

    match cli.command {
        Commands::Board {
            input,
            now,
            locale,
            show_empty,
        } => {
            let records = load(&input)?;
            let locale = locale.unwrap_or(config.locale);
            let now = now.unwrap_or_else(chrono::Utc::now);
            print!("{}", board::render(&records, now, locale, show_empty));
        }
        Commands::Classify { input, now } => {
            let records = load(&input)?;
            let now = now.unwrap_or_else(chrono::Utc::now);
            print!("{}", board::classify_lines(&records, now));
        }
        Commands::CreateBrand { name } => {
            let ctx = AppContext::in_memory(config);
            let body = json!({ "name": name }).to_string();
            let response = handlers::create_brand(&ctx, &body).map_err(handler_failure)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::CreatePriceSet => {
            let ctx = AppContext::in_memory(config);
            let response = handlers::create_price_set(&ctx).map_err(handler_failure)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::NextRun { after } => {
            let after = after.unwrap_or_else(chrono::Utc::now);
            let next = config.daily_job_schedule.next_after(after);
            println!("{}", next.to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Vec<PriceListRecord>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed =
        parse_price_lists_lossy(&raw).with_context(|| format!("parsing {}", path.display()))?;
    for err in &parsed.rejected {
        tracing::warn!(path = %path.display(), error = %err, "price list skipped");
    }
    tracing::debug!(
        path = %path.display(),
        records = parsed.records.len(),
        skipped = parsed.rejected.len(),
        "price lists loaded"
    );
    Ok(parsed.records)
}

fn handler_failure(err: HandlerError) -> anyhow::Error {
    anyhow!("{} ({}): {}", err.code(), err.status_code(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_board_flags() {
        let cli = Cli::try_parse_from([
            "pricebook",
            "board",
            "--input",
            "lists.json",
            "--now",
            "2024-01-01",
            "--locale",
            "ru",
            "--show-empty",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Board {
                input,
                now,
                locale,
                show_empty,
            } => {
                assert_eq!(input, PathBuf::from("lists.json"));
                assert_eq!(now, Some(parse_timestamp("2024-01-01T00:00:00Z").unwrap()));
                assert_eq!(locale, Some(Locale::Ru));
                assert!(show_empty);
            }
            _ => panic!("expected board"),
        }
    }

    #[test]
    fn rejects_bad_timestamps_and_locales() {
        assert!(Cli::try_parse_from(["pricebook", "next-run", "--after", "yesterday"]).is_err());
        assert!(
            Cli::try_parse_from(["pricebook", "board", "-i", "x.json", "--locale", "fr"]).is_err()
        );
    }

    #[test]
    fn load_skips_bad_records_and_keeps_the_rest() {
        let path = std::env::temp_dir().join(format!("pricebook-load-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[
                {"id":"a","title":"A","status":"active","updated_at":"2024-01-01T10:00+0300"},
                {"id":"b","title":"B","status":"active","updated_at":"someday"}
            ]"#,
        )
        .unwrap();

        let records = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "a");
    }

    #[test]
    fn load_fails_on_a_wrong_top_level_shape() {
        let path =
            std::env::temp_dir().join(format!("pricebook-shape-{}.json", std::process::id()));
        fs::write(&path, r#"{"lists": []}"#).unwrap();

        let err = load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(format!("{err:#}").contains("price_lists"), "{err:#}");
    }
}
