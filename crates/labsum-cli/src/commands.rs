use anyhow::{Context, Result};
use tracing::debug;

use labsum_cli::input::read_input;
use labsum_cli::render::{dictionary_table, pivot_table, stats_table};
use labsum_core::{ParseOutcome, parse};
use labsum_standards::default_dictionary;

use crate::cli::{ByDateArgs, InputArgs, StatsArgs, TableArgs, TableFormatArg};

fn parse_input(input: &InputArgs) -> Result<ParseOutcome> {
    let text = read_input(input.file.as_deref())?;
    debug!(bytes = text.len(), "input read");
    Ok(parse(&text))
}

pub fn run_summary(args: &InputArgs) -> Result<()> {
    let outcome = parse_input(args)?;
    println!("{}", outcome.summary());
    Ok(())
}

pub fn run_by_date(args: &ByDateArgs) -> Result<()> {
    let outcome = parse_input(&args.input)?;
    println!("{}", outcome.by_date(args.latest_only));
    Ok(())
}

pub fn run_table(args: &TableArgs) -> Result<()> {
    let outcome = parse_input(&args.input)?;
    let data = outcome.table(args.order.into());
    match args.format {
        TableFormatArg::Pretty => {
            if data.is_empty() {
                println!("No values found.");
            } else {
                println!("{}", pivot_table(&data));
            }
        }
        TableFormatArg::Tsv => print!("{}", data.to_tsv()),
        TableFormatArg::Json => {
            let json = serde_json::to_string_pretty(&data).context("serialize table")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let outcome = parse_input(&args.input)?;
    if args.json {
        let json = serde_json::to_string_pretty(outcome.stats()).context("serialize stats")?;
        println!("{json}");
    } else {
        println!("{}", stats_table(outcome.stats()));
    }
    Ok(())
}

pub fn run_dictionary() -> Result<()> {
    println!("{}", dictionary_table(default_dictionary().iter()));
    Ok(())
}
