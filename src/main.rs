mod api;
mod cache;
mod config;
mod countries;
mod currencies;
mod db;
mod error;
mod models;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use csv::Writer;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::Cache;
use crate::models::RatesResponse;

#[derive(Parser)]
#[command(name = "fxconvert", about = "Convert currencies using VATComply exchange rates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// List the currencies available for conversion
    Currencies,
    /// Show the representative countries for a currency
    Countries { code: String },
    /// Show the current exchange rates
    Rates {
        /// Write the rates to a CSV file under output/
        #[arg(long)]
        csv: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = config::Config::default();
    config::apply_env_overrides(&mut config);

    let pool = db::create_db_pool(&config.db_url).await?;
    let client = api::VatComplyClient::new(&config.base_url);
    let mut cache = Cache::new(client, pool);
    if let Some(secs) = config.cache_max_age_secs {
        cache = cache.with_max_age(Duration::from_secs(secs));
    }

    // Fetch whatever is missing up front; cached resources cost nothing.
    cache.warm_up().await?;

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let from = from.to_uppercase();
            let to = to.to_uppercase();
            let amount = currencies::parse_amount(&amount);

            let rates = cache.get_rates().await?;
            let converted = currencies::convert(amount, &rates.rates, &from, &to)?;
            println!("{} {} = {:.2} {} (rates from {})", amount, from, converted, to, rates.date);
        }
        Commands::Currencies => {
            let (all, rates) = tokio::try_join!(cache.get_currencies(), cache.get_rates())?;
            for code in currencies::selectable_currencies(&all, &rates.rates) {
                let info = &all[&code];
                match &info.symbol {
                    Some(symbol) => println!("{}  {} ({})", code, info.name, symbol),
                    None => println!("{}  {}", code, info.name),
                }
            }
        }
        Commands::Countries { code } => {
            let code = code.to_uppercase();
            let all = cache.get_countries().await?;
            let found = countries::lookup_countries(&code, &all);
            if found.is_empty() {
                println!("No country found for {}", code);
            }
            for country in found {
                println!("{} {} — {} ({})", country.emoji, country.name, country.capital, country.iso3);
            }
        }
        Commands::Rates { csv } => {
            let rates = cache.get_rates().await?;
            if csv {
                let path = export_rates_csv(&rates)?;
                println!("✅ Exchange rates written to {}", path.display());
            } else {
                println!("Base: {} ({})", rates.base, rates.date);
                let mut codes: Vec<_> = rates.rates.keys().collect();
                codes.sort();
                for code in codes {
                    println!("{}  {}", code, rates.rates[code]);
                }
            }
        }
    }

    Ok(())
}

/// Export the rate table to a timestamped CSV file
fn export_rates_csv(rates: &RatesResponse) -> Result<PathBuf> {
    let output_dir = PathBuf::from("output");
    std::fs::create_dir_all(&output_dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let csv_path = output_dir.join(format!("exchange_rates_{}.csv", timestamp));
    let mut writer = Writer::from_path(&csv_path)?;

    writer.write_record(["Currency", "Rate", "Base", "Date"])?;

    let mut codes: Vec<_> = rates.rates.keys().collect();
    codes.sort();
    for code in codes {
        writer.write_record([
            code.as_str(),
            &rates.rates[code].to_string(),
            &rates.base,
            &rates.date,
        ])?;
    }

    writer.flush()?;
    Ok(csv_path)
}
