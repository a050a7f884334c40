use std::error::Error;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use detection::{
    analysis::AnalysisRequest,
    currency::{IpApiLocator, detect_currency},
    executable_utils::initialize_tracing,
};
use shopping::options::SignalFlag;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check a product listing for cognitive biases",
    long_about = None
)]
struct Cli {
    /// What are you buying?
    #[arg(short, long)]
    item: String,

    /// Current price
    #[arg(short, long)]
    price: String,

    /// Original (crossed out) price
    #[arg(short, long)]
    original_price: Option<String>,

    /// Marketing signal shown by the listing, e.g. limitedTime (repeatable)
    #[arg(short, long = "flag", value_parser = parse_flag)]
    flags: Vec<SignalFlag>,

    /// Currency code; defaults to the first table entry
    #[arg(long)]
    currency: Option<String>,

    /// Look the currency up from IP geolocation when --currency is absent
    #[arg(long)]
    detect_currency: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_flag(value: &str) -> Result<SignalFlag, String> {
    SignalFlag::from_str(value).map_err(|_| {
        let known: Vec<&str> = SignalFlag::iter().map(SignalFlag::name).collect();
        format!("unknown flag '{}', expected one of: {}", value, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let analyzer = shopping::analyzer()?;
    let mut fallback = analyzer.currencies().default_currency();
    if cli.currency.is_none() && cli.detect_currency {
        let locator = IpApiLocator::new("https://ipapi.co/json/", Duration::from_secs(3))?;
        let table = analyzer.currencies();
        if let Some(currency) = detect_currency(&locator, &table).await {
            fallback = currency;
        }
    }

    let request = AnalysisRequest {
        item_name: cli.item,
        price: cli.price,
        original_price: cli.original_price,
        selected_options: cli
            .flags
            .iter()
            .map(|flag| (flag.name().to_string(), true))
            .collect(),
        currency: cli.currency,
    };

    match analyzer.analyze(&request, &fallback) {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::from(2))
        }
    }
}
