use std::process;

use clap::Parser;

use farelens::error::FlightError;
use farelens::fetch::{AmadeusClient, Credentials, FetchOptions, TokenCache};
use farelens::filters::{self, OfferFilters, SortKey};
use farelens::model::{Itinerary, Offer, PricePoint, SearchResult};
use farelens::query::SearchParams;
use farelens::table;
use farelens::trend::price_points_by_departure_hour;

#[derive(Parser)]
#[command(
    name = "farelens",
    about = "Search Amadeus flight offers from the terminal",
    version,
    after_help = "\
Credentials:
  export AMADEUS_CLIENT_ID=...      (from developers.amadeus.com)
  export AMADEUS_CLIENT_SECRET=...
  export AMADEUS_HOST=...           (optional, defaults to the test API)

Examples:
  farelens search -f JFK -t DFW -d 2026-03-01 --return-date 2026-03-08
  farelens search -f HEL -t BCN -d 2026-03-01 --return-date 2026-03-08 --json --pretty
  farelens search -f JFK -t LHR -d 2026-04-01 --return-date 2026-04-10 --stops 0,1 --price-max 900
  farelens search -f LAX -t NRT -d 2026-05-01 --return-date 2026-05-15 --airlines AA,JL --trend
  farelens locations -q helsinki

Agent-optimized:
  farelens search -f JFK -t DFW -d 2026-03-01 --return-date 2026-03-08 --compact --top 3"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search round-trip flight offers",
        long_about = "Search round-trip flight offers between two airports.\n\
            Results can be filtered by stops, price range, and airlines, sorted,\n\
            and rendered as a table, compact lines, or JSON. --trend adds a\n\
            price-by-departure-hour summary.",
        after_help = "\
Examples:
  Basic:        farelens search -f JFK -t DFW -d 2026-03-01 --return-date 2026-03-08
  Filtered:     farelens search -f JFK -t LHR -d 2026-04-01 --return-date 2026-04-10 --stops 0 --price-max 900
  By airline:   farelens search -f LAX -t NRT -d 2026-05-01 --return-date 2026-05-15 --airlines AA,JL
  Price trend:  farelens search -f HEL -t BCN -d 2026-03-01 --return-date 2026-03-08 --trend
  JSON output:  farelens search -f HEL -t BCN -d 2026-03-01 --return-date 2026-03-08 --json --pretty

Agent-optimized:
  farelens search -f JFK -t DFW -d 2026-03-01 --return-date 2026-03-08 --compact --top 3"
    )]
    Search(SearchArgs),
    #[command(about = "Look up airports and cities by keyword")]
    Locations(LocationsArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(
        short, long,
        value_name = "IATA",
        help = "Origin airport code",
        long_help = "Origin airport IATA code (3 letters, e.g. JFK, HEL, LAX)."
    )]
    from: String,

    #[arg(
        short, long,
        value_name = "IATA",
        help = "Destination airport code",
        long_help = "Destination airport IATA code (3 letters, e.g. LHR, BCN, NRT)."
    )]
    to: String,

    #[arg(
        short, long,
        value_name = "YYYY-MM-DD",
        help = "Departure date",
        long_help = "Departure date in YYYY-MM-DD format."
    )]
    date: String,

    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Return date",
        long_help = "Return date in YYYY-MM-DD format. Searches are round-trip; \
            the return date must not precede the departure date."
    )]
    return_date: String,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "USD", value_name = "CODE", help = "Currency code (e.g. USD, EUR, JPY)")]
    currency: String,

    #[arg(long, default_value = "50", value_name = "N", help = "Maximum offers to request (1-250)")]
    max: u32,

    #[arg(
        long,
        value_name = "0,1,2",
        help = "Keep offers with these stop counts (2 means 2 or more)"
    )]
    stops: Option<String>,

    #[arg(long, value_name = "AMOUNT", help = "Keep offers priced at or above this amount")]
    price_min: Option<f64>,

    #[arg(long, value_name = "AMOUNT", help = "Keep offers priced at or below this amount")]
    price_max: Option<f64>,

    #[arg(
        long,
        value_name = "AA,DL,...",
        help = "Keep offers involving any of these airlines (IATA codes)"
    )]
    airlines: Option<String>,

    #[arg(
        long,
        default_value = "best",
        value_name = "KEY",
        help = "Sort order [best, price, stops]"
    )]
    sort: String,

    #[arg(long, value_name = "N", help = "Show only the N cheapest results")]
    top: Option<usize>,

    #[arg(long, help = "Show a price-by-departure-hour trend for the filtered offers")]
    trend: bool,

    #[arg(long, help = "One-line-per-offer output (recommended for scripts and AI agents)")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[arg(long, value_name = "URL", help = "Amadeus API host (overrides AMADEUS_HOST)")]
    host: Option<String>,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,
}

#[derive(clap::Args)]
struct LocationsArgs {
    #[arg(
        short, long,
        value_name = "TEXT",
        help = "Search keyword (airport or city name, at least 2 characters)"
    )]
    query: String,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[arg(long, value_name = "URL", help = "Amadeus API host (overrides AMADEUS_HOST)")]
    host: Option<String>,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,
}

fn error_code(err: &FlightError) -> i32 {
    match err {
        FlightError::InvalidAirport(_)
        | FlightError::InvalidDate(_)
        | FlightError::Validation(_)
        | FlightError::MissingCredential(_) => 2,
        FlightError::Timeout
        | FlightError::ConnectionFailed(_)
        | FlightError::DnsResolution(_)
        | FlightError::TlsError(_)
        | FlightError::ProxyError(_) => 3,
        FlightError::RateLimited | FlightError::InvalidCredentials(_) => 4,
        FlightError::HttpStatus(_) => 5,
        FlightError::JsonParse(_) => 6,
    }
}

fn error_kind(err: &FlightError) -> &'static str {
    match err {
        FlightError::InvalidAirport(_) => "invalid_airport",
        FlightError::InvalidDate(_) => "invalid_date",
        FlightError::Validation(_) => "validation_error",
        FlightError::MissingCredential(_) => "missing_credential",
        FlightError::Timeout => "timeout",
        FlightError::ConnectionFailed(_) => "connection_failed",
        FlightError::DnsResolution(_) => "dns_error",
        FlightError::TlsError(_) => "tls_error",
        FlightError::ProxyError(_) => "proxy_error",
        FlightError::RateLimited => "rate_limited",
        FlightError::InvalidCredentials(_) => "invalid_credentials",
        FlightError::HttpStatus(_) => "http_error",
        FlightError::JsonParse(_) => "parse_error",
    }
}

fn die(err: &FlightError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn apply_top(offers: &mut Vec<Offer>, n: usize) {
    offers.sort_by(|a, b| a.price.amount.total_cmp(&b.price.amount));
    offers.truncate(n);
}

fn compact_route(itinerary: &Itinerary) -> String {
    let codes: Vec<&str> = std::iter::once(
        itinerary
            .segments
            .first()
            .map(|s| s.from.as_str())
            .unwrap_or("?"),
    )
    .chain(itinerary.segments.iter().map(|s| s.to.as_str()))
    .collect();
    codes.join(">")
}

fn print_compact(result: &SearchResult) {
    for offer in &result.offers {
        let price = table::format_price(offer.price.amount, &offer.price.currency);
        let out = format!(
            "{} {}",
            compact_route(&offer.outbound),
            table::format_depart(&offer.outbound)
        );
        let back = format!(
            "{} {}",
            compact_route(&offer.inbound),
            table::format_depart(&offer.inbound)
        );
        let stops = format!("{}+{} stops", offer.outbound.stops, offer.inbound.stops);
        let airlines = offer.airlines.join(", ");

        println!("{price} | {out} | {back} | {stops} | {airlines}");
    }
}

fn print_result(result: &SearchResult, points: Option<&[PricePoint]>, args: &SearchArgs) {
    if args.compact {
        if result.offers.is_empty() {
            println!("No offers found.");
            return;
        }
        print_compact(result);
    } else if args.json || args.pretty {
        let mut value = serde_json::to_value(result).unwrap();
        if let Some(points) = points {
            value["points"] = serde_json::to_value(points).unwrap();
        }
        let output = if args.pretty {
            serde_json::to_string_pretty(&value).unwrap()
        } else {
            serde_json::to_string(&value).unwrap()
        };
        println!("{output}");
    } else {
        if result.offers.is_empty() {
            println!("No offers found.");
            return;
        }
        println!("{}", table::render(result));
        if let Some(points) = points {
            let currency = result.currency.as_deref().unwrap_or("");
            println!();
            println!("{}", table::render_trend(points, currency));
        }
    }
}

async fn run_search(args: SearchArgs) {
    let json_mode = args.json || args.pretty;

    let params = SearchParams {
        origin: args.from.trim().to_uppercase(),
        destination: args.to.trim().to_uppercase(),
        departure_date: args.date.trim().to_string(),
        return_date: args.return_date.trim().to_string(),
        adults: args.adults,
        currency_code: args.currency.trim().to_uppercase(),
        max_results: args.max,
    };

    if let Err(e) = params.validate() {
        die(&e, json_mode);
    }

    let sort = match SortKey::from_str_loose(&args.sort) {
        Ok(s) => s,
        Err(e) => die(&e, json_mode),
    };

    let stops = match args.stops.as_deref().map(filters::parse_stops_arg).transpose() {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => die(&e, json_mode),
    };
    let airlines = args
        .airlines
        .as_deref()
        .map(filters::parse_airlines_arg)
        .unwrap_or_default();
    let offer_filters = OfferFilters::new(stops, args.price_min, args.price_max, airlines);

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    let options = FetchOptions {
        host: args.host.clone(),
        proxy: args.proxy.clone(),
        timeout: args.timeout,
    };

    let client = match AmadeusClient::new(credentials, TokenCache::new(), &options) {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    match farelens::search(&client, &params).await {
        Ok(result) => {
            let mut offers: Vec<Offer> = result
                .offers
                .into_iter()
                .filter(|o| offer_filters.matches(o))
                .collect();

            if let Some(n) = args.top {
                apply_top(&mut offers, n);
            }
            filters::sort_offers(&mut offers, sort);

            let filtered = SearchResult {
                offers,
                currency: result.currency,
            };
            let points = args
                .trend
                .then(|| price_points_by_departure_hour(&filtered.offers));

            print_result(&filtered, points.as_deref(), &args);
        }
        Err(e) => die(&e, json_mode),
    }
}

async fn run_locations(args: LocationsArgs) {
    let json_mode = args.json || args.pretty;

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    let options = FetchOptions {
        host: args.host.clone(),
        proxy: args.proxy.clone(),
        timeout: args.timeout,
    };

    let client = match AmadeusClient::new(credentials, TokenCache::new(), &options) {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    match farelens::locations(&client, &args.query).await {
        Ok(locations) => {
            if json_mode {
                let output = if args.pretty {
                    serde_json::to_string_pretty(&locations).unwrap()
                } else {
                    serde_json::to_string(&locations).unwrap()
                };
                println!("{output}");
            } else if locations.is_empty() {
                println!("No locations found.");
            } else {
                println!("{}", table::render_locations(&locations));
            }
        }
        Err(e) => die(&e, json_mode),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => farelens::mcp::run().await,
        Commands::Search(args) => run_search(args).await,
        Commands::Locations(args) => run_locations(args).await,
    }
}
