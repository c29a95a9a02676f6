use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::fetch::{AmadeusClient, Credentials, FetchOptions, TokenCache};
use crate::filters::{self, OfferFilters, SortKey};
use crate::model::{Offer, SearchResult};
use crate::query::SearchParams;
use crate::trend::price_points_by_departure_hour;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct OffersSearchArgs {
    #[schemars(
        description = "Origin airport IATA code, exactly 3 uppercase letters. Example: JFK, HEL, LAX"
    )]
    from: String,
    #[schemars(
        description = "Destination airport IATA code, exactly 3 uppercase letters. Example: DFW, BCN, NRT"
    )]
    to: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Example: 2026-03-01")]
    date: String,
    #[schemars(
        description = "Return date in YYYY-MM-DD format. Searches are round-trip; must not precede the departure date"
    )]
    return_date: String,
    #[schemars(description = "Adult passengers (1-9). Default: 1")]
    adults: Option<u32>,
    #[schemars(description = "Currency code. Examples: USD, EUR, JPY. Default: USD")]
    currency: Option<String>,
    #[schemars(description = "Maximum offers to request (1-250). Default: 50")]
    max: Option<u32>,
    #[schemars(
        description = "Keep offers with these stop counts, comma-separated. 2 means 2 or more. Example: 0,1"
    )]
    stops: Option<String>,
    #[schemars(description = "Keep offers priced at or above this amount")]
    price_min: Option<f64>,
    #[schemars(description = "Keep offers priced at or below this amount")]
    price_max: Option<f64>,
    #[schemars(
        description = "Keep offers involving any of these airlines, comma-separated IATA codes. Example: AA,JL"
    )]
    airlines: Option<String>,
    #[schemars(description = "Sort order: best, price, or stops. Default: best")]
    sort: Option<String>,
    #[schemars(description = "Return only the N cheapest results")]
    top: Option<usize>,
    #[schemars(
        description = "Include a 24-hour price-by-departure-hour summary of the filtered offers"
    )]
    trend: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LocationsSearchArgs {
    #[schemars(description = "Airport or city keyword, at least 2 characters. Example: helsinki")]
    query: String,
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn apply_top(offers: &mut Vec<Offer>, n: usize) {
    offers.sort_by(|a, b| a.price.amount.total_cmp(&b.price.amount));
    offers.truncate(n);
}

fn env_client() -> Result<AmadeusClient, crate::error::FlightError> {
    let credentials = Credentials::from_env()?;
    AmadeusClient::new(credentials, TokenCache::new(), &FetchOptions::default())
}

#[derive(Debug, Clone)]
struct FarelensMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FarelensMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search round-trip flight offers and return them as JSON. Queries the Amadeus flight-offers API, normalizes the response, and applies the requested stop/price/airline filters. Each offer carries its price, airlines, and both itineraries with segments. Set trend=true to also get a 24-entry price-by-departure-hour summary of the filtered offers."
    )]
    async fn offers_search(
        &self,
        Parameters(args): Parameters<OffersSearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let params = SearchParams {
            origin: args.from.trim().to_uppercase(),
            destination: args.to.trim().to_uppercase(),
            departure_date: args.date.trim().to_string(),
            return_date: args.return_date.trim().to_string(),
            adults: args.adults.unwrap_or(1),
            currency_code: args
                .currency
                .unwrap_or_else(|| "USD".into())
                .trim()
                .to_uppercase(),
            max_results: args.max.unwrap_or(50),
        };

        if let Err(e) = params.validate() {
            return tool_error(e.to_string());
        }

        let stops = match args.stops.as_deref().map(filters::parse_stops_arg).transpose() {
            Ok(s) => s.unwrap_or_default(),
            Err(e) => return tool_error(e.to_string()),
        };
        let airlines = args
            .airlines
            .as_deref()
            .map(filters::parse_airlines_arg)
            .unwrap_or_default();
        let offer_filters = OfferFilters::new(stops, args.price_min, args.price_max, airlines);

        let sort = match args.sort.as_deref().map(SortKey::from_str_loose).transpose() {
            Ok(s) => s.unwrap_or(SortKey::Best),
            Err(e) => return tool_error(e.to_string()),
        };

        let client = match env_client() {
            Ok(c) => c,
            Err(e) => return tool_error(e.to_string()),
        };

        match crate::search(&client, &params).await {
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

                let mut value = serde_json::to_value(&filtered).unwrap();
                if args.trend.unwrap_or(false) {
                    let points = price_points_by_departure_hour(&filtered.offers);
                    value["points"] = serde_json::to_value(&points).unwrap();
                }

                let json = serde_json::to_string_pretty(&value).unwrap();
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Look up airports and cities by keyword through the Amadeus location reference data. Returns IATA code, name, city, country, and type for each match. Keywords shorter than 2 characters return an empty list."
    )]
    async fn locations_search(
        &self,
        Parameters(args): Parameters<LocationsSearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let client = match env_client() {
            Ok(c) => c,
            Err(e) => return tool_error(e.to_string()),
        };

        match crate::locations(&client, &args.query).await {
            Ok(locations) => {
                let json = serde_json::to_string_pretty(&locations).unwrap();
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => tool_error(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for FarelensMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "farelens".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Flight-offer search over the Amadeus API. Use offers_search for round-trip \
                 offers (filters: stops, price range, airlines; set trend=true for a \
                 price-by-departure-hour summary). Use locations_search to resolve airport \
                 codes from city or airport names. Requires AMADEUS_CLIENT_ID and \
                 AMADEUS_CLIENT_SECRET in the environment."
                    .into(),
            ),
        }
    }
}

pub async fn run() {
    let service = FarelensMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .expect("failed to start MCP server");
    service.waiting().await.expect("MCP server error");
}
