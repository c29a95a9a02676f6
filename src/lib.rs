pub mod error;
pub mod fetch;
pub mod filters;
pub mod mcp;
pub mod model;
pub mod normalize;
pub mod query;
pub mod table;
pub mod trend;

use error::FlightError;
use fetch::AmadeusClient;
use model::{LocationSuggestion, SearchResult};
use query::SearchParams;

pub async fn search(
    client: &AmadeusClient,
    params: &SearchParams,
) -> Result<SearchResult, FlightError> {
    let payload = client.flight_offers(params).await?;
    Ok(normalize::normalize_flight_offers(&payload))
}

pub async fn locations(
    client: &AmadeusClient,
    keyword: &str,
) -> Result<Vec<LocationSuggestion>, FlightError> {
    let keyword = keyword.trim();
    if keyword.len() < 2 {
        return Ok(Vec::new());
    }
    let payload = client.locations(keyword).await?;
    Ok(normalize::normalize_locations(&payload))
}
