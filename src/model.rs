use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub id: String,
    pub from: String,
    pub to: String,
    pub depart_at: String,
    pub arrive_at: String,
    pub carrier_code: String,
    pub flight_number: Option<String>,
    pub duration: Option<String>,
}

/// One direction of a round trip. `depart_local_hour` is the wall-clock hour
/// read straight from the first segment's timestamp, never converted between
/// time zones.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub id: String,
    pub duration: Option<String>,
    pub stops: u32,
    pub depart_local_hour: Option<u32>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Offer {
    pub id: String,
    pub price: Money,
    pub validating_airline_codes: Vec<String>,
    pub airlines: Vec<String>,
    pub outbound: Itinerary,
    pub inbound: Itinerary,
    pub stops_max: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub offers: Vec<Offer>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricePoint {
    pub hour: u32,
    pub min_price: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSuggestion {
    pub iata_code: String,
    pub name: String,
    pub sub_type: Option<String>,
    pub city_name: Option<String>,
    pub country_code: Option<String>,
}
