use std::collections::BTreeSet;

use crate::error::FlightError;
use crate::model::Offer;

/// User-selected filter state. An empty `stops` or `airlines` set means no
/// constraint on that dimension.
#[derive(Debug, Clone, Default)]
pub struct OfferFilters {
    pub stops: BTreeSet<u32>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub airlines: BTreeSet<String>,
}

impl OfferFilters {
    /// Non-finite price bounds are stored as "no bound" rather than rejected.
    pub fn new(
        stops: BTreeSet<u32>,
        price_min: Option<f64>,
        price_max: Option<f64>,
        airlines: BTreeSet<String>,
    ) -> Self {
        Self {
            stops,
            price_min: price_min.filter(|v| v.is_finite()),
            price_max: price_max.filter(|v| v.is_finite()),
            airlines,
        }
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        let stop_bucket = offer.stops_max.min(2);
        if !self.stops.is_empty() && !self.stops.contains(&stop_bucket) {
            return false;
        }

        if self.price_min.is_some_and(|min| offer.price.amount < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| offer.price.amount > max) {
            return false;
        }

        if !self.airlines.is_empty() && !offer.airlines.iter().any(|a| self.airlines.contains(a)) {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SortKey {
    Best,
    Price,
    Stops,
}

impl SortKey {
    pub fn from_str_loose(s: &str) -> Result<Self, FlightError> {
        match s {
            "best" => Ok(Self::Best),
            "price" => Ok(Self::Price),
            "stops" => Ok(Self::Stops),
            _ => Err(FlightError::Validation(format!("invalid sort key: {s}"))),
        }
    }
}

pub fn sort_offers(offers: &mut [Offer], key: SortKey) {
    match key {
        SortKey::Price => {
            offers.sort_by(|a, b| a.price.amount.total_cmp(&b.price.amount));
        }
        SortKey::Best | SortKey::Stops => {
            offers.sort_by(|a, b| {
                a.stops_max
                    .cmp(&b.stops_max)
                    .then(a.price.amount.total_cmp(&b.price.amount))
            });
        }
    }
}

/// Parses a comma-separated stop-bucket list ("0,1,2"). Values above 2 fold
/// into the 2+ bucket.
pub fn parse_stops_arg(s: &str) -> Result<BTreeSet<u32>, FlightError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map(|n| n.min(2))
                .map_err(|_| FlightError::Validation(format!("invalid stops filter: {part}")))
        })
        .collect()
}

pub fn parse_airlines_arg(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty())
        .collect()
}
