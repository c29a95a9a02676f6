use std::collections::BTreeSet;

use serde_json::Value;
use uuid::Uuid;

use crate::model::*;

fn field<'a>(val: &'a Value, key: &str) -> Option<&'a Value> {
    val.as_object().and_then(|map| map.get(key))
}

fn field_str(val: &Value, key: &str) -> Option<String> {
    field(val, key).and_then(|v| v.as_str()).map(String::from)
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.filter(|s| !s.is_empty())
}

fn parse_amount(val: &Value) -> Option<f64> {
    let amount = match val {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn local_hour_from_iso_like(at: &str) -> Option<u32> {
    if at.len() < 13 {
        return None;
    }
    at.get(11..13)?.parse::<u32>().ok()
}

fn has_raw_segments(itinerary: &Value) -> bool {
    field(itinerary, "segments")
        .and_then(Value::as_array)
        .is_some_and(|segments| !segments.is_empty())
}

fn parse_segment(raw: &Value, offer_id: &str, direction: char, index: usize) -> Option<Segment> {
    let departure = field(raw, "departure");
    let arrival = field(raw, "arrival");

    let from = non_empty(departure.and_then(|d| field_str(d, "iataCode")))?;
    let depart_at = non_empty(departure.and_then(|d| field_str(d, "at")))?;
    let to = non_empty(arrival.and_then(|a| field_str(a, "iataCode")))?;
    let arrive_at = non_empty(arrival.and_then(|a| field_str(a, "at")))?;
    let carrier_code = non_empty(field_str(raw, "carrierCode"))?;

    Some(Segment {
        id: non_empty(field_str(raw, "id"))
            .unwrap_or_else(|| format!("{offer_id}-{direction}-{index}")),
        from,
        to,
        depart_at,
        arrive_at,
        carrier_code,
        flight_number: field_str(raw, "number"),
        duration: field_str(raw, "duration"),
    })
}

fn parse_itinerary(raw: &Value, offer_id: &str, direction: char, suffix: &str) -> Option<Itinerary> {
    let segments: Vec<Segment> = field(raw, "segments")
        .and_then(Value::as_array)?
        .iter()
        .enumerate()
        .filter_map(|(index, seg)| parse_segment(seg, offer_id, direction, index))
        .collect();

    if segments.is_empty() {
        return None;
    }

    Some(Itinerary {
        id: format!("{offer_id}-{suffix}"),
        duration: field_str(raw, "duration"),
        stops: (segments.len() - 1) as u32,
        depart_local_hour: local_hour_from_iso_like(&segments[0].depart_at),
        segments,
    })
}

fn parse_validating_codes(raw: &Value) -> Vec<String> {
    field(raw, "validatingAirlineCodes")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Converts a raw flight-offers search response into canonical offers plus
/// the display currency (the first parsed offer's; mixed-currency batches
/// are accepted as-is, each offer keeps its own code). Records missing a
/// parseable price, a currency, or a valid segment in both directions are
/// dropped silently; a missing or non-array `data` key yields an empty
/// result, never an error.
pub fn normalize_flight_offers(payload: &Value) -> SearchResult {
    let Some(data) = field(payload, "data").and_then(Value::as_array) else {
        return SearchResult::default();
    };

    let mut offers = Vec::new();
    let mut currency: Option<String> = None;

    for raw in data {
        let id = non_empty(field_str(raw, "id")).unwrap_or_else(|| Uuid::new_v4().to_string());

        let price = field(raw, "price");
        let amount = price.and_then(|p| field(p, "grandTotal")).and_then(parse_amount);
        let offer_currency =
            non_empty(price.and_then(|p| field_str(p, "currency")).map(|c| c.to_uppercase()));

        let itineraries = field(raw, "itineraries").and_then(Value::as_array);
        let raw_outbound = itineraries
            .and_then(|list| list.first())
            .filter(|v| has_raw_segments(v));
        let raw_inbound = itineraries
            .and_then(|list| list.get(1))
            .filter(|v| has_raw_segments(v));

        let (Some(raw_outbound), Some(raw_inbound)) = (raw_outbound, raw_inbound) else {
            continue;
        };
        let (Some(amount), Some(offer_currency)) = (amount, offer_currency) else {
            continue;
        };

        // Settled before segment validation: a record dropped below for bad
        // segments can still name the display currency.
        if currency.is_none() {
            currency = Some(offer_currency.clone());
        }

        let outbound = parse_itinerary(raw_outbound, &id, 'o', "out");
        let inbound = parse_itinerary(raw_inbound, &id, 'i', "in");
        let (Some(outbound), Some(inbound)) = (outbound, inbound) else {
            continue;
        };

        let airlines: Vec<String> = outbound
            .segments
            .iter()
            .chain(inbound.segments.iter())
            .map(|s| s.carrier_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let stops_max = outbound.stops.max(inbound.stops);

        offers.push(Offer {
            id,
            price: Money {
                amount,
                currency: offer_currency,
            },
            validating_airline_codes: parse_validating_codes(raw),
            airlines,
            outbound,
            inbound,
            stops_max,
        });
    }

    SearchResult { offers, currency }
}

pub fn normalize_locations(payload: &Value) -> Vec<LocationSuggestion> {
    let Some(data) = field(payload, "data").and_then(Value::as_array) else {
        return Vec::new();
    };

    data.iter()
        .filter_map(|raw| {
            let address = field(raw, "address");
            Some(LocationSuggestion {
                iata_code: non_empty(field_str(raw, "iataCode"))?,
                name: non_empty(field_str(raw, "name"))?,
                sub_type: field_str(raw, "subType"),
                city_name: address.and_then(|a| field_str(a, "cityName")),
                country_code: address.and_then(|a| field_str(a, "countryCode")),
            })
        })
        .collect()
}
