use farelens::normalize::{normalize_flight_offers, normalize_locations};
use serde_json::{json, Value};

fn make_segment(from: &str, to: &str, depart_at: &str, arrive_at: &str, carrier: &str) -> Value {
    json!({
        "departure": { "iataCode": from, "at": depart_at },
        "arrival": { "iataCode": to, "at": arrive_at },
        "carrierCode": carrier,
        "number": "123",
        "duration": "PT4H20M",
    })
}

fn make_offer(id: &str, grand_total: Value, currency: &str) -> Value {
    json!({
        "id": id,
        "price": { "currency": currency, "grandTotal": grand_total },
        "validatingAirlineCodes": ["AA"],
        "itineraries": [
            {
                "duration": "PT5H10M",
                "segments": [make_segment(
                    "JFK", "DFW", "2026-03-01T08:20:00-05:00", "2026-03-01T11:40:00-06:00", "AA",
                )],
            },
            {
                "duration": "PT5H0M",
                "segments": [make_segment(
                    "DFW", "JFK", "2026-03-08T16:10:00-06:00", "2026-03-08T20:10:00-05:00", "AA",
                )],
            },
        ],
    })
}

#[test]
fn normalizes_complete_offer() {
    let payload = json!({ "data": [make_offer("1", json!("420.50"), "USD")] });

    let result = normalize_flight_offers(&payload);
    assert_eq!(result.currency.as_deref(), Some("USD"));
    assert_eq!(result.offers.len(), 1);

    let offer = &result.offers[0];
    assert_eq!(offer.id, "1");
    assert_eq!(offer.price.amount, 420.5);
    assert_eq!(offer.price.currency, "USD");
    assert_eq!(offer.stops_max, 0);
    assert_eq!(offer.outbound.stops, 0);
    assert_eq!(offer.inbound.stops, 0);
    assert_eq!(offer.outbound.depart_local_hour, Some(8));
    assert_eq!(offer.inbound.depart_local_hour, Some(16));
    assert_eq!(offer.airlines, vec!["AA"]);
    assert_eq!(offer.validating_airline_codes, vec!["AA"]);
    assert_eq!(offer.outbound.id, "1-out");
    assert_eq!(offer.inbound.id, "1-in");
    assert_eq!(offer.outbound.segments[0].from, "JFK");
    assert_eq!(offer.outbound.segments[0].to, "DFW");
    assert_eq!(offer.outbound.duration.as_deref(), Some("PT5H10M"));
}

#[test]
fn missing_data_key_yields_empty() {
    let result = normalize_flight_offers(&json!({}));
    assert!(result.offers.is_empty());
    assert!(result.currency.is_none());
}

#[test]
fn non_array_data_yields_empty() {
    let result = normalize_flight_offers(&json!({ "data": "nope" }));
    assert!(result.offers.is_empty());
    assert!(result.currency.is_none());
}

#[test]
fn non_object_payload_yields_empty() {
    let result = normalize_flight_offers(&json!([1, 2, 3]));
    assert!(result.offers.is_empty());
}

#[test]
fn numeric_grand_total_accepted() {
    let payload = json!({ "data": [make_offer("1", json!(299.99), "EUR")] });
    let result = normalize_flight_offers(&payload);
    assert_eq!(result.offers.len(), 1);
    assert_eq!(result.offers[0].price.amount, 299.99);
}

#[test]
fn lowercase_currency_uppercased() {
    let payload = json!({ "data": [make_offer("1", json!("100"), "usd")] });
    let result = normalize_flight_offers(&payload);
    assert_eq!(result.currency.as_deref(), Some("USD"));
    assert_eq!(result.offers[0].price.currency, "USD");
}

#[test]
fn unparseable_price_skips_record() {
    let payload = json!({ "data": [make_offer("1", json!("abc"), "USD")] });
    let result = normalize_flight_offers(&payload);
    assert!(result.offers.is_empty());
    assert!(result.currency.is_none());
}

#[test]
fn empty_string_price_skips_record() {
    let payload = json!({ "data": [make_offer("1", json!(""), "USD")] });
    let result = normalize_flight_offers(&payload);
    assert!(result.offers.is_empty());
}

#[test]
fn negative_price_skips_record() {
    let payload = json!({ "data": [make_offer("1", json!("-10.00"), "USD")] });
    let result = normalize_flight_offers(&payload);
    assert!(result.offers.is_empty());
}

#[test]
fn missing_currency_skips_record() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["price"]
        .as_object_mut()
        .unwrap()
        .remove("currency");
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert!(result.offers.is_empty());
}

#[test]
fn one_way_record_skipped() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"].as_array_mut().unwrap().truncate(1);
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert!(result.offers.is_empty());
}

#[test]
fn empty_segment_list_skips_record() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"][1]["segments"] = json!([]);
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert!(result.offers.is_empty());
}

#[test]
fn invalid_segment_dropped_from_itinerary() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    let mut bad = make_segment("JFK", "ORD", "2026-03-01T06:00:00-05:00", "2026-03-01T08:00:00-06:00", "AA");
    bad.as_object_mut().unwrap().remove("carrierCode");
    offer["itineraries"][0]["segments"]
        .as_array_mut()
        .unwrap()
        .insert(0, bad);

    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert_eq!(result.offers.len(), 1);

    let outbound = &result.offers[0].outbound;
    assert_eq!(outbound.segments.len(), 1);
    assert_eq!(outbound.stops, 0);
    // Hour comes from the first surviving segment.
    assert_eq!(outbound.depart_local_hour, Some(8));
}

#[test]
fn all_segments_invalid_skips_record_but_currency_sticks() {
    // The display currency is adopted after the price parses, before segment
    // validation, so a record dropped for bad segments can still name it.
    let mut broken = make_offer("1", json!("100.00"), "USD");
    broken["itineraries"][0]["segments"][0]
        .as_object_mut()
        .unwrap()
        .remove("carrierCode");
    let healthy = make_offer("2", json!("200.00"), "EUR");

    let result = normalize_flight_offers(&json!({ "data": [broken, healthy] }));
    assert_eq!(result.offers.len(), 1);
    assert_eq!(result.offers[0].id, "2");
    assert_eq!(result.currency.as_deref(), Some("USD"));
    assert_eq!(result.offers[0].price.currency, "EUR");
}

#[test]
fn first_offer_currency_wins_in_mixed_batch() {
    let payload = json!({
        "data": [
            make_offer("1", json!("100.00"), "USD"),
            make_offer("2", json!("90.00"), "EUR"),
        ]
    });

    let result = normalize_flight_offers(&payload);
    assert_eq!(result.offers.len(), 2);
    assert_eq!(result.currency.as_deref(), Some("USD"));
    assert_eq!(result.offers[1].price.currency, "EUR");
}

#[test]
fn record_order_preserved() {
    let payload = json!({
        "data": [
            make_offer("a", json!("300.00"), "USD"),
            make_offer("b", json!("100.00"), "USD"),
            make_offer("c", json!("200.00"), "USD"),
        ]
    });

    let result = normalize_flight_offers(&payload);
    let ids: Vec<&str> = result.offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn missing_offer_id_gets_generated_one() {
    let mut offer = make_offer("", json!("100.00"), "USD");
    offer.as_object_mut().unwrap().remove("id");
    let mut other = make_offer("", json!("100.00"), "USD");
    other.as_object_mut().unwrap().remove("id");

    let result = normalize_flight_offers(&json!({ "data": [offer, other] }));
    assert_eq!(result.offers.len(), 2);
    assert!(!result.offers[0].id.is_empty());
    assert!(!result.offers[1].id.is_empty());
    assert_ne!(result.offers[0].id, result.offers[1].id);
}

#[test]
fn empty_offer_id_gets_generated_one() {
    let result = normalize_flight_offers(&json!({ "data": [make_offer("", json!("1"), "USD")] }));
    assert!(!result.offers[0].id.is_empty());
}

#[test]
fn missing_segment_id_gets_positional_fallback() {
    let result =
        normalize_flight_offers(&json!({ "data": [make_offer("42", json!("100.00"), "USD")] }));
    let offer = &result.offers[0];
    assert_eq!(offer.outbound.segments[0].id, "42-o-0");
    assert_eq!(offer.inbound.segments[0].id, "42-i-0");
}

#[test]
fn provider_segment_id_kept() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"][0]["segments"][0]["id"] = json!("seg-77");
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert_eq!(result.offers[0].outbound.segments[0].id, "seg-77");
}

#[test]
fn airlines_union_sorted_and_deduped() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"][0]["segments"] = json!([
        make_segment("JFK", "ORD", "2026-03-01T08:20:00-05:00", "2026-03-01T10:00:00-06:00", "DL"),
        make_segment("ORD", "DFW", "2026-03-01T12:00:00-06:00", "2026-03-01T14:00:00-06:00", "AA"),
    ]);
    offer["itineraries"][1]["segments"] = json!([
        make_segment("DFW", "ATL", "2026-03-08T09:00:00-06:00", "2026-03-08T12:00:00-05:00", "DL"),
        make_segment("ATL", "JFK", "2026-03-08T14:00:00-05:00", "2026-03-08T16:00:00-05:00", "B6"),
    ]);

    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    let parsed = &result.offers[0];
    assert_eq!(parsed.airlines, vec!["AA", "B6", "DL"]);
    assert_eq!(parsed.outbound.stops, 1);
    assert_eq!(parsed.inbound.stops, 1);
    assert_eq!(parsed.stops_max, 1);
}

#[test]
fn multi_segment_stops_counted() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"][0]["segments"] = json!([
        make_segment("JFK", "ORD", "2026-03-01T08:20:00-05:00", "2026-03-01T10:00:00-06:00", "AA"),
        make_segment("ORD", "DEN", "2026-03-01T12:00:00-06:00", "2026-03-01T13:30:00-07:00", "AA"),
        make_segment("DEN", "LAX", "2026-03-01T15:00:00-07:00", "2026-03-01T16:30:00-08:00", "AA"),
    ]);

    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    let parsed = &result.offers[0];
    assert_eq!(parsed.outbound.stops, 2);
    assert_eq!(parsed.stops_max, 2);
}

#[test]
fn short_timestamp_gives_no_depart_hour() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["itineraries"][0]["segments"][0]["departure"]["at"] = json!("2026-03-01");
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert_eq!(result.offers[0].outbound.depart_local_hour, None);
}

#[test]
fn non_numeric_hour_gives_no_depart_hour() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    // Unpadded hour: positions 11-12 read "8:" which is not a number.
    offer["itineraries"][0]["segments"][0]["departure"]["at"] = json!("2026-03-01T8:20:00-05:00");
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert_eq!(result.offers[0].outbound.depart_local_hour, None);
}

#[test]
fn validating_codes_drop_blank_entries() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer["validatingAirlineCodes"] = json!(["", "AA", "DL"]);
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert_eq!(result.offers[0].validating_airline_codes, vec!["AA", "DL"]);
}

#[test]
fn missing_validating_codes_default_empty() {
    let mut offer = make_offer("1", json!("100.00"), "USD");
    offer.as_object_mut().unwrap().remove("validatingAirlineCodes");
    let result = normalize_flight_offers(&json!({ "data": [offer] }));
    assert!(result.offers[0].validating_airline_codes.is_empty());
}

#[test]
fn locations_normalized() {
    let payload = json!({
        "data": [
            {
                "iataCode": "HEL",
                "name": "HELSINKI VANTAA",
                "subType": "AIRPORT",
                "address": { "cityName": "HELSINKI", "countryCode": "FI" },
            },
            { "name": "missing code" },
            { "iataCode": "XXX" },
        ]
    });

    let locations = normalize_locations(&payload);
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].iata_code, "HEL");
    assert_eq!(locations[0].city_name.as_deref(), Some("HELSINKI"));
    assert_eq!(locations[0].country_code.as_deref(), Some("FI"));
    assert_eq!(locations[0].sub_type.as_deref(), Some("AIRPORT"));
}

#[test]
fn locations_missing_data_yields_empty() {
    assert!(normalize_locations(&json!({})).is_empty());
    assert!(normalize_locations(&json!({ "data": 7 })).is_empty());
}
