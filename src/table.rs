use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::model::{Itinerary, LocationSuggestion, PricePoint, SearchResult};

pub fn format_price(amount: f64, currency: &str) -> String {
    let p = format!("{amount:.2}");
    match currency {
        "USD" => format!("${p}"),
        "EUR" => format!("€{p}"),
        "GBP" => format!("£{p}"),
        "JPY" | "CNY" => format!("¥{p}"),
        "KRW" => format!("₩{p}"),
        "INR" => format!("₹{p}"),
        "THB" => format!("฿{p}"),
        _ => format!("{p} {currency}"),
    }
}

pub fn format_route(itinerary: &Itinerary) -> String {
    let codes: Vec<&str> = std::iter::once(
        itinerary
            .segments
            .first()
            .map(|s| s.from.as_str())
            .unwrap_or("?"),
    )
    .chain(itinerary.segments.iter().map(|s| s.to.as_str()))
    .collect();
    codes.join(" → ")
}

// "2026-03-01T08:20:00-05:00" → "2026-03-01 08:20"
pub fn format_depart(itinerary: &Itinerary) -> String {
    itinerary
        .segments
        .first()
        .and_then(|s| s.depart_at.get(..16))
        .map(|s| s.replace('T', " "))
        .unwrap_or_else(|| "—".to_string())
}

pub fn format_stops(stops: u32) -> String {
    match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

pub fn render(result: &SearchResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Airlines", "Outbound", "Depart", "Inbound", "Return", "Stops", "Price",
        ]);

    for offer in &result.offers {
        let airlines = offer.airlines.join(", ");
        let stops = format!(
            "{} / {}",
            format_stops(offer.outbound.stops),
            format_stops(offer.inbound.stops)
        );
        let price = format_price(offer.price.amount, &offer.price.currency);

        table.add_row(vec![
            &airlines,
            &format_route(&offer.outbound),
            &format_depart(&offer.outbound),
            &format_route(&offer.inbound),
            &format_depart(&offer.inbound),
            &stops,
            &price,
        ]);
    }

    table.to_string()
}

const TREND_BAR_WIDTH: usize = 24;

pub fn render_trend(points: &[PricePoint], currency: &str) -> String {
    let max_price = points
        .iter()
        .filter_map(|p| p.min_price)
        .fold(0.0f64, f64::max);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Hour", "Min price", "Offers", ""]);

    for point in points {
        let hour = format!("{:02}:00", point.hour);
        let (price, bar) = match point.min_price {
            Some(min) => {
                let width = if max_price > 0.0 {
                    ((min / max_price) * TREND_BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                (
                    format_price(min, currency),
                    "▇".repeat(width.max(1)),
                )
            }
            None => ("—".to_string(), String::new()),
        };

        table.add_row(vec![&hour, &price, &point.count.to_string(), &bar]);
    }

    table.to_string()
}

pub fn render_locations(locations: &[LocationSuggestion]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Code", "Name", "City", "Country", "Type"]);

    for location in locations {
        table.add_row(vec![
            location.iata_code.as_str(),
            location.name.as_str(),
            location.city_name.as_deref().unwrap_or("—"),
            location.country_code.as_deref().unwrap_or("—"),
            location.sub_type.as_deref().unwrap_or("—"),
        ]);
    }

    table.to_string()
}
