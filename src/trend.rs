use crate::model::{Offer, PricePoint};

/// Buckets offers by outbound local departure hour: minimum price and offer
/// count per hour. Always exactly 24 points, hours 0..=23 in order, even for
/// empty input. Offers without a usable hour contribute nothing; inbound
/// timing never participates.
pub fn price_points_by_departure_hour(offers: &[Offer]) -> Vec<PricePoint> {
    let mut buckets = [(f64::INFINITY, 0usize); 24];

    for offer in offers {
        let Some(hour) = offer.outbound.depart_local_hour else {
            continue;
        };
        let Some(bucket) = buckets.get_mut(hour as usize) else {
            continue;
        };
        bucket.1 += 1;
        if offer.price.amount < bucket.0 {
            bucket.0 = offer.price.amount;
        }
    }

    buckets
        .iter()
        .enumerate()
        .map(|(hour, &(min, count))| PricePoint {
            hour: hour as u32,
            min_price: (count > 0).then_some(min),
            count,
        })
        .collect()
}
