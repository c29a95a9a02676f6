use farelens::query::SearchParams;

fn make_valid_params() -> SearchParams {
    SearchParams {
        origin: "JFK".into(),
        destination: "DFW".into(),
        departure_date: "2026-03-01".into(),
        return_date: "2026-03-08".into(),
        adults: 1,
        currency_code: "USD".into(),
        max_results: 50,
    }
}

#[test]
fn valid_params_pass() {
    assert!(make_valid_params().validate().is_ok());
}

#[test]
fn rejects_lowercase_airport() {
    let mut p = make_valid_params();
    p.origin = "jfk".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_too_short_airport() {
    let mut p = make_valid_params();
    p.origin = "JF".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_too_long_airport() {
    let mut p = make_valid_params();
    p.destination = "DFWX".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_numeric_airport() {
    let mut p = make_valid_params();
    p.destination = "D2W".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_invalid_date_format() {
    let mut p = make_valid_params();
    p.departure_date = "03-01-2026".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_invalid_month() {
    let mut p = make_valid_params();
    p.departure_date = "2026-13-01".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_feb_30() {
    let mut p = make_valid_params();
    p.departure_date = "2026-02-30".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_apr_31() {
    let mut p = make_valid_params();
    p.return_date = "2026-04-31".into();
    assert!(p.validate().is_err());
}

#[test]
fn accepts_feb_28_non_leap() {
    let mut p = make_valid_params();
    p.departure_date = "2025-02-27".into();
    p.return_date = "2025-02-28".into();
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_feb_29_non_leap() {
    let mut p = make_valid_params();
    p.departure_date = "2025-02-29".into();
    assert!(p.validate().is_err());
}

#[test]
fn accepts_feb_29_leap() {
    let mut p = make_valid_params();
    p.departure_date = "2028-02-29".into();
    p.return_date = "2028-03-07".into();
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_return_before_departure() {
    let mut p = make_valid_params();
    p.return_date = "2026-02-20".into();
    assert!(p.validate().is_err());
}

#[test]
fn accepts_same_day_return() {
    let mut p = make_valid_params();
    p.return_date = p.departure_date.clone();
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_zero_adults() {
    let mut p = make_valid_params();
    p.adults = 0;
    assert!(p.validate().is_err());
}

#[test]
fn rejects_ten_adults() {
    let mut p = make_valid_params();
    p.adults = 10;
    assert!(p.validate().is_err());
}

#[test]
fn accepts_nine_adults() {
    let mut p = make_valid_params();
    p.adults = 9;
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_zero_max_results() {
    let mut p = make_valid_params();
    p.max_results = 0;
    assert!(p.validate().is_err());
}

#[test]
fn accepts_max_results_upper_bound() {
    let mut p = make_valid_params();
    p.max_results = 250;
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_max_results_above_bound() {
    let mut p = make_valid_params();
    p.max_results = 251;
    assert!(p.validate().is_err());
}

#[test]
fn query_params_use_provider_names() {
    let params = make_valid_params().to_query_params();
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("originLocationCode"), Some("JFK"));
    assert_eq!(get("destinationLocationCode"), Some("DFW"));
    assert_eq!(get("departureDate"), Some("2026-03-01"));
    assert_eq!(get("returnDate"), Some("2026-03-08"));
    assert_eq!(get("adults"), Some("1"));
    assert_eq!(get("currencyCode"), Some("USD"));
    assert_eq!(get("max"), Some("50"));
}
