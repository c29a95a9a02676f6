use std::fmt;

#[derive(Debug)]
pub enum FlightError {
    Timeout,
    ConnectionFailed(String),
    DnsResolution(String),
    ProxyError(String),
    RateLimited,
    InvalidCredentials(u16),
    HttpStatus(u16),
    TlsError(String),
    MissingCredential(String),
    JsonParse(String),
    InvalidAirport(String),
    InvalidDate(String),
    Validation(String),
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(
                f,
                "request timed out — Amadeus may be slow or unreachable. \
                 Try increasing --timeout or check your connection"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "connection failed — check your internet connection ({detail})"
            ),
            Self::DnsResolution(host) => write!(
                f,
                "DNS resolution failed for {host} — check your internet connection"
            ),
            Self::ProxyError(detail) => write!(
                f,
                "proxy error — check your --proxy URL is correct ({detail})"
            ),
            Self::RateLimited => write!(
                f,
                "rate limited by Amadeus (HTTP 429) — wait a few minutes before retrying. \
                 The test environment has a low request quota"
            ),
            Self::InvalidCredentials(status) => write!(
                f,
                "credentials rejected by Amadeus (HTTP {status}) — check \
                 AMADEUS_CLIENT_ID and AMADEUS_CLIENT_SECRET, and that they match \
                 the host you are calling (test vs production)"
            ),
            Self::HttpStatus(status) => write!(
                f,
                "unexpected HTTP status {status} from Amadeus"
            ),
            Self::TlsError(detail) => write!(
                f,
                "TLS/SSL error — connection to Amadeus failed ({detail})"
            ),
            Self::MissingCredential(name) => write!(
                f,
                "missing required environment variable {name} — create an app at \
                 developers.amadeus.com and export its API key and secret"
            ),
            Self::JsonParse(detail) => write!(
                f,
                "failed to parse Amadeus response body as JSON — {detail}"
            ),
            Self::InvalidAirport(code) => write!(
                f,
                "invalid airport code \"{code}\" — must be exactly 3 letters (e.g. JFK, HEL, NRT)"
            ),
            Self::InvalidDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be YYYY-MM-DD format (e.g. 2026-03-01)"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FlightError {}

pub fn from_http_error(err: wreq::Error) -> FlightError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return FlightError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return FlightError::DnsResolution(msg);
        }
        return FlightError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return FlightError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return FlightError::TlsError(msg);
    }

    if lower.contains("builder error") && lower.contains("uri") {
        return FlightError::ProxyError(msg);
    }

    FlightError::ConnectionFailed(msg)
}
