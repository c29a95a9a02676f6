use crate::error::FlightError;

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub adults: u32,
    pub currency_code: String,
    pub max_results: u32,
}

fn validate_airport(code: &str) -> Result<(), FlightError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(FlightError::InvalidAirport(code.to_string()));
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year.is_multiple_of(4) && !year.is_multiple_of(100)) || year.is_multiple_of(400) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn validate_date(date: &str) -> Result<(), FlightError> {
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return Err(FlightError::InvalidDate(date.to_string()));
    }
    let year: u32 = parts[0]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| FlightError::InvalidDate(date.to_string()))?;

    if year < 2000 || !(1..=12).contains(&month) {
        return Err(FlightError::InvalidDate(date.to_string()));
    }

    if day < 1 || day > days_in_month(year, month) {
        return Err(FlightError::InvalidDate(date.to_string()));
    }

    Ok(())
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), FlightError> {
        validate_airport(&self.origin)?;
        validate_airport(&self.destination)?;
        validate_date(&self.departure_date)?;
        validate_date(&self.return_date)?;

        // Dates are YYYY-MM-DD, so lexicographic order is calendar order.
        if self.return_date < self.departure_date {
            return Err(FlightError::Validation(format!(
                "return date {} is before departure date {}",
                self.return_date, self.departure_date
            )));
        }

        if !(1..=9).contains(&self.adults) {
            return Err(FlightError::Validation(format!(
                "adults ({}) must be between 1 and 9",
                self.adults
            )));
        }

        if !(1..=250).contains(&self.max_results) {
            return Err(FlightError::Validation(format!(
                "max results ({}) must be between 1 and 250",
                self.max_results
            )));
        }

        Ok(())
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        vec![
            ("originLocationCode".to_string(), self.origin.clone()),
            ("destinationLocationCode".to_string(), self.destination.clone()),
            ("departureDate".to_string(), self.departure_date.clone()),
            ("returnDate".to_string(), self.return_date.clone()),
            ("adults".to_string(), self.adults.to_string()),
            ("currencyCode".to_string(), self.currency_code.clone()),
            ("max".to_string(), self.max_results.to_string()),
        ]
    }
}
