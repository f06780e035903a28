use chrono::{Duration, NaiveDate};

/// Parses a user-supplied date string against `reference` (normally today).
///
/// Accepts the keywords `today`, `yesterday` and `tomorrow` (any case), ISO
/// `%Y-%m-%d`, and European `%d/%m/%Y`. Returns `None` for anything else.
pub fn parse_date(input: &str, reference: NaiveDate) -> Option<NaiveDate> {
    match input.trim().to_ascii_lowercase().as_str() {
        "today" => return Some(reference),
        "yesterday" => return Some(reference - Duration::days(1)),
        "tomorrow" => return Some(reference + Duration::days(1)),
        _ => {}
    }
    let trimmed = input.trim();
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}
