use chrono::NaiveDate;

/// Human-readable form of the accepted input date format.
pub const INPUT_PATTERN: &str = "yyyy-MM-dd";
/// Human-readable form of the display date format.
pub const OUTPUT_PATTERN: &str = "MMM dd yyyy";

const INPUT_FORMAT: &str = "%Y-%m-%d";
const OUTPUT_FORMAT: &str = "%b %d %Y";
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a date in the fixed input format.
///
/// Only the zero-padded `yyyy-MM-dd` shape is accepted, so `2025-1-5` is
/// rejected even though chrono alone would take it.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != INPUT_PATTERN.len() {
        return None;
    }
    NaiveDate::parse_from_str(raw, INPUT_FORMAT).ok()
}

/// Renders a date in the input format, as stored in save files.
pub fn format_input(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Renders a date in the display format, e.g. `Aug 30 2025`.
pub fn format_output(date: NaiveDate) -> String {
    date.format(OUTPUT_FORMAT).to_string()
}

/// Renders a raw date string for display, returning it unchanged if it does not parse.
pub fn display_raw(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => format_output(d),
        None => raw.to_string(),
    }
}

/// Whether a task whose relevant date is `relevant` is overdue as of `query`.
///
/// - Completed tasks are never due.
/// - The query date must be strictly after the relevant date; equal dates are not due.
/// - An unparseable query yields `false`.
pub fn is_overdue(relevant: NaiveDate, completed: bool, query: &str) -> bool {
    if completed {
        return false;
    }
    match parse_date(query) {
        Some(q) => q > relevant,
        None => false,
    }
}
