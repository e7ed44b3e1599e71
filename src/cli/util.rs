use chrono::NaiveDate;

use crate::budget::Money;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Amount typed by the user. Comma works as decimal separator; anything
/// unparsable becomes zero.
pub fn parse_amount(s: &str) -> Money {
    Money::parse_lenient(&s.replace(',', "."))
}

/// Most whole-number digits an entered amount may have, which keeps every
/// sum of amounts far inside `Decimal`'s range.
pub const MAX_WHOLE_DIGITS: usize = 12;

/// Like [`parse_amount`], but `None` when the whole part is too long.
pub fn checked_amount(s: &str) -> Option<Money> {
    let whole = s.split(['.', ',']).next().unwrap_or_default();
    let digits = whole.trim().trim_start_matches('0').len();
    (digits <= MAX_WHOLE_DIGITS).then(|| parse_amount(s))
}

/// A calendar date typed as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Keys accepted while editing an amount: digits and one separator.
pub fn accepts_amount_char(current: &str, c: char) -> bool {
    c.is_ascii_digit() || ((c == '.' || c == ',') && !current.contains(['.', ',']))
}

pub fn amount_input(m: Money) -> String {
    m.0.normalize().to_string()
}
