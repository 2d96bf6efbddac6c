use crate::board::{DepartureBoard, ResolvedDeparture};
use crate::error::{Error, Result};
use crate::locale::{Label, Locale};

use chrono::{DateTime, NaiveDateTime};

const RULE: &str = "--------------------";

/// One departure, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureCard {
    pub departure_id: String,
    pub title: String,
    pub departs: String,
    pub arrives: String,
    pub journey_time: String,
    pub price: String,
    pub book: String,
}

impl DepartureCard {
    pub fn new(resolved: &ResolvedDeparture<'_>, locale: &Locale) -> Self {
        let dep = resolved.departure;
        let fmt = locale.short_time_format();
        Self {
            departure_id: dep.id.clone(),
            title: resolved.operator.name.clone(),
            departs: format!(
                "{} {}: {}",
                locale.label(Label::DepartureFrom),
                resolved.origin.name,
                format_time(&dep.departure_time, fmt)
            ),
            arrives: format!(
                "{} {}: {}",
                locale.label(Label::ArriveAt),
                resolved.destination.name,
                format_time(&dep.arrival_time, fmt)
            ),
            journey_time: format!(
                "{}: {}h {}m",
                locale.label(Label::JourneyTime),
                dep.duration.div_euclid(60),
                dep.duration.rem_euclid(60)
            ),
            price: format!(
                "{}: {} {}",
                locale.label(Label::Price),
                format_price(dep.prices.total),
                dep.prices.currency
            ),
            book: format!("{}: {}", locale.label(Label::BookNow), dep.links.deeplink),
        }
    }
}

pub fn cards(board: &DepartureBoard, locale: &Locale) -> Result<Vec<DepartureCard>> {
    Ok(board
        .resolved()?
        .iter()
        .map(|r| DepartureCard::new(r, locale))
        .collect())
}

/// Renders the whole view: header with the busy indicator, one card per
/// departure, then the failure line if the search stopped early.
pub fn render_board(
    board: &DepartureBoard,
    locale: &Locale,
    failure: Option<&Error>,
) -> Result<String> {
    let cards = cards(board, locale)?;
    let mut lines = vec![format!("Busbud x Osheaga    [en | fr] {}", locale.current())];

    if !board.is_complete() && failure.is_none() {
        lines.push(locale.label(Label::Loading));
    }
    if cards.is_empty() {
        lines.push(locale.label(Label::NoDepartures));
    }
    for card in cards {
        lines.push(RULE.to_string());
        lines.extend([
            card.title,
            card.departs,
            card.arrives,
            card.journey_time,
            card.price,
            card.book,
        ]);
    }
    lines.push(RULE.to_string());

    if let Some(e) = failure {
        lines.push(format!("{}: {}", locale.label(Label::SearchFailed), e));
    }
    lines.push(locale.label(Label::Footer));

    Ok(lines.join("\n"))
}

/// Formats a server timestamp in its own offset. Values that are not
/// ISO 8601 come back verbatim.
pub fn format_time(raw: &str, fmt: &str) -> String {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return t.format(fmt).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        Ok(t) => t.format(fmt).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Minor units to a dollar amount, e.g. `123456` -> `$1,234.56`.
pub fn format_price(total: i64) -> String {
    let sign = if total < 0 { "-" } else { "" };
    let cents = total.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
