use crate::poll::Cadence;
use crate::structs::SearchQuery;

use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_ORIGIN: &str = "dr5reg";
pub const DEFAULT_DESTINATION: &str = "f25dvk";
pub const DEFAULT_DATE: &str = "2018-08-02";
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 750;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Bus departures for Osheaga, fetched from a departures search backend.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// Base URL of the departures backend
    #[arg(long, env = "DEPARTURES_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Origin geohash
    #[arg(long, env = "DEPARTURES_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Destination geohash
    #[arg(long, env = "DEPARTURES_DESTINATION", default_value = DEFAULT_DESTINATION)]
    pub destination: String,

    /// Travel date, YYYY-MM-DD
    #[arg(long, env = "DEPARTURES_DATE", default_value = DEFAULT_DATE)]
    pub date: NaiveDate,

    /// Display locale, e.g. en-CA or fr-CA. Falls back to LC_ALL, LC_MESSAGES, LANG
    #[arg(long)]
    pub locale: Option<String>,

    /// Milliseconds to wait before the first poll
    #[arg(long, env = "DEPARTURES_INITIAL_DELAY_MS", default_value_t = DEFAULT_INITIAL_DELAY_MS)]
    pub initial_delay_ms: u64,

    /// Milliseconds to wait between polls
    #[arg(long, env = "DEPARTURES_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// Stop after this many polls if results are still incomplete
    #[arg(long, env = "DEPARTURES_MAX_POLLS")]
    pub max_polls: Option<u32>,
}

impl Args {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.origin.clone(), self.destination.clone(), self.date)
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_polls: self.max_polls,
        }
    }
}
