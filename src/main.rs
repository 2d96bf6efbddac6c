pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod locale;
pub mod poll;
pub mod render;
pub mod session;
pub mod structs;

use api::HttpDeparturesApi;
use config::Args;
use locale::Locale;
use poll::SearchTask;
use session::Session;

use clap::Parser;
use std::{error::Error, sync::Arc};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();
    log::info!(
        "Starting departures board {} -> {} on {} ...",
        args.origin,
        args.destination,
        args.date
    );

    let locale = Locale::new(locale::from_env(args.locale.clone()));
    log::debug!("Display locale: {}", locale.current());
    let session = Session::new(locale);

    let api = Arc::new(HttpDeparturesApi::new(args.api_url.clone()));
    let (task, updates) = SearchTask::spawn(api, args.query(), args.cadence());

    let stdin = BufReader::new(tokio::io::stdin());
    let session = session::run_view(session, updates, stdin, show).await;

    task.cancel();
    match session.into_failure() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn show(session: &Session) {
    match session.render() {
        Ok(view) => println!("\n{}", view),
        Err(e) => log::error!("Cannot render departures: {}", e),
    }
}
