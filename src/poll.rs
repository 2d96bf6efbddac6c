use crate::api::DeparturesApi;
use crate::board::DepartureBoard;
use crate::config::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_POLL_INTERVAL_MS};
use crate::error::Error;
use crate::structs::SearchQuery;

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

/// When to poll and how many polls to allow before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    /// Wait between the initial response and the first poll.
    pub initial_delay: Duration,
    /// Wait between a poll response and the next poll.
    pub poll_interval: Duration,
    /// `None` polls until the server reports completion.
    pub max_polls: Option<u32>,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_polls: None,
        }
    }
}

#[derive(Debug)]
pub enum PollStep {
    /// A page was merged and more are expected.
    Merged,
    /// A page was merged and the server reported completion.
    Done,
    /// The search stopped on an error; nothing more will be requested.
    Failed(Error),
}

impl PollStep {
    pub fn is_final(&self) -> bool {
        !matches!(self, PollStep::Merged)
    }
}

/// Emitted once per step, with the board as it stands after that step.
#[derive(Debug)]
pub struct Update {
    pub step: PollStep,
    pub board: DepartureBoard,
}

/// Runs the initial search, then polls until the board is complete, the
/// search fails, or nobody is listening anymore.
///
/// Requests are strictly sequential: the next poll is only scheduled once the
/// previous response has been merged.
pub async fn run_search<A>(
    api: &A,
    query: &SearchQuery,
    cadence: &Cadence,
    updates: &UnboundedSender<Update>,
) where
    A: DeparturesApi + ?Sized,
{
    let mut board = DepartureBoard::new();

    match api.search(query).await {
        Ok(page) => board.merge(page),
        Err(e) => {
            log::error!("Initial search failed: {}", e);
            let _ = updates.send(Update {
                step: PollStep::Failed(e),
                board,
            });
            return;
        }
    }
    log::info!(
        "Initial search returned {} departures (complete: {})",
        board.departures().len(),
        board.is_complete()
    );
    if !emit(updates, &board) {
        return;
    }

    let mut delay = cadence.initial_delay;
    let mut polls: u32 = 0;

    while !board.is_complete() {
        if cadence.max_polls.map_or(false, |max| polls >= max) {
            let e = Error::PollLimit(polls);
            log::error!("{}", e);
            let _ = updates.send(Update {
                step: PollStep::Failed(e),
                board,
            });
            return;
        }

        tokio::time::sleep(delay).await;
        polls += 1;

        match api.poll(query).await {
            Ok(page) => {
                log::debug!(
                    "Poll #{} brought {} departures, {} locations, {} operators",
                    polls,
                    page.departures.len(),
                    page.locations.len(),
                    page.operators.len()
                );
                board.merge(page);
            }
            Err(e) => {
                log::error!("Poll #{} failed: {}", polls, e);
                let _ = updates.send(Update {
                    step: PollStep::Failed(e),
                    board,
                });
                return;
            }
        }

        if !emit(updates, &board) {
            return;
        }
        delay = cadence.poll_interval;
    }

    log::info!(
        "Search complete after {} polls, {} departures",
        polls,
        board.departures().len()
    );
}

fn emit(updates: &UnboundedSender<Update>, board: &DepartureBoard) -> bool {
    let step = if board.is_complete() {
        PollStep::Done
    } else {
        PollStep::Merged
    };
    let sent = updates
        .send(Update {
            step,
            board: board.clone(),
        })
        .is_ok();
    if !sent {
        log::debug!("Board listener is gone, stopping search");
    }
    sent
}

/// Handle to a running search. Dropping it aborts the task, so a scheduled
/// poll never fires after the view is torn down.
pub struct SearchTask {
    handle: JoinHandle<()>,
}

impl SearchTask {
    pub fn spawn(
        api: Arc<dyn DeparturesApi>,
        query: SearchQuery,
        cadence: Cadence,
    ) -> (Self, UnboundedReceiver<Update>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            run_search(api.as_ref(), &query, &cadence, &tx).await;
        });
        (Self { handle }, rx)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
