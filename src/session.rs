use crate::board::DepartureBoard;
use crate::error::{Error, Result};
use crate::locale::{self, Locale};
use crate::poll::{PollStep, Update};
use crate::render;

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc::UnboundedReceiver,
};

/// What the view shows: the latest board, the active locale, and the error
/// that stopped the search, if any.
#[derive(Debug, Default)]
pub struct Session {
    board: DepartureBoard,
    locale: Locale,
    failure: Option<Error>,
}

impl Session {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, update: Update) {
        self.board = update.board;
        if let PollStep::Failed(e) = update.step {
            self.failure = Some(e);
        }
    }

    pub fn set_locale(&mut self, id: impl Into<String>) {
        self.locale.set(id);
    }

    pub fn board(&self) -> &DepartureBoard {
        &self.board
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    pub fn into_failure(self) -> Option<Error> {
        self.failure
    }

    pub fn render(&self) -> Result<String> {
        render::render_board(&self.board, &self.locale, self.failure.as_ref())
    }
}

/// Drives the view until the user quits or both inputs are exhausted.
///
/// Board updates and locale switches from `input` are applied as they come,
/// and `show` is called after each one. Once the search is over the view
/// stays up, so locales can still be switched; `q` or end of input closes it.
pub async fn run_view<R, F>(
    mut session: Session,
    mut updates: UnboundedReceiver<Update>,
    input: R,
    mut show: F,
) -> Session
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&Session),
{
    let mut lines = input.lines();
    let mut updates_open = true;
    let mut input_open = true;

    while updates_open || input_open {
        tokio::select! {
            update = updates.recv(), if updates_open => match update {
                Some(update) => {
                    session.apply(update);
                    show(&session);
                }
                None => {
                    log::debug!("Search task finished");
                    updates_open = false;
                }
            },
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) if line.trim() == "q" => break,
                Ok(Some(line)) => {
                    if let Some(id) = locale::selection(&line) {
                        log::info!("Switching locale to {}", id);
                        session.set_locale(id);
                        show(&session);
                    }
                }
                Ok(None) => input_open = false,
                Err(e) => {
                    log::warn!("Stopped reading locale switches: {}", e);
                    input_open = false;
                }
            },
        }
    }

    session
}
