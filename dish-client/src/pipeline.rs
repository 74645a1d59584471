//! Сессия оператора: база -> проба сервера -> меню -> ввод -> одна отправка.
//!
//! Всё строго последовательно. Ошибки на шагах до ввода прерывают сессию
//! ([`SessionError`]); ошибки ввода и неизвестные артикулы - повторный запрос
//! строки; исход отправки сообщается и завершает сессию штатно.

use std::io::{self, BufRead, Write};

use dish_core::order_text::parse_order_line;
use dish_core::validate::validate_order;
use dish_core::{ClientError, Order, ResolvedLine, ValidationError};
use log::{debug, error, info, warn};
use thiserror::Error;

use crate::client::CatalogClient;
use crate::console;
use crate::store::{CatalogStore, StoreError, StoreLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Init,
    StorageReady,
    RemoteReady,
    CatalogLoaded,
    AwaitingInput,
    Submitting,
}

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    /// База не открылась на старте
    #[error("catalog storage unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),

    /// Проба сервера (меню без цен) не прошла
    #[error("remote service check failed: {0}")]
    Probe(#[source] ClientError),

    #[error("menu fetch failed: {0}")]
    Fetch(#[source] ClientError),

    /// Меню получено, но в зеркало не легло
    #[error("catalog mirror refresh failed: {0}")]
    Refresh(#[source] StoreError),

    /// Чтение зеркала после обновления
    #[error("catalog storage read failed: {0}")]
    Storage(#[source] StoreError),

    #[error("console i/o failed: {0}")]
    Console(#[from] io::Error),
}

/// Чем закончилась сессия, дошедшая до ввода.
#[derive(Debug)]
pub(crate) enum SessionOutcome {
    Submitted,
    NotAccepted,
    SubmitFailed(ClientError),
    /// Ввод закрыт до первой корректной строки
    InputClosed,
}

/// Открывает зеркало меню; первый шаг сессии, до любых обращений к сети.
pub(crate) fn open_store(location: &StoreLocation) -> Result<CatalogStore, SessionError> {
    let store = CatalogStore::open(location).map_err(SessionError::StorageUnavailable)?;
    info!("catalog storage initialized at {location}");
    Ok(store)
}

pub(crate) struct Session<'a, C, R, W> {
    client: &'a C,
    store: &'a CatalogStore,
    input: R,
    out: W,
    stage: Stage,
}

impl<'a, C, R, W> Session<'a, C, R, W>
where
    C: CatalogClient,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(client: &'a C, store: &'a CatalogStore, input: R, out: W) -> Self {
        Self {
            client,
            store,
            input,
            out,
            stage: Stage::Init,
        }
    }

    fn advance(&mut self, next: Stage) {
        debug!("session stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    /// Хранилище уже открыто ([`open_store`]), поэтому сессия начинает с пробы сервера.
    pub(crate) fn run(mut self) -> Result<SessionOutcome, SessionError> {
        let store = self.store;
        self.advance(Stage::StorageReady);

        self.client
            .fetch_catalog(false)
            .map_err(SessionError::Probe)?;
        info!("remote service reachable at {}", self.client.endpoint());
        self.advance(Stage::RemoteReady);

        let menu = self
            .client
            .fetch_catalog(true)
            .map_err(SessionError::Fetch)?;
        info!("received {} dishes", menu.len());
        self.advance(Stage::CatalogLoaded);

        store.refresh(&menu).map_err(SessionError::Refresh)?;
        let records = store.all().map_err(SessionError::Storage)?;
        console::print_catalog(&mut self.out, &records)?;
        self.advance(Stage::AwaitingInput);

        let Some(lines) = self.read_valid_order(store)? else {
            info!("input closed before an order was entered");
            return Ok(SessionOutcome::InputClosed);
        };

        self.advance(Stage::Submitting);
        Ok(self.submit(&lines)?)
    }

    /// Крутится, пока не получит строку, прошедшую разбор и сверку.
    fn read_valid_order(
        &mut self,
        store: &CatalogStore,
    ) -> Result<Option<Vec<ResolvedLine>>, SessionError> {
        loop {
            console::prompt(&mut self.out)?;
            let Some(line) = console::read_line(&mut self.input)? else {
                return Ok(None);
            };

            let items = match parse_order_line(&line) {
                Ok(items) => items,
                Err(e) => {
                    writeln!(self.out, "{}", console::order_text_error(&e))?;
                    continue;
                }
            };

            match validate_order(&items, store) {
                Ok(resolved) => return Ok(Some(resolved)),
                Err(ValidationError::UnknownArticles(articles)) => {
                    writeln!(self.out, "{}", console::unknown_articles(&articles))?;
                }
                Err(ValidationError::Lookup(e)) => return Err(SessionError::Storage(e)),
            }
        }
    }

    fn submit(&mut self, lines: &[ResolvedLine]) -> io::Result<SessionOutcome> {
        let order = Order::from_resolved(lines);
        info!(
            "sending order {} ({} items) to {}",
            order.order_id,
            order.menu_items.len(),
            self.client.endpoint()
        );

        let outcome = match self.client.submit_order(&order) {
            Ok(true) => {
                info!("order {} accepted", order.order_id);
                writeln!(self.out, "{}", console::SUCCESS)?;
                SessionOutcome::Submitted
            }
            Ok(false) => {
                warn!("order {} not accepted", order.order_id);
                writeln!(self.out, "{}", console::not_accepted())?;
                SessionOutcome::NotAccepted
            }
            Err(e) => {
                error!("order {} submission failed: {e}", order.order_id);
                writeln!(self.out, "{}", console::submit_failed(&e))?;
                SessionOutcome::SubmitFailed(e)
            }
        };

        Ok(outcome)
    }
}
