//! Точка входа `dish-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI и проверка адреса под выбранный транспорт
//! - открытие локального зеркала меню (SQLite)
//! - проба сервера и загрузка меню с ценами
//! - ввод строки заказа до первой корректной и одна отправка

mod cli;
mod client;
mod config;
mod console;
mod pipeline;
mod store;
#[cfg(test)]
mod test_support;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::client::{CatalogClient, Transport};
use crate::pipeline::{Session, SessionOutcome};
use crate::store::StoreLocation;

fn main() -> anyhow::Result<ExitCode> {
    // Логи через RUST_LOG, по умолчанию info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    if let Err(e) = args.validate() {
        // как у clap: некорректная конфигурация => 2
        eprintln!("error: {e:#}");
        return Ok(ExitCode::from(2));
    }

    info!(
        "Starting dish-client: transport={:?}, server={}, database={}, user={}",
        args.transport,
        args.server(),
        args.database.display(),
        args.username
    );

    // Клиент и хранилище создаются один раз и передаются в сессию ссылками
    let client = Transport::from_args(&args)?;
    let outcome = pipeline::open_store(&StoreLocation::File(args.database.clone())).and_then(
        |store| Session::new(&client, &store, io::stdin().lock(), io::stdout().lock()).run(),
    );

    match outcome {
        Ok(SessionOutcome::Submitted) => {
            info!("session finished: order accepted");
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionOutcome::NotAccepted) => {
            info!("session finished: order not accepted");
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionOutcome::SubmitFailed(e)) => {
            // сбой отправки уже показан оператору; сессия завершена штатно
            info!("session finished: submission failed ({e})");
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionOutcome::InputClosed) => {
            info!("session finished without an order");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("session aborted: {e}");
            eprintln!("{}", console::fatal_message(&e, client.endpoint()));
            Ok(ExitCode::FAILURE)
        }
    }
}
