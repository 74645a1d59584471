//! Тексты для оператора. Логи пишутся отдельно через `log`.

use std::io::{self, BufRead, Write};

use dish_core::order_text::EXAMPLE_LINE;
use dish_core::{CatalogRecord, ClientError, OrderTextError};

use crate::pipeline::SessionError;

pub(crate) const SUCCESS: &str = "УСПЕХ";

pub(crate) fn print_catalog<W: Write>(out: &mut W, records: &[CatalogRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "Меню пусто.")?;
    }
    for r in records {
        writeln!(out, "{r}")?;
    }
    writeln!(out, "Введите список блюд (пример: {EXAMPLE_LINE})")
}

pub(crate) fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Одна строка ввода без перевода строки; `None` - ввод закрыт
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

pub(crate) fn order_text_error(e: &OrderTextError) -> String {
    match e {
        OrderTextError::EmptyInput => {
            format!("Некорректный формат. Пример корректного ввода: {EXAMPLE_LINE}")
        }
        OrderTextError::MalformedPair { segment } => {
            format!("Ошибка в паре '{segment}': должен быть формат 'Артикул:Количество'")
        }
        OrderTextError::EmptyArticle { segment } => {
            format!("Ошибка в паре '{segment}': артикул не может быть пустым")
        }
        OrderTextError::NotANumber { segment, value } => {
            format!("Ошибка в паре '{segment}': '{value}' не является числом")
        }
        OrderTextError::NonPositiveQuantity { segment } => {
            format!("Ошибка в паре '{segment}': количество должно быть больше нуля")
        }
    }
}

pub(crate) fn unknown_articles(articles: &[String]) -> String {
    format!("Ошибка: неизвестные артикулы: {}", articles.join(", "))
}

pub(crate) fn submit_failed(e: &ClientError) -> String {
    format!("Ошибка отправки заказа: {}", client_error_text(e))
}

pub(crate) fn not_accepted() -> &'static str {
    "Сервер не принял заказ."
}

fn client_error_text(e: &ClientError) -> String {
    match e {
        ClientError::Unreachable(m) => format!("сервер недоступен ({m})"),
        ClientError::Unauthorized(m) => format!("неверный логин или пароль ({m})"),
        ClientError::RemoteError(m) => m.clone(),
        ClientError::MalformedResponse(m) => format!("некорректный ответ сервера ({m})"),
    }
}

/// Сообщение и подсказка оператору при аварийном завершении сессии.
pub(crate) fn fatal_message(e: &SessionError, endpoint: &str) -> String {
    const STORAGE_HINT: &str = "Проверьте параметры подключения к базе (--database).";

    match e {
        SessionError::StorageUnavailable(_) => {
            format!("Локальная база недоступна. {STORAGE_HINT}")
        }
        SessionError::Refresh(_) | SessionError::Storage(_) => {
            format!("Ошибка работы с локальной базой. {STORAGE_HINT}")
        }
        SessionError::Probe(ce) => remote_fatal("Не удалось подключиться к серверу", ce, endpoint),
        SessionError::Fetch(ce) => remote_fatal("Не удалось получить меню", ce, endpoint),
        SessionError::Console(err) => format!("Ошибка консоли: {err}"),
    }
}

fn remote_fatal(head: &str, e: &ClientError, endpoint: &str) -> String {
    let hint = match e {
        ClientError::Unreachable(_) => {
            format!("Проверьте адрес сервера {endpoint} (--server) и повторите запуск.")
        }
        ClientError::Unauthorized(_) => "Проверьте логин и пароль (--username, --password).".into(),
        ClientError::RemoteError(_) | ClientError::MalformedResponse(_) => {
            format!("Проверьте настройки сервера {endpoint}.")
        }
    };
    format!("{head}: {}. {hint}", client_error_text(e))
}
