use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use dish_core::Credentials;

use crate::config;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportKind {
    /// JSON поверх HTTP POST
    Http,
    /// бинарный RPC поверх TCP
    Rpc,
}

/// Dish Client - зеркалит меню в локальную базу и отправляет один заказ.
///
/// Порядок работы: база -> проверка сервера -> загрузка меню -> ввод заказа -> отправка.
#[derive(Parser, Debug, Clone)]
#[command(name = "dish-client", version, about)]
pub(crate) struct Args {
    /// Транспорт до сервиса заказов
    #[arg(long, value_enum, env = "DISH_TRANSPORT", default_value = "http")]
    pub(crate) transport: TransportKind,

    /// Адрес сервиса: URL для http (http://localhost:5000/api),
    /// HOST:PORT для rpc (127.0.0.1:5001)
    #[arg(long, env = "DISH_SERVER")]
    pub(crate) server: Option<String>,

    /// Логин Basic-авторизации
    #[arg(long, env = "DISH_USERNAME")]
    pub(crate) username: String,

    /// Пароль Basic-авторизации
    #[arg(long, env = "DISH_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,

    /// Файл SQLite с зеркалом меню (создаётся при первом запуске)
    #[arg(long, env = "DISH_DATABASE", default_value = config::DEFAULT_DATABASE)]
    pub(crate) database: PathBuf,

    /// Таймаут сетевых операций, секунд
    #[arg(long, env = "DISH_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    pub(crate) timeout_secs: u64,
}

impl Args {
    /// Валидация аргументов (адрес подходит выбранному транспорту и т.д.)
    pub(crate) fn validate(&self) -> Result<()> {
        let server = self.server();
        if server.trim().is_empty() {
            bail!("--server is empty");
        }

        match self.transport {
            TransportKind::Http => {
                if !(server.starts_with("http://") || server.starts_with("https://")) {
                    bail!("--server must be an http:// or https:// URL for http transport (got: {server})");
                }
            }
            TransportKind::Rpc => {
                if server.contains("://") || !server.contains(':') {
                    bail!("--server must look like HOST:PORT for rpc transport (got: {server})");
                }
            }
        }

        if self.username.is_empty() {
            bail!("--username is empty");
        }
        if self.timeout_secs == 0 {
            bail!("--timeout-secs must be greater than zero");
        }

        Ok(())
    }

    pub(crate) fn server(&self) -> &str {
        match (&self.server, self.transport) {
            (Some(s), _) => s.as_str(),
            (None, TransportKind::Http) => config::DEFAULT_HTTP_SERVER,
            (None, TransportKind::Rpc) => config::DEFAULT_RPC_SERVER,
        }
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
