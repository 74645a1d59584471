//! Контракт клиента сервиса заказов и два его транспорта.
//!
//! Оба транспорта делают ровно одну попытку на вызов и сводят любые сбои
//! к [`ClientError`]: пайплайн не знает, какой транспорт под ним.

mod http;
mod rpc;

use anyhow::Result;
use dish_core::{CatalogItem, ClientError, Order};

use crate::cli::{Args, TransportKind};
use crate::config;

pub(crate) use http::HttpClient;
pub(crate) use rpc::RpcClient;

pub(crate) trait CatalogClient {
    /// Меню целиком; `include_prices = false` годится как проба соединения
    fn fetch_catalog(&self, include_prices: bool) -> Result<Vec<CatalogItem>, ClientError>;

    fn submit_order(&self, order: &Order) -> Result<bool, ClientError>;

    /// Куда ходим; для подсказок оператору и логов
    fn endpoint(&self) -> &str;
}

/// Транспорт, выбранный конфигурацией.
pub(crate) enum Transport {
    Http(HttpClient),
    Rpc(RpcClient),
}

impl Transport {
    pub(crate) fn from_args(args: &Args) -> Result<Self> {
        let timeout = config::io_timeout(args.timeout_secs);

        Ok(match args.transport {
            TransportKind::Http => {
                Self::Http(HttpClient::new(args.server(), args.credentials(), timeout)?)
            }
            TransportKind::Rpc => {
                Self::Rpc(RpcClient::new(args.server(), args.credentials(), timeout))
            }
        })
    }
}

impl CatalogClient for Transport {
    fn fetch_catalog(&self, include_prices: bool) -> Result<Vec<CatalogItem>, ClientError> {
        match self {
            Self::Http(c) => c.fetch_catalog(include_prices),
            Self::Rpc(c) => c.fetch_catalog(include_prices),
        }
    }

    fn submit_order(&self, order: &Order) -> Result<bool, ClientError> {
        match self {
            Self::Http(c) => c.submit_order(order),
            Self::Rpc(c) => c.submit_order(order),
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            Self::Http(c) => c.endpoint(),
            Self::Rpc(c) => c.endpoint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn transport_is_built_from_configuration() {
        let http = Args::try_parse_from([
            "dish-client",
            "--username",
            "u",
            "--password",
            "p",
            "--server",
            "http://127.0.0.1:5000/api",
        ])
        .unwrap();
        let t = Transport::from_args(&http).unwrap();
        assert!(matches!(t, Transport::Http(_)));
        assert_eq!(t.endpoint(), "http://127.0.0.1:5000/api");

        let rpc = Args::try_parse_from([
            "dish-client",
            "--transport",
            "rpc",
            "--username",
            "u",
            "--password",
            "p",
            "--server",
            "127.0.0.1:5001",
        ])
        .unwrap();
        let t = Transport::from_args(&rpc).unwrap();
        assert!(matches!(t, Transport::Rpc(_)));
        assert_eq!(t.endpoint(), "127.0.0.1:5001");
    }

    #[test]
    fn unresolvable_rpc_host_fails_on_first_call() {
        let rpc = Args::try_parse_from([
            "dish-client",
            "--transport",
            "rpc",
            "--username",
            "u",
            "--password",
            "p",
            "--server",
            "no-such-host.invalid:5001",
        ])
        .unwrap();
        let t = Transport::from_args(&rpc).unwrap();
        let err = t.fetch_catalog(false).unwrap_err();
        assert!(matches!(err, ClientError::Unreachable(_)), "{err:?}");
    }
}
