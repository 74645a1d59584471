use std::time::Duration;

use dish_core::{CatalogItem, ClientError, Credentials, Order};
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use super::CatalogClient;

const CMD_GET_MENU: &str = "GetMenu";
const CMD_SEND_ORDER: &str = "SendOrder";

/// Тело запроса: `{"Command": ..., "CommandParameters": {...}}`
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Request<'a, P: Serialize> {
    command: &'a str,
    command_parameters: P,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetMenuParams {
    with_price: bool,
}

/// Конверт ответа: `{"Command", "Success", "ErrorMessage", "Data"}`
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope<T> {
    success: bool,
    error_message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MenuData {
    menu_items: Option<Vec<MenuItemDto>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MenuItemDto {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    article: String,
    name: String,
    price: Option<Decimal>,
    full_path: Option<String>,
}

impl TryFrom<MenuItemDto> for CatalogItem {
    type Error = ClientError;

    fn try_from(d: MenuItemDto) -> Result<Self, ClientError> {
        let price = d.price.unwrap_or(Decimal::ZERO);
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ClientError::MalformedResponse(format!(
                "negative price {price} for {}",
                d.id
            )));
        }

        Ok(Self {
            id: d.id,
            article: d.article,
            name: d.name,
            price,
            full_path: d.full_path,
        })
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// JSON поверх HTTP POST с Basic-авторизацией.
pub(crate) struct HttpClient {
    http: Client,
    endpoint: String,
    credentials: Credentials,
}

impl HttpClient {
    pub(crate) fn new(
        endpoint: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            credentials,
        })
    }

    fn call<P, T>(&self, command: &str, params: P) -> Result<Option<T>, ClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        debug!("POST {} command={command}", self.endpoint);

        let resp = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&Request {
                command,
                command_parameters: params,
            })
            .send()
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;
        debug!("{command} -> HTTP {status}, {} bytes", body.len());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let msg = serde_json::from_str::<Envelope<IgnoredAny>>(&body)
                .ok()
                .and_then(|e| e.error_message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ClientError::Unauthorized(msg));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                ClientError::MalformedResponse(e.to_string())
            } else {
                ClientError::RemoteError(format!("HTTP {status}"))
            }
        })?;

        if !envelope.success {
            let msg = envelope
                .error_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "invalid response".to_string());
            return Err(ClientError::RemoteError(msg));
        }

        Ok(envelope.data)
    }
}

impl CatalogClient for HttpClient {
    fn fetch_catalog(&self, include_prices: bool) -> Result<Vec<CatalogItem>, ClientError> {
        let data: Option<MenuData> = self.call(
            CMD_GET_MENU,
            GetMenuParams {
                with_price: include_prices,
            },
        )?;

        let items = data
            .and_then(|d| d.menu_items)
            .ok_or_else(|| ClientError::MalformedResponse("missing Data.MenuItems".into()))?;

        items.into_iter().map(CatalogItem::try_from).collect()
    }

    fn submit_order(&self, order: &Order) -> Result<bool, ClientError> {
        let _: Option<IgnoredAny> = self.call(CMD_SEND_ORDER, order)?;
        Ok(true)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
