use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

use dish_core::wire::{
    MenuItemV1, RpcBody, RpcCall, RpcRequest, RpcResponse, RpcStatus, decode_response,
    encode_request, read_frame, write_frame,
};
use dish_core::{CatalogItem, ClientError, Credentials, Order, WireError};
use log::debug;
use rust_decimal::Decimal;

use super::CatalogClient;

/// Бинарный RPC: одно соединение на вызов, один кадр туда и один обратно.
pub(crate) struct RpcClient {
    /// `HOST:PORT`, резолвится на каждом вызове
    endpoint: String,
    credentials: Credentials,
    timeout: Duration,
}

impl RpcClient {
    pub(crate) fn new(endpoint: &str, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            credentials,
            timeout,
        }
    }

    fn resolve(&self) -> Result<SocketAddr, ClientError> {
        // Берём первый результат резолвинга
        self.endpoint
            .to_socket_addrs()
            .map_err(|e| ClientError::Unreachable(format!("resolve {}: {e}", self.endpoint)))?
            .next()
            .ok_or_else(|| {
                ClientError::Unreachable(format!("no addresses resolved for {}", self.endpoint))
            })
    }

    fn call(&self, call: RpcCall) -> Result<RpcResponse, ClientError> {
        let addr = self.resolve()?;
        let mut stream = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| ClientError::Unreachable(format!("connect {addr}: {e}")))?;

        stream.set_nodelay(true).ok();
        stream.set_read_timeout(Some(self.timeout)).ok();
        stream.set_write_timeout(Some(self.timeout)).ok();

        let payload = encode_request(&RpcRequest {
            credentials: self.credentials.clone(),
            call,
        })
        .map_err(|e| ClientError::MalformedResponse(format!("encode request: {e}")))?;

        write_frame(&mut stream, &payload).map_err(from_wire)?;
        let frame = read_frame(&mut stream).map_err(from_wire)?;
        let resp = decode_response(&frame).map_err(from_wire)?;
        debug!("rpc {addr} -> {:?}", resp.status);

        match resp.status {
            RpcStatus::Ok => Ok(resp),
            RpcStatus::Unauthenticated | RpcStatus::PermissionDenied => Err(
                ClientError::Unauthorized(non_empty_or(resp.error_message, "credentials rejected")),
            ),
            RpcStatus::Failed => Err(ClientError::RemoteError(non_empty_or(
                resp.error_message,
                "invalid response",
            ))),
        }
    }
}

fn from_wire(e: WireError) -> ClientError {
    match e {
        WireError::Io(e) => ClientError::Unreachable(e.to_string()),
        other => ClientError::MalformedResponse(other.to_string()),
    }
}

fn non_empty_or(msg: String, fallback: &str) -> String {
    if msg.is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}

fn item_from_wire(m: MenuItemV1) -> Result<CatalogItem, ClientError> {
    let price = match m.price.as_deref() {
        None => Decimal::ZERO,
        Some(raw) => Decimal::from_str(raw).map_err(|e| {
            ClientError::MalformedResponse(format!("bad price {raw:?} for {}: {e}", m.id))
        })?,
    };
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ClientError::MalformedResponse(format!(
            "negative price {price} for {}",
            m.id
        )));
    }

    Ok(CatalogItem {
        id: m.id,
        article: m.article,
        name: m.name,
        price,
        full_path: m.full_path,
    })
}

impl CatalogClient for RpcClient {
    fn fetch_catalog(&self, include_prices: bool) -> Result<Vec<CatalogItem>, ClientError> {
        let resp = self.call(RpcCall::GetMenu {
            with_price: include_prices,
        })?;

        match resp.body {
            RpcBody::Menu(items) => items.into_iter().map(item_from_wire).collect(),
            RpcBody::Empty => Err(ClientError::MalformedResponse(
                "expected menu in GetMenu response".into(),
            )),
        }
    }

    fn submit_order(&self, order: &Order) -> Result<bool, ClientError> {
        self.call(RpcCall::SendOrder(order.clone()))?;
        Ok(true)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
