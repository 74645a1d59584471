//! # dish-core
//!
//! Базовые типы и протоколы для клиента заказов (`dish-client`).
//!
//! Этот крейт содержит:
//!
//! - [`types`] — доменные типы: позиция меню, запись зеркала, строка заказа, заказ
//! - [`order_text`] — разбор строки заказа `артикул:количество;...`
//! - [`validate`] — сверка разобранного заказа с каталогом
//! - [`wire`] — бинарный RPC-протокол (версия + postcard payload в кадре)
//! - [`error`] — типы ошибок, общие для обоих транспортов
//!
//! ## Быстрый пример: разбор и сверка заказа
//!
//! ```rust
//! use dish_core::order_text::parse_order_line;
//! use dish_core::validate::validate_order;
//! use dish_core::{CatalogRecord, Order};
//! use rust_decimal::Decimal;
//!
//! let catalog = vec![CatalogRecord {
//!     key: 1,
//!     external_id: "5979224".to_string(),
//!     article: "A1004292".to_string(),
//!     name: "Каша гречневая".to_string(),
//!     price: Decimal::from(50),
//!     is_weighted: false,
//!     full_path: None,
//! }];
//!
//! let items = parse_order_line("A1004292:0,5").unwrap();
//! let resolved = validate_order(&items, catalog.as_slice()).unwrap();
//! let order = Order::from_resolved(&resolved);
//!
//! assert_eq!(order.menu_items[0].id, "5979224");
//! assert_eq!(order.menu_items[0].quantity, "0.5");
//! ```
//!
//! ## Пример: wire-формат (RPC)
//!
//! ```rust
//! use dish_core::wire::{decode_request, encode_request, RpcCall, RpcRequest};
//! use dish_core::Credentials;
//!
//! let req = RpcRequest {
//!     credentials: Credentials { username: "test".into(), password: "test".into() },
//!     call: RpcCall::GetMenu { with_price: true },
//! };
//!
//! let bytes = encode_request(&req).unwrap();
//! assert_eq!(decode_request(&bytes).unwrap(), req);
//! ```
//!
//! ## Дизайн
//!
//! `dish-core` не ходит ни в сеть, ни в базу: только типы, разбор,
//! сверка через трейт [`validate::ArticleLookup`] и кодек кадров поверх
//! `Read`/`Write`. Транспорты и хранилище живут в `dish-client`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Доменные типы.
pub mod types;

/// Разбор строки заказа оператора.
pub mod order_text;

/// Сверка заказа с каталогом.
pub mod validate;

/// Wire-уровень RPC-транспорта.
pub mod wire;

/// Ошибки `dish-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{ClientError, OrderTextError, ValidationError, WireError};
pub use crate::types::{
    CatalogItem, CatalogRecord, Credentials, Order, OrderEntry, OrderLineItem, ResolvedLine,
};
