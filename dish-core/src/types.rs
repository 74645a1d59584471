use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Позиция меню в том виде, в каком её отдаёт удалённый сервис.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Непрозрачный идентификатор на стороне сервиса
    pub id: String,
    /// Артикул, который вводит оператор
    pub article: String,
    /// Отображаемое название
    pub name: String,
    /// Цена (неотрицательная)
    pub price: Decimal,
    /// Путь категории, если сервис его прислал
    pub full_path: Option<String>,
}

/// Запись локального зеркала каталога (таблица `dishes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Локальный суррогатный ключ
    pub key: i64,
    /// Идентификатор на стороне сервиса (`external_id`)
    pub external_id: String,
    /// Артикул
    pub article: String,
    /// Название
    pub name: String,
    /// Цена
    pub price: Decimal,
    /// Весовой товар; сервис этого не сообщает, всегда `false`
    pub is_weighted: bool,
    /// Путь категории
    pub full_path: Option<String>,
}

impl fmt::Display for CatalogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {} – {}", self.name, self.article, self.price)
    }
}

/// Одна пара `артикул:количество` из строки оператора.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    /// Артикул без окружающих пробелов, не пустой
    pub article: String,
    /// Количество, строго больше нуля
    pub quantity: Decimal,
}

/// Строка заказа, артикул которой найден в каталоге.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    /// Найденная запись каталога
    pub record: CatalogRecord,
    /// Количество из ввода оператора
    pub quantity: Decimal,
}

/// Позиция заказа на проводе: id блюда у сервиса + количество текстом.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderEntry {
    /// Идентификатор блюда у сервиса
    pub id: String,
    /// Количество в инвариантной записи (`0.4`, `1`, `1.50`)
    pub quantity: String,
}

/// Заказ, готовый к отправке.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    /// Новый идентификатор на каждую попытку отправки
    pub order_id: Uuid,
    /// Позиции в порядке ввода
    pub menu_items: Vec<OrderEntry>,
}

impl Order {
    /// Собирает заказ из уже проверенных строк, сохраняя их порядок.
    pub fn from_resolved(lines: &[ResolvedLine]) -> Self {
        Self::with_id(Uuid::new_v4(), lines)
    }

    /// То же, что [`Order::from_resolved`], но с заданным идентификатором.
    pub fn with_id(order_id: Uuid, lines: &[ResolvedLine]) -> Self {
        let menu_items = lines
            .iter()
            .map(|l| OrderEntry {
                id: l.record.external_id.clone(),
                quantity: l.quantity.to_string(),
            })
            .collect();

        Self {
            order_id,
            menu_items,
        }
    }
}

/// Учётные данные Basic-авторизации.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Логин
    pub username: String,
    /// Пароль
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record(key: i64, external_id: &str, article: &str) -> CatalogRecord {
        CatalogRecord {
            key,
            external_id: external_id.to_string(),
            article: article.to_string(),
            name: "Каша гречневая".to_string(),
            price: Decimal::from(50),
            is_weighted: false,
            full_path: None,
        }
    }

    #[test]
    fn order_keeps_line_order_and_typed_scale() {
        let lines = vec![
            ResolvedLine {
                record: record(1, "5979224", "A1004292"),
                quantity: Decimal::from_str("1").unwrap(),
            },
            ResolvedLine {
                record: record(2, "5979225", "A1004293"),
                quantity: Decimal::from_str("1.50").unwrap(),
            },
            ResolvedLine {
                record: record(1, "5979224", "A1004292"),
                quantity: Decimal::from_str("0.4").unwrap(),
            },
        ];

        let order = Order::from_resolved(&lines);
        let got: Vec<(&str, &str)> = order
            .menu_items
            .iter()
            .map(|e| (e.id.as_str(), e.quantity.as_str()))
            .collect();

        assert_eq!(
            got,
            vec![("5979224", "1"), ("5979225", "1.50"), ("5979224", "0.4")]
        );
    }

    #[test]
    fn every_order_gets_a_fresh_id() {
        let a = Order::from_resolved(&[]);
        let b = Order::from_resolved(&[]);
        assert_ne!(a.order_id, b.order_id);
    }

    #[test]
    fn record_display_matches_console_layout() {
        let r = record(1, "5979224", "A1004292");
        assert_eq!(r.to_string(), "Каша гречневая – A1004292 – 50");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let c = Credentials {
            username: "test".into(),
            password: "secret".into(),
        };
        let dbg = format!("{c:?}");
        assert!(dbg.contains("test"));
        assert!(!dbg.contains("secret"));
    }
}
