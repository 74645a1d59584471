use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::OrderTextError;
use crate::types::OrderLineItem;

/// Разделитель пар в строке заказа
pub const PAIR_SEPARATOR: char = ';';

/// Разделитель артикула и количества
pub const QUANTITY_SEPARATOR: char = ':';

/// Пример корректного ввода, который показываем оператору
pub const EXAMPLE_LINE: &str = "A1004292:1;A1004293:0.4";

/// Парсит строку вида:
/// "A1004292:1;A1004293:0,4"
///
/// Пустые пары (`;;`, хвостовой `;`) пропускаются. Разбор останавливается
/// на первой некорректной паре, ошибка содержит её исходный текст.
/// Повторяющиеся артикулы не склеиваются.
pub fn parse_order_line(line: &str) -> Result<Vec<OrderLineItem>, OrderTextError> {
    let mut items = Vec::new();

    for segment in line.split(PAIR_SEPARATOR) {
        if segment.trim().is_empty() {
            continue;
        }
        items.push(parse_pair(segment)?);
    }

    if items.is_empty() {
        return Err(OrderTextError::EmptyInput);
    }

    Ok(items)
}

fn parse_pair(segment: &str) -> Result<OrderLineItem, OrderTextError> {
    let parts: Vec<&str> = segment.split(QUANTITY_SEPARATOR).collect();
    let [article, quantity] = parts.as_slice() else {
        return Err(OrderTextError::MalformedPair {
            segment: segment.to_string(),
        });
    };

    let article = article.trim();
    if article.is_empty() {
        return Err(OrderTextError::EmptyArticle {
            segment: segment.to_string(),
        });
    }

    let raw = quantity.trim();
    let quantity = parse_quantity(raw).ok_or_else(|| OrderTextError::NotANumber {
        segment: segment.to_string(),
        value: raw.to_string(),
    })?;

    if quantity <= Decimal::ZERO {
        return Err(OrderTextError::NonPositiveQuantity {
            segment: segment.to_string(),
        });
    }

    Ok(OrderLineItem {
        article: article.to_string(),
        quantity,
    })
}

/// Число в записи `[+-]цифры[(.|,)цифры]`, всегда по основанию 10,
/// без разделителей разрядов и экспоненты. Одна из сторон от запятой
/// может быть пустой (`,5`, `1.`), обе сразу нет.
fn parse_quantity(raw: &str) -> Option<Decimal> {
    let normalized = raw.replace(',', ".");

    let (negative, unsigned) = match normalized.as_bytes().first() {
        Some(b'-') => (true, &normalized[1..]),
        Some(b'+') => (false, &normalized[1..]),
        _ => (false, normalized.as_str()),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let frac_part = frac_part.unwrap_or("");
    if !digits(int_part) || !digits(frac_part) || (int_part.is_empty() && frac_part.is_empty()) {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let canonical = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };

    let value = Decimal::from_str(&canonical).ok()?;
    Some(if negative { -value } else { value })
}

/// Обратная операция к [`parse_order_line`]: `артикул:количество;...`
pub fn format_order_line(items: &[OrderLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}{}{}", i.article, QUANTITY_SEPARATOR, i.quantity))
        .collect::<Vec<_>>()
        .join(&PAIR_SEPARATOR.to_string())
}
