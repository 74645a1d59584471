use std::convert::Infallible;

use crate::error::ValidationError;
use crate::types::{CatalogRecord, OrderLineItem, ResolvedLine};

/// Поиск записи каталога по артикулу (точное, регистрозависимое совпадение).
pub trait ArticleLookup {
    /// Ошибка хранилища, в котором ищем
    type Error: std::error::Error + 'static;

    /// Найти запись по артикулу
    fn find_by_article(&self, article: &str) -> Result<Option<CatalogRecord>, Self::Error>;
}

impl ArticleLookup for [CatalogRecord] {
    type Error = Infallible;

    fn find_by_article(&self, article: &str) -> Result<Option<CatalogRecord>, Infallible> {
        Ok(self.iter().find(|r| r.article == article).cloned())
    }
}

/// Сверяет разобранные строки с каталогом.
///
/// Проверяются все строки: оператор должен увидеть все неизвестные
/// артикулы одним сообщением. При успехе порядок строк сохраняется.
pub fn validate_order<L>(
    items: &[OrderLineItem],
    catalog: &L,
) -> Result<Vec<ResolvedLine>, ValidationError<L::Error>>
where
    L: ArticleLookup + ?Sized,
{
    let mut resolved = Vec::with_capacity(items.len());
    let mut unknown: Vec<String> = Vec::new();

    for item in items {
        match catalog
            .find_by_article(&item.article)
            .map_err(ValidationError::Lookup)?
        {
            Some(record) => resolved.push(ResolvedLine {
                record,
                quantity: item.quantity,
            }),
            None => {
                if !unknown.contains(&item.article) {
                    unknown.push(item.article.clone());
                }
            }
        }
    }

    if !unknown.is_empty() {
        return Err(ValidationError::UnknownArticles(unknown));
    }

    Ok(resolved)
}
