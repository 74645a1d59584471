use thiserror::Error;

/// Ошибки обращения к удалённому сервису.
///
/// Общая таксономия для обоих транспортов: один и тот же сбой должен
/// попадать в один и тот же вариант независимо от того, пришёл он
/// HTTP-статусом или статусом RPC.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Не удалось установить соединение или обмен оборвался
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// Сервис отверг учётные данные (или они не были переданы)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Сервис явно сообщил об ошибке; текст передаётся как есть
    #[error("remote error: {0}")]
    RemoteError(String),

    /// Ответ не удалось разобрать
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Ошибки разбора строки заказа. Каждая хранит исходный текст пары.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderTextError {
    /// Пустая строка или строка без единой пары
    #[error("empty order line")]
    EmptyInput,

    /// Пара не делится ровно на две части по `:`
    #[error("malformed pair '{segment}': expected 'article:quantity'")]
    MalformedPair {
        /// Исходный текст пары
        segment: String,
    },

    /// Артикул пустой
    #[error("empty article in pair '{segment}'")]
    EmptyArticle {
        /// Исходный текст пары
        segment: String,
    },

    /// Количество не является числом
    #[error("quantity '{value}' in pair '{segment}' is not a number")]
    NotANumber {
        /// Исходный текст пары
        segment: String,
        /// Часть после `:` без пробелов
        value: String,
    },

    /// Количество не больше нуля
    #[error("quantity in pair '{segment}' must be greater than zero")]
    NonPositiveQuantity {
        /// Исходный текст пары
        segment: String,
    },
}

/// Ошибки сверки заказа с каталогом.
#[derive(Debug, Error)]
pub enum ValidationError<E: std::error::Error + 'static> {
    /// Артикулы, которых нет в каталоге: порядок первого появления, без повторов
    #[error("unknown articles: {}", .0.join(", "))]
    UnknownArticles(Vec<String>),

    /// Каталог не смог выполнить поиск
    #[error("catalog lookup failed: {0}")]
    Lookup(#[source] E),
}

/// Ошибки wire-уровня RPC
#[derive(Debug, Error)]
pub enum WireError {
    /// Пакет слишком короткий (нет байта версии)
    #[error("packet too short")]
    PacketTooShort,

    /// Неверная версия протокола
    #[error("unsupported wire version: {0}")]
    UnsupportedWireVersion(u8),

    /// Кадр больше допустимого
    #[error("frame too large: {0} bytes")]
    FrameTooLarge(usize),

    /// Ошибка ввода-вывода при чтении/записи кадра
    #[error("frame i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации
    #[error("postcard encode/decode error: {0}")]
    Postcard(#[from] postcard::Error),
}
