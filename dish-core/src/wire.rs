use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::types::{Credentials, Order};

/// Версия протокола, первый байт payload
pub const WIRE_VERSION: u8 = 1;

/// Максимальный размер payload одного кадра
pub const MAX_FRAME_LEN: usize = 4 * 1024 * 1024;

/// Запрос: учётные данные идут в каждом вызове
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Логин и пароль
    pub credentials: Credentials,
    /// Сам вызов
    pub call: RpcCall,
}

/// Вызовы сервиса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RpcCall {
    /// Меню; без цен годится как проба соединения
    GetMenu {
        /// Заполнять ли `price`
        with_price: bool,
    },
    /// Отправка заказа
    SendOrder(Order),
}

/// Статус ответа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcStatus {
    /// успех
    Ok,
    /// учётные данные не переданы или не распознаны
    Unauthenticated,
    /// учётные данные отвергнуты
    PermissionDenied,
    /// сервис сообщил об ошибке в `error_message`
    Failed,
}

/// Ответ сервиса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Статус вызова
    pub status: RpcStatus,
    /// Текст ошибки; пустой при успехе
    pub error_message: String,
    /// Полезная нагрузка
    pub body: RpcBody,
}

/// Тело ответа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RpcBody {
    /// Нет данных (ошибка или `SendOrder`)
    Empty,
    /// Позиции меню
    Menu(Vec<MenuItemV1>),
}

/// Цена передаётся текстом, чтобы не терять точность decimal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemV1 {
    /// Идентификатор у сервиса
    pub id: String,
    /// Артикул
    pub article: String,
    /// Название
    pub name: String,
    /// Цена текстом (`"300.50"`); `None`, если цены не запрошены
    pub price: Option<String>,
    /// Путь категории
    pub full_path: Option<String>,
}

/// Кодирует запрос: версия + postcard
pub fn encode_request(req: &RpcRequest) -> Result<Vec<u8>, WireError> {
    encode_v1(req)
}

/// Декодирует запрос, проверяя версию
pub fn decode_request(buf: &[u8]) -> Result<RpcRequest, WireError> {
    decode(buf)
}

/// Кодирует ответ: версия + postcard
pub fn encode_response(resp: &RpcResponse) -> Result<Vec<u8>, WireError> {
    encode_v1(resp)
}

/// Декодирует ответ, проверяя версию
pub fn decode_response(buf: &[u8]) -> Result<RpcResponse, WireError> {
    decode(buf)
}

fn encode_v1<T: Serialize>(msg: &T) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    out.push(WIRE_VERSION);
    out.extend_from_slice(&postcard::to_allocvec(msg)?);
    Ok(out)
}

fn decode<T: DeserializeOwned>(buf: &[u8]) -> Result<T, WireError> {
    let (&ver, payload) = buf.split_first().ok_or(WireError::PacketTooShort)?;
    if ver != WIRE_VERSION {
        return Err(WireError::UnsupportedWireVersion(ver));
    }
    Ok(postcard::from_bytes(payload)?)
}

/// Кадр: u32 BE длина + payload
pub fn write_frame<W: Write>(w: &mut W, payload: &[u8]) -> Result<(), WireError> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(payload.len()));
    }
    let len = payload.len() as u32;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(payload)?;
    w.flush()?;
    Ok(())
}

/// Читает один кадр целиком; длина больше [`MAX_FRAME_LEN`] отвергается
pub fn read_frame<R: Read>(r: &mut R) -> Result<Vec<u8>, WireError> {
    let mut len_buf = [0u8; 4];
    r.read_exact(&mut len_buf)?;

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(len));
    }

    let mut payload = vec![0u8; len];
    r.read_exact(&mut payload)?;
    Ok(payload)
}
