use std::time::Duration;

pub(crate) const DEFAULT_HTTP_SERVER: &str = "http://localhost:5000/api";
pub(crate) const DEFAULT_RPC_SERVER: &str = "127.0.0.1:5001";

pub(crate) const DEFAULT_DATABASE: &str = "dishes.db";

/// таймаут сетевого ввода-вывода на один вызов; повторов нет
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub(crate) fn io_timeout(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
