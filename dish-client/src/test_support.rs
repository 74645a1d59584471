//! Тестовые фейковые серверы на 127.0.0.1:0: по одному соединению на сервер.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use dish_core::wire::{
    RpcRequest, RpcResponse, decode_request, encode_response, read_frame, write_frame,
};

/// Что пришло на фейковый HTTP-сервер
pub(crate) struct CapturedRequest {
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl CapturedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Адрес, на котором гарантированно никто не слушает
pub(crate) fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Принимает один HTTP-запрос и отвечает `status` + `body`.
pub(crate) fn serve_http_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let (listener, addr) = bind();
    let body = body.to_string();

    let h = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let captured = read_http_request(&stream);

        let mut stream = stream;
        let resp = format!(
            "HTTP/1.1 {status} X\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(resp.as_bytes()).unwrap();
        stream.flush().unwrap();
        captured
    });

    (format!("http://{addr}/api"), h)
}

fn read_http_request(stream: &TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream);
    let mut headers = Vec::new();

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let len: usize = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).unwrap();

    CapturedRequest {
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

/// Принимает один RPC-вызов и отвечает тем, что вернёт `handler`.
pub(crate) fn serve_rpc_once<F>(handler: F) -> (SocketAddr, JoinHandle<RpcRequest>)
where
    F: FnOnce(&RpcRequest) -> RpcResponse + Send + 'static,
{
    let (listener, addr) = bind();

    let h = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let req = decode_request(&read_frame(&mut stream).unwrap()).unwrap();
        let resp = handler(&req);
        write_frame(&mut stream, &encode_response(&resp).unwrap()).unwrap();
        req
    });

    (addr, h)
}

/// Читает кадр запроса и отвечает сырым payload; `None` - закрыть без ответа.
pub(crate) fn serve_rpc_raw_once(payload: Option<Vec<u8>>) -> (SocketAddr, JoinHandle<()>) {
    let (listener, addr) = bind();

    let h = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let _ = read_frame(&mut stream).unwrap();
        if let Some(p) = payload {
            write_frame(&mut stream, &p).unwrap();
        }
    });

    (addr, h)
}
