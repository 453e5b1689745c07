use anyhow::Context;
use log::{debug, info, warn};
use qotd_core::http::{RequestLine, parse_request_line, text_response};
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{ACCEPT_POLL_TICK, SHUTDOWN_GRACE};
use crate::store::QuoteStore;

const TCP_READ_TIMEOUT_S: u64 = 5;
const TCP_WRITE_TIMEOUT_S: u64 = 5;

// accept loop + обработка HTTP-запросов
pub(crate) fn run_http_listener(
    bind_addr: SocketAddr,
    store: Arc<QuoteStore>,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .with_context(|| format!("bind HTTP listener {}", bind_addr))?;
    listener
        .set_nonblocking(true)
        .context("listener.set_nonblocking(true)")?;

    info!("listening on http://{}", listener.local_addr()?);

    let mut conn_handles = Vec::new();

    loop {
        reap_finished_conns(&mut conn_handles);

        if shutdown.load(Ordering::Relaxed) {
            info!("shutting down http listener");
            break;
        }

        match listener.accept() {
            Ok((stream, peer)) => {
                stream
                    .set_nonblocking(false)
                    .context("stream.set_nonblocking(false)")?;

                stream.set_nodelay(true).ok();
                stream
                    .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT_S)))
                    .ok();
                stream
                    .set_write_timeout(Some(Duration::from_secs(TCP_WRITE_TIMEOUT_S)))
                    .ok();

                let store = store.clone();

                let h = thread::spawn(move || {
                    if let Err(e) = handle_conn(stream, peer, &store) {
                        warn!("handle_conn error: {e}");
                    }
                });
                conn_handles.push(h);
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // нет новых соединений прямо сейчас
                thread::sleep(ACCEPT_POLL_TICK);
            }
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(ACCEPT_POLL_TICK);
            }
        }
    }

    join_with_grace(conn_handles, SHUTDOWN_GRACE);

    Ok(())
}

fn reap_finished_conns(handles: &mut Vec<thread::JoinHandle<()>>) {
    let mut i = 0;
    while i < handles.len() {
        if handles[i].is_finished() {
            let h = handles.swap_remove(i);
            if let Err(panic) = h.join() {
                warn!("connection thread panicked: {:?}", panic);
            }
        } else {
            i += 1;
        }
    }
}

// даём in-flight запросам дорешаться, остальных бросаем
fn join_with_grace(mut handles: Vec<thread::JoinHandle<()>>, grace: Duration) {
    let deadline = Instant::now() + grace;

    while !handles.is_empty() && Instant::now() < deadline {
        reap_finished_conns(&mut handles);
        if handles.is_empty() {
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }

    if !handles.is_empty() {
        warn!(
            "{} connection(s) still in flight after grace period",
            handles.len()
        );
    }
}

fn handle_conn(
    mut stream: TcpStream,
    peer: SocketAddr,
    store: &QuoteStore,
) -> anyhow::Result<()> {
    let (request, user_agent) = match read_request(&mut stream) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("bad request from {peer}: {e}");
            let _ = stream.write_all(text_response(400, "").as_bytes());
            return Ok(());
        }
    };

    let response = route(&request, store);
    stream.write_all(response.as_bytes())?;
    stream.flush()?;

    debug!(
        r#"{peer} "{} {} {}" "{}""#,
        request.method,
        request.target,
        request.version,
        user_agent.as_deref().unwrap_or("-")
    );

    Ok(())
}

/// Request line + заголовки до пустой строки; из заголовков нам нужен
/// только User-Agent для access-лога.
fn read_request(stream: &mut TcpStream) -> anyhow::Result<(RequestLine, Option<String>)> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        anyhow::bail!("client closed connection before sending a request");
    }

    let request = parse_request_line(&line)?;

    let mut user_agent = None;
    loop {
        let mut header = String::new();
        let n = reader.read_line(&mut header)?;
        if n == 0 {
            break;
        }

        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }

        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }

    Ok((request, user_agent))
}

fn route(req: &RequestLine, store: &QuoteStore) -> String {
    if req.method != "GET" {
        return text_response(405, "");
    }

    match req.target.as_str() {
        "/" => match store.select() {
            Some(quote) => text_response(200, &format!("{quote}\n")),
            None => text_response(503, ""),
        },
        "/health" => {
            if store.has_quotes() {
                text_response(200, "")
            } else {
                text_response(503, "")
            }
        }
        _ => text_response(404, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{TcpListener, TcpStream};

    fn connect_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();

        (client, server)
    }

    fn read_reply(mut client: TcpStream) -> String {
        client
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        let mut buf = String::new();
        let _ = client.read_to_string(&mut buf);
        buf
    }

    fn store_with(quotes: &[&str]) -> QuoteStore {
        let store = QuoteStore::new(false);
        store.reload(quotes.iter().map(|q| q.to_string()).collect());
        store
    }

    fn serve(request: &str, store: &QuoteStore) -> String {
        let (mut client, server) = connect_pair();
        client.write_all(request.as_bytes()).unwrap();

        let peer = server.peer_addr().unwrap();
        handle_conn(server, peer, store).unwrap();

        read_reply(client)
    }

    #[test]
    fn root_serves_quote_with_trailing_newline() {
        let store = store_with(&["hello world"]);

        let reply = serve("GET / HTTP/1.1\r\nHost: x\r\nUser-Agent: test\r\n\r\n", &store);

        assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"), "got: {reply:?}");
        assert!(reply.ends_with("\r\n\r\nhello world\n"), "got: {reply:?}");
    }

    #[test]
    fn root_is_503_when_store_empty() {
        let store = store_with(&[]);

        let reply = serve("GET / HTTP/1.1\r\n\r\n", &store);

        assert!(reply.starts_with("HTTP/1.1 503 "), "got: {reply:?}");
        assert!(reply.ends_with("\r\n\r\n"), "503 must have empty body: {reply:?}");
    }

    #[test]
    fn health_reflects_store_contents() {
        let full = store_with(&["q"]);
        let reply = serve("GET /health HTTP/1.1\r\n\r\n", &full);
        assert!(reply.starts_with("HTTP/1.1 200 "), "got: {reply:?}");

        let empty = store_with(&[]);
        let reply = serve("GET /health HTTP/1.1\r\n\r\n", &empty);
        assert!(reply.starts_with("HTTP/1.1 503 "), "got: {reply:?}");
    }

    #[test]
    fn unknown_path_is_404() {
        let store = store_with(&["q"]);
        let reply = serve("GET /nope HTTP/1.1\r\n\r\n", &store);
        assert!(reply.starts_with("HTTP/1.1 404 "), "got: {reply:?}");
    }

    #[test]
    fn non_get_method_is_405() {
        let store = store_with(&["q"]);
        let reply = serve("POST / HTTP/1.1\r\n\r\n", &store);
        assert!(reply.starts_with("HTTP/1.1 405 "), "got: {reply:?}");
    }

    #[test]
    fn garbage_request_line_is_400() {
        let store = store_with(&["q"]);
        let reply = serve("GARBAGE\r\n\r\n", &store);
        assert!(reply.starts_with("HTTP/1.1 400 "), "got: {reply:?}");
    }

    #[test]
    fn eof_before_request_is_not_an_error() {
        let store = store_with(&["q"]);
        let (client, server) = connect_pair();
        let peer = server.peer_addr().unwrap();
        drop(client); // клиент сразу закрыл соединение => EOF

        // просто проверяем, что не паникует и корректно завершается
        handle_conn(server, peer, &store).unwrap();
    }

    #[test]
    fn cached_store_serves_same_quote_per_request() {
        let store = QuoteStore::new(true);
        store.reload(vec!["pinned".to_string(), "other".to_string()]);

        let first = serve("GET / HTTP/1.1\r\n\r\n", &store);
        let second = serve("GET / HTTP/1.1\r\n\r\n", &store);

        let body = |r: &str| r.split("\r\n\r\n").nth(1).unwrap().to_string();
        assert_eq!(body(&first), body(&second));
    }
}
