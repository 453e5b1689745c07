use std::fs::File;
use std::io;
use thiserror::Error;

use qotd_core::parse::read_quotes;

use crate::config::FETCH_TIMEOUT;

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    /// URL-источник ответил не-2xx статусом
    #[error("failed fetching quote source: HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Сетевая ошибка при запросе источника
    #[error("failed fetching quote source: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Локальный файл не открылся или не прочитался
    #[error("failed reading quote source: {0}")]
    Read(#[from] io::Error),
}

/// Забирает и разбирает источник целиком.
///
/// Диспетчеризация по префиксу: `http://` и `https://` — удалённый ресурс,
/// всё остальное трактуем как путь к файлу. Частичных результатов нет:
/// либо полный набор цитат, либо ошибка.
pub(crate) fn fetch_quotes(source: &str) -> Result<Vec<String>, SourceError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        load_from_url(source)
    } else {
        load_from_file(source)
    }
}

fn load_from_file(path: &str) -> Result<Vec<String>, SourceError> {
    let f = File::open(path)?;
    Ok(read_quotes(f)?)
}

fn load_from_url(url: &str) -> Result<Vec<String>, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let resp = client.get(url).send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp.text()?;
    Ok(read_quotes(body.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Одноразовый HTTP-сервер на локальном порту: отвечает заготовкой
    /// на первый же запрос и закрывает соединение.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            // дочитываем запрос до пустой строки
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                let n = reader.read_line(&mut line).unwrap_or(0);
                if n == 0 || line == "\r\n" || line == "\n" {
                    break;
                }
            }

            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(resp.as_bytes()).unwrap();
        });

        format!("http://{addr}")
    }

    #[test]
    fn local_file_source_is_parsed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "one\n\ntwo\nthree\n").unwrap();

        let got = fetch_quotes(f.path().to_str().unwrap()).unwrap();
        assert_eq!(got, vec!["one", "two\nthree"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = fetch_quotes("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, SourceError::Read(_)));
    }

    #[test]
    fn url_source_is_fetched_and_parsed() {
        let url = serve_once("200 OK", "first\n\nsecond\n");

        let got = fetch_quotes(&url).unwrap();
        assert_eq!(got, vec!["first", "second"]);
    }

    #[test]
    fn non_success_status_is_a_status_error() {
        let url = serve_once("503 Service Unavailable", "");

        let err = fetch_quotes(&url).unwrap_err();
        match err {
            SourceError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Status error, got: {other}"),
        }
    }
}
