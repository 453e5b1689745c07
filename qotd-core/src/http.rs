use crate::error::HttpError;

/// Разобранная request line HTTP-запроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Метод (`GET`, `POST`, ...)
    pub method: String,
    /// Request target (`/`, `/health`, ...)
    pub target: String,
    /// Версия протокола как пришла от клиента (`HTTP/1.1`)
    pub version: String,
}

/// Парсит строку вида:
/// "GET /health HTTP/1.1"
///
/// Хвостовые `\r\n` допускаются (строка обычно приходит из `read_line`).
pub fn parse_request_line(line: &str) -> Result<RequestLine, HttpError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(HttpError::EmptyRequest);
    }

    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(HttpError::EmptyRequest)?;
    let target = parts.next().ok_or(HttpError::MissingTarget)?;
    let version = parts.next().ok_or(HttpError::MissingVersion)?;

    if parts.next().is_some() {
        return Err(HttpError::ExtraParts);
    }

    if !version.starts_with("HTTP/") {
        return Err(HttpError::BadVersion(version.to_string()));
    }

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Текст статуса для кодов, которыми отвечает сервер
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Полный HTTP/1.1 ответ с текстовым телом (один запрос на соединение)
pub fn text_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_get() {
        let req = parse_request_line("GET / HTTP/1.1").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.target, "/");
        assert_eq!(req.version, "HTTP/1.1");
    }

    #[test]
    fn trailing_crlf_is_tolerated() {
        let req = parse_request_line("GET /health HTTP/1.0\r\n").unwrap();
        assert_eq!(req.target, "/health");
        assert_eq!(req.version, "HTTP/1.0");
    }

    #[test]
    fn empty_line_is_rejected() {
        assert_eq!(parse_request_line("\r\n"), Err(HttpError::EmptyRequest));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(parse_request_line("GET"), Err(HttpError::MissingTarget));
        assert_eq!(parse_request_line("GET /"), Err(HttpError::MissingVersion));
    }

    #[test]
    fn extra_fields_are_rejected() {
        assert_eq!(
            parse_request_line("GET / HTTP/1.1 junk"),
            Err(HttpError::ExtraParts)
        );
    }

    #[test]
    fn bad_version_is_rejected() {
        assert_eq!(
            parse_request_line("GET / SPDY/3"),
            Err(HttpError::BadVersion("SPDY/3".to_string()))
        );
    }

    #[test]
    fn text_response_carries_length_and_body() {
        let resp = text_response(200, "hello\n");
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.contains("Content-Length: 6\r\n"));
        assert!(resp.contains("Connection: close\r\n"));
        assert!(resp.ends_with("\r\n\r\nhello\n"));
    }

    #[test]
    fn empty_body_has_zero_length() {
        let resp = text_response(503, "");
        assert!(resp.starts_with("HTTP/1.1 503 Service Unavailable\r\n"));
        assert!(resp.contains("Content-Length: 0\r\n"));
        assert!(resp.ends_with("\r\n\r\n"));
    }
}
