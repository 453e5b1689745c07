//! # qotd-core
//!
//! Базовые разборщики и протокольные хелперы для qotd-server.
//!
//! Этот крейт содержит:
//!
//! - [`parse`] — разбор текстового источника цитат (абзацы, комментарии, экранирование)
//! - [`http`] — минимальный разбор request line и форматирование ответов
//! - [`duration`] — разбор длительностей вида `30s`, `5m`, `1h30m`
//! - [`error`] — типы ошибок, которые возвращают компоненты `qotd-core`
//!
//! ## Быстрый пример: разбор источника цитат
//!
//! ```rust
//! use qotd_core::parse::read_quotes;
//! use std::io::Cursor;
//!
//! let input = "first\n\n# a comment\nsecond\nline\n";
//! let quotes = read_quotes(Cursor::new(input)).unwrap();
//! assert_eq!(quotes, vec!["first".to_string(), "second\nline".to_string()]);
//! ```
//!
//! ## Пример: request line
//!
//! ```rust
//! use qotd_core::http::parse_request_line;
//!
//! let req = parse_request_line("GET /health HTTP/1.1\r\n").unwrap();
//! assert_eq!(req.method, "GET");
//! assert_eq!(req.target, "/health");
//! ```
//!
//! ## Пример: длительности
//!
//! ```rust
//! use qotd_core::duration::parse_duration;
//! use std::time::Duration;
//!
//! assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
//! assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
//! ```
//!
//! ## Дизайн
//!
//! `qotd-core` задуман как лёгкая зависимость для сервера и его тестов.
//! Поэтому здесь держим только чистый разбор текста и форматирование,
//! без I/O за пределами `std::io::Read` и без тяжёлых зависимостей.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Разбор текстового источника цитат.
pub mod parse;

/// Минимальный HTTP-слой: request line и текстовые ответы.
pub mod http;

/// Разбор длительностей (`30s`, `5m`, `1h30m`, `500ms`).
pub mod duration;

/// Ошибки `qotd-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{DurationError, HttpError, QotdCoreError};
pub use crate::http::RequestLine;
