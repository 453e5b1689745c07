use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum QotdCoreError {
    /// Ошибки разбора HTTP-запроса
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Ошибки разбора длительности
    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Ошибки разбора request line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HttpError {
    /// Пустая request line
    #[error("empty request line")]
    EmptyRequest,

    /// Нет request target
    #[error("missing request target")]
    MissingTarget,

    /// Нет версии протокола
    #[error("missing protocol version")]
    MissingVersion,

    /// Лишние поля в request line
    #[error("malformed request line")]
    ExtraParts,

    /// Неверная версия протокола
    #[error("bad protocol version: {0}")]
    BadVersion(String),
}

/// Ошибки разбора длительности
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    /// Пустая строка
    #[error("empty duration")]
    Empty,

    /// Число без единицы измерения
    #[error("missing unit in duration: {0}")]
    MissingUnit(String),

    /// Единица без числа
    #[error("missing value in duration: {0}")]
    MissingValue(String),

    /// Число не помещается в u64
    #[error("bad numeric value in duration: {0}")]
    BadValue(String),

    /// Неизвестная единица измерения
    #[error("unknown duration unit: {0}")]
    UnknownUnit(String),
}
