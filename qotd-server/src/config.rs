use std::time::Duration;

pub(crate) const DEFAULT_BIND_ADDR: &str = "[::1]";
pub(crate) const DEFAULT_PORT: u16 = 8080;

/// шаг опроса shutdown-флага в accept-цикле
pub(crate) const ACCEPT_POLL_TICK: Duration = Duration::from_millis(50);

/// шаг опроса shutdown-флага в периодических воркерах
pub(crate) const WORKER_POLL_TICK: Duration = Duration::from_millis(200);

/// сколько ждём in-flight соединения при остановке
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// таймаут запроса к URL-источнику
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
