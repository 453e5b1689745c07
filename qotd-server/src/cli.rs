use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use qotd_core::duration::parse_duration;

use crate::config;

/// qotd-server — отдаёт случайную цитату по HTTP.
///
/// Источник цитат: локальный файл либо http(s) URL. Формат источника:
/// абзацы, разделённые пустыми строками; строки на `#` — комментарии.
/// SIGHUP перечитывает источник немедленно.
#[derive(Parser, Debug, Clone)]
#[command(name = "qotd-server", version, about)]
pub(crate) struct Args {
    /// Адрес, на котором слушаем, например [::1] или 0.0.0.0
    #[arg(long, default_value = config::DEFAULT_BIND_ADDR)]
    pub(crate) addr: String,

    /// Порт
    #[arg(long, default_value_t = config::DEFAULT_PORT)]
    pub(crate) port: u16,

    /// Интервал перечитывания источника, например 30s или 5m (0 = не перечитывать)
    #[arg(long, default_value = "0", value_parser = parse_duration)]
    pub(crate) reload: Duration,

    /// Сколько держать выбранную цитату в кеше, например 1m (0 = без кеша,
    /// каждый запрос тянет новую случайную цитату)
    #[arg(long, default_value = "0", value_parser = parse_duration)]
    pub(crate) cache: Duration,

    /// Подробный вывод: перезагрузки, ротации кеша, access-логи
    #[arg(long)]
    pub(crate) verbose: bool,

    /// Источник цитат: путь к файлу или http(s) URL
    #[arg(value_name = "SOURCE")]
    pub(crate) source: String,
}

impl Args {
    /// Резолвим addr:port в SocketAddr (берём первый результат)
    pub(crate) fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        let spec = format!("{}:{}", self.addr, self.port);
        spec.to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no addresses resolved for {spec}"),
            )
        })
    }
}
