use crossbeam_channel::tick;
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::WORKER_POLL_TICK;
use crate::source;
use crate::store::QuoteStore;

/// Единственная точка перезагрузки: сюда сходятся и таймер, и SIGHUP.
/// Ошибка источника логируется, текущее состояние store остаётся как было.
pub(crate) fn attempt_reload(source_id: &str, store: &QuoteStore) {
    match source::fetch_quotes(source_id) {
        Ok(quotes) => {
            let n = quotes.len();
            store.reload(quotes);
            debug!("quotes reloaded: {n} entries; cached quote reselected");
        }
        Err(e) => warn!("reload failed, keeping previous quotes: {e}"),
    }
}

/// Периодический воркер перезагрузки. Запускается только при interval > 0.
pub(crate) fn run_reload_ticker(
    interval: Duration,
    source_id: String,
    store: Arc<QuoteStore>,
    shutdown: Arc<AtomicBool>,
) {
    let ticker = tick(interval);

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match ticker.recv_timeout(WORKER_POLL_TICK) {
            Ok(_) => attempt_reload(&source_id, &store),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                // ничего, просто тик для проверки shutdown
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }
}
