use crossbeam_channel::tick;
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::WORKER_POLL_TICK;
use crate::store::QuoteStore;

/// Воркер ротации кеша. Запускается только при duration > 0.
///
/// Расписание независимо от перезагрузок: reload перевыбирает кеш сам,
/// но этот таймер не сдвигает — очередная ротация придёт в своё время.
pub(crate) fn run_cache_rotator(every: Duration, store: Arc<QuoteStore>, shutdown: Arc<AtomicBool>) {
    let ticker = tick(every);

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match ticker.recv_timeout(WORKER_POLL_TICK) {
            Ok(_) => {
                if store.rotate_cache() {
                    debug!("cached quote reselected");
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                // ничего, просто тик для проверки shutdown
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }
}
