use log::info;
use signal_hook::consts::{SIGHUP, SIGTERM};
use signal_hook::iterator::Signals;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::reload;
use crate::store::QuoteStore;

/// Поток-наблюдатель за сигналами демона.
///
/// SIGHUP — синхронная перезагрузка источника, SIGTERM — остановка.
/// Ctrl+C (SIGINT) обслуживает ctrlc-обработчик в main.
pub(crate) fn run_signal_watcher(
    mut signals: Signals,
    source_id: String,
    store: Arc<QuoteStore>,
    shutdown: Arc<AtomicBool>,
) {
    for sig in signals.forever() {
        match sig {
            SIGHUP => {
                info!("caught SIGHUP; reloading quote source");
                reload::attempt_reload(&source_id, &store);
            }
            SIGTERM => {
                info!("caught SIGTERM; shutting down");
                shutdown.store(true, Ordering::Relaxed);
                break;
            }
            _ => {}
        }
    }
}
