//! Точка входа `qotd-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI и инициализация логов
//! - обязательная первичная загрузка источника (ошибка здесь фатальна)
//! - обработчик Ctrl+C и наблюдатель SIGHUP/SIGTERM
//! - условный запуск периодической перезагрузки и ротации кеша
//! - HTTP-цикл приёма запросов до сигнала остановки

mod cli;
mod config;
mod http;
mod reload;
mod rotate;
mod signals;
mod source;
mod store;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use signal_hook::consts::{SIGHUP, SIGTERM};
use signal_hook::iterator::Signals;

use crate::store::QuoteStore;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Логи: --verbose => debug, иначе info; RUST_LOG имеет приоритет
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let caching = args.cache > Duration::ZERO;
    let store = Arc::new(QuoteStore::new(caching));

    // Первичная загрузка обязана пройти: без цитат не стартуем
    let quotes = source::fetch_quotes(&args.source)
        .with_context(|| format!("initial load of quote source {}", args.source))?;
    info!("loaded {} quote(s) from {}", quotes.len(), args.source);
    store.reload(quotes);

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let mut worker_handles = Vec::new();

    // SIGHUP => синхронный reload, SIGTERM => остановка
    let signals = Signals::new([SIGHUP, SIGTERM]).context("register signal watcher")?;
    let signals_handle = signals.handle();
    {
        let source_id = args.source.clone();
        let (store, shutdown) = (store.clone(), shutdown.clone());
        worker_handles.push(thread::spawn(move || {
            signals::run_signal_watcher(signals, source_id, store, shutdown)
        }));
    }

    if args.reload > Duration::ZERO {
        let source_id = args.source.clone();
        let (store, shutdown) = (store.clone(), shutdown.clone());
        let interval = args.reload;
        worker_handles.push(thread::spawn(move || {
            reload::run_reload_ticker(interval, source_id, store, shutdown)
        }));
    }

    if caching {
        let (store, shutdown) = (store.clone(), shutdown.clone());
        let every = args.cache;
        worker_handles.push(thread::spawn(move || {
            rotate::run_cache_rotator(every, store, shutdown)
        }));
    }

    let bind_addr = args.listen_addr().context("resolve listen address")?;
    let result = http::run_http_listener(bind_addr, store, shutdown.clone());

    // листенер вышел (или упал) => гасим фоновые воркеры и дожидаемся их
    shutdown.store(true, Ordering::Relaxed);
    signals_handle.close();
    for h in worker_handles {
        if h.join().is_err() {
            warn!("worker thread panicked");
        }
    }

    result
}
