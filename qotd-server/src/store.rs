use rand::Rng;
use std::sync::RwLock;

/// Хранилище цитат: текущий набор плюс (опционально) закешированный выбор.
///
/// Читатели (обработчики запросов) берут shared-блокировку, перезагрузка и
/// ротация кеша — exclusive. Блокировка держится только на время подмены
/// уже подготовленного состояния, I/O под ней не выполняется. Закешированная
/// цитата хранится как собственная копия, а не ссылка в набор: перезагрузка
/// подменяет набор целиком, и их времена жизни независимы.
pub(crate) struct QuoteStore {
    caching: bool,
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    quotes: Vec<String>,
    cached: Option<String>,
}

impl QuoteStore {
    pub(crate) fn new(caching: bool) -> Self {
        Self {
            caching,
            state: RwLock::new(State::default()),
        }
    }

    /// Подменяет набор целиком. При включённом кеше сразу перевыбирает
    /// закешированную цитату из нового набора (None, если набор пуст).
    pub(crate) fn reload(&self, new_quotes: Vec<String>) {
        let mut st = match self.state.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        };

        st.quotes = new_quotes;
        if self.caching {
            st.cached = pick(&st.quotes);
        }
    }

    /// Цитата для ответа: при включённом кеше — текущий закешированный
    /// выбор без новой случайности, иначе — независимый равномерный выбор
    /// на каждый вызов. None, если отдавать нечего.
    pub(crate) fn select(&self) -> Option<String> {
        let st = match self.state.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        if self.caching {
            return st.cached.clone();
        }

        pick(&st.quotes)
    }

    /// Перевыбор закешированной цитаты из текущего набора.
    /// Возвращает true, если что-то выбрано (набор непуст).
    pub(crate) fn rotate_cache(&self) -> bool {
        let mut st = match self.state.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        st.cached = pick(&st.quotes);
        st.cached.is_some()
    }

    /// Есть ли хоть одна цитата (для /health)
    pub(crate) fn has_quotes(&self) -> bool {
        let st = match self.state.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        !st.quotes.is_empty()
    }
}

/// Равномерный выбор: копия случайного элемента, None на пустом наборе
fn pick(quotes: &[String]) -> Option<String> {
    if quotes.is_empty() {
        return None;
    }

    let idx = rand::rng().random_range(0..quotes.len());
    Some(quotes[idx].clone())
}
