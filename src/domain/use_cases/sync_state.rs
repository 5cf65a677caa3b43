//! Load bookkeeping shared by the prototype and comment stores.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Loading,
    Ready,
    Error,
}

/// What a consumer should render for a collection.
#[derive(Debug, PartialEq, Eq)]
pub enum CollectionView<'a, T> {
    Loading,
    Failed(&'a str),
    Ready(&'a [T]),
}

/// Point-in-time copy of a store's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
    pub phase: LoadPhase,
    /// Only true until the first load settles. Reloads keep showing the last
    /// known-good items instead.
    pub is_loading: bool,
}

impl<T> StoreSnapshot<T> {
    pub fn view(&self) -> CollectionView<'_, T> {
        if let Some(error) = &self.error {
            CollectionView::Failed(error)
        } else if self.is_loading {
            CollectionView::Loading
        } else {
            CollectionView::Ready(&self.items)
        }
    }
}

/// The authoritative copy of a collection plus its load status.
///
/// Items are only ever replaced wholesale by a completed load; a failed
/// load records the error and keeps the previous items.
#[derive(Debug)]
pub struct SyncedCollection<T> {
    items: Vec<T>,
    error: Option<String>,
    phase: LoadPhase,
    settled_once: bool,
    in_flight: usize,
}

impl<T> Default for SyncedCollection<T> {
    fn default() -> Self {
        SyncedCollection {
            items: Vec::new(),
            error: None,
            phase: LoadPhase::Uninitialized,
            settled_once: false,
            in_flight: 0,
        }
    }
}

impl<T: Clone> SyncedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        !self.settled_once
    }

    pub fn begin_load(&mut self) {
        self.in_flight += 1;
        self.phase = LoadPhase::Loading;
    }

    /// Whichever load completes last wins, regardless of issue order.
    pub fn finish_ok(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
        self.settle(LoadPhase::Ready);
    }

    pub fn finish_err(&mut self, message: String) {
        self.error = Some(message);
        self.settle(LoadPhase::Error);
    }

    fn settle(&mut self, outcome: LoadPhase) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.settled_once = true;
        self.phase = if self.in_flight > 0 { LoadPhase::Loading } else { outcome };
    }

    pub fn snapshot(&self) -> StoreSnapshot<T> {
        StoreSnapshot {
            items: self.items.clone(),
            error: self.error.clone(),
            phase: self.phase,
            is_loading: self.is_loading(),
        }
    }
}
