//! Single-listener observable values.
//!
//! An [`Observable`] holds a current value and at most one listener. The
//! listener fires synchronously on the writing thread for every write, and
//! once on subscription if a value is already present.
//!
//! ```text
//! set(v) ──► value = v ──► listener(&v)
//! subscribe(l) ──► listener = l ──► l(&value)   (replay, if a value is set)
//! ```
//!
//! # Thread Safety
//!
//! Writers are serialized by a re-entrant dispatch lock, so a listener sees
//! writes in the order they happened even when several threads write. The
//! value itself sits behind a separate short-lived lock, which lets a
//! listener call [`Observable::get`] on the observable it is attached to.
//! A listener may also write to its own observable; the nested write is
//! delivered immediately, before the outer write returns.
//!
//! # Example
//!
//! ```
//! use speedpanel::observable::Observable;
//!
//! let loading = Observable::new(false);
//! loading.subscribe(|busy: &bool| println!("busy = {busy}"));
//! loading.set(true);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};

/// Callback type invoked with every value written to an observable.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

struct Slot<T> {
    value: Option<T>,
    listener: Option<Listener<T>>,
}

/// A value container that notifies one listener on every write.
pub struct Observable<T> {
    slot: Mutex<Slot<T>>,
    dispatch: ReentrantMutex<()>,
}

impl<T> Observable<T>
where
    T: Clone + Send + 'static,
{
    /// Create an observable holding `value`.
    pub fn new(value: T) -> Self {
        Self::with_value(Some(value))
    }

    /// Create an observable with no value yet.
    ///
    /// Subscribing to an empty observable does not replay anything.
    pub fn empty() -> Self {
        Self::with_value(None)
    }

    fn with_value(value: Option<T>) -> Self {
        Self {
            slot: Mutex::new(Slot {
                value,
                listener: None,
            }),
            dispatch: ReentrantMutex::new(()),
        }
    }

    /// Register the listener, replacing any previous one.
    ///
    /// If a value is present the listener is invoked once with it before this
    /// method returns.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _dispatch = self.dispatch.lock();
        let listener: Listener<T> = Arc::new(listener);
        let replay = {
            let mut slot = self.slot.lock();
            slot.listener = Some(Arc::clone(&listener));
            slot.value.clone()
        };
        if let Some(value) = replay {
            listener(&value);
        }
    }

    /// Store `value` and notify the listener.
    pub fn set(&self, value: T) {
        let _dispatch = self.dispatch.lock();
        let listener = {
            let mut slot = self.slot.lock();
            slot.value = Some(value.clone());
            slot.listener.clone()
        };
        if let Some(listener) = listener {
            listener(&value);
        }
    }

    /// Current value, if one has been written.
    pub fn try_get(&self) -> Option<T> {
        self.slot.lock().value.clone()
    }

    /// Whether a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.slot.lock().listener.is_some()
    }
}

impl<T> Observable<T>
where
    T: Clone + Default + Send + 'static,
{
    /// Current value, or `T::default()` for an empty observable.
    pub fn get(&self) -> T {
        self.try_get().unwrap_or_default()
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("has_listener", &slot.listener.is_some())
            .finish()
    }
}
