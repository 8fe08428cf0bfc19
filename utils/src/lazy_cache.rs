//! A thread-safe, lazily-initialized value, in the spirit of the `LazyLock`
//! type the standard library stabilized in Rust 1.80. It is kept local so
//! the crates build on older toolchains, and so a poisoned initialization
//! surfaces as a typed error instead of an opaque panic.

use std::{cell::UnsafeCell, fmt, ops::Deref, sync::Once};

type LazyFn<T> = Box<dyn FnOnce() -> T + Send + Sync + 'static>;

/// A value that is computed at most once, on first access, and is immutable
/// afterwards. Concurrent first accesses are serialized by the inner
/// [Once], so sharing a `LazyCache` across threads is safe.
pub struct LazyCache<T> {
    once: Once,
    value: UnsafeCell<Option<T>>,
    init: UnsafeCell<Option<LazyFn<T>>>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LazyCacheError {
    LockPoisoned,
    UninitializedCache,
    MissingFunctionOrInitializedTwice,
}

// We never create a `&LazyFn<T>` from a `&LazyCache<T>`, so the bounds on
// `T` alone are enough.
unsafe impl<T: Send + Sync> Sync for LazyCache<T> {}
unsafe impl<T: Send> Send for LazyCache<T> {}

impl<T> LazyCache<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + Sync + 'static,
    {
        LazyCache {
            once: Once::new(),
            value: UnsafeCell::new(None),
            init: UnsafeCell::new(Some(Box::new(f))),
        }
    }

    /// Creates a new lazy value that is already initialized.
    pub fn preinit(value: T) -> LazyCache<T> {
        let once = Once::new();
        once.call_once(|| {});
        LazyCache {
            once,
            value: UnsafeCell::new(Some(value)),
            init: UnsafeCell::new(None),
        }
    }

    fn try_initialize(&self) -> Result<(), LazyCacheError> {
        let mut error = None;

        self.once.call_once_force(|state| {
            if state.is_poisoned() {
                error = Some(LazyCacheError::LockPoisoned);
                return;
            }

            let init_fn = unsafe { (*self.init.get()).take() };
            match init_fn {
                Some(f) => {
                    let value = f();
                    unsafe {
                        *self.value.get() = Some(value);
                    }
                }
                None => {
                    error = Some(LazyCacheError::MissingFunctionOrInitializedTwice);
                }
            }
        });

        if let Some(e) = error {
            return Err(e);
        }

        if self.once.is_completed() {
            Ok(())
        } else {
            Err(LazyCacheError::LockPoisoned)
        }
    }

    pub fn try_get(&self) -> Result<&T, LazyCacheError> {
        self.try_initialize()?;
        unsafe {
            (*self.value.get())
                .as_ref()
                .ok_or(LazyCacheError::UninitializedCache)
        }
    }

    pub fn get(&self) -> &T {
        self.try_get().unwrap()
    }
}

impl<T> Deref for LazyCache<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: read-only access to the value slot.
        let value = unsafe { &*self.value.get() };
        match value {
            Some(v) => f.debug_tuple("LazyCache").field(v).finish(),
            None => f.write_str("LazyCache(<uninitialized>)"),
        }
    }
}
