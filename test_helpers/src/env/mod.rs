//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns a guard that
//! restores the previous value (or removes the variable) when dropped.
//! Guards for the same key restore in LIFO order. Hold [`lock`] when a test
//! reads several variables that other tests may touch.
//!
//! # Examples
//!
//! ```
//! use blendconf_test_helpers::env;
//!
//! let _g = env::set_var("BLENDCONF_DOC_EXAMPLE", "1");
//! assert_eq!(std::env::var("BLENDCONF_DOC_EXAMPLE").ok().as_deref(), Some("1"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Guard that keeps the environment lock for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

/// Sets `key` to `value` and returns a guard restoring the prior state.
///
/// # Examples
///
/// ```
/// use blendconf_test_helpers::env;
///
/// let _g = env::set_var("BLENDCONF_STRATEGY", "override");
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), |k| {
        // SAFETY: called with `ENV_MUTEX` held.
        unsafe { env::set_var(k, value.as_ref()) };
    })
}

/// Removes `key` and returns a guard restoring the prior state.
///
/// # Examples
///
/// ```
/// use blendconf_test_helpers::env;
///
/// let _g = env::remove_var("BLENDCONF_STRATEGY");
/// assert!(std::env::var("BLENDCONF_STRATEGY").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    mutate(key.into(), |k| {
        // SAFETY: called with `ENV_MUTEX` held.
        unsafe { env::remove_var(k) };
    })
}

/// Acquire the global environment lock until the returned guard drops.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] still work on
/// the same thread while it is held.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}
