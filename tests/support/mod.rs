//! Helpers shared by the integration test binaries.

use std::sync::Mutex;

/// Serializes tests that read or write process environment variables.
static ENV_GUARD: Mutex<()> = Mutex::new(());

/// Applies `vars` to the process environment, runs `f`, then puts back
/// whatever was there before. A value of `None` unsets the variable.
///
/// The environment is process-global and the test harness runs tests on
/// multiple threads, so every test touching it must go through here. The
/// restore happens in a drop guard and survives a panicking `f`.
pub fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let _lock = ENV_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = RestoreEnv::capture_and_set(vars);
    f()
}

/// Restores the captured variables when dropped.
struct RestoreEnv {
    saved: Vec<(String, Option<String>)>,
}

impl RestoreEnv {
    fn capture_and_set(vars: &[(&str, Option<&str>)]) -> Self {
        let mut saved: Vec<(String, Option<String>)> = Vec::with_capacity(vars.len());
        for &(key, value) in vars {
            // Only the first occurrence of a key holds its original value.
            if !saved.iter().any(|(k, _)| k == key) {
                saved.push((key.to_string(), std::env::var(key).ok()));
            }
            set_or_remove(key, value);
        }
        Self { saved }
    }
}

impl Drop for RestoreEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}
