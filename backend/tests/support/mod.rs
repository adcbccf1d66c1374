use std::sync::Mutex;

// Config loading reads process-global env vars, so tests that touch them
// must not overlap.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given environment overrides in place, restoring the
/// previous values afterwards (also on panic). `None` unsets a variable.
pub fn with_scoped_env<F, R>(overrides: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let restore: Vec<(String, Option<String>)> = overrides
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    let _guard = RestoreEnv(restore);

    for (key, value) in overrides {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    f()
}

struct RestoreEnv(Vec<(String, Option<String>)>);

impl Drop for RestoreEnv {
    fn drop(&mut self) {
        for (key, value) in self.0.drain(..) {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}
