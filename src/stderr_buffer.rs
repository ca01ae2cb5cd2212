use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding back warnings so they print after the rendered leaderboard
/// instead of interleaving with it.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop buffering and return all held warnings.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Stop buffering and print all held warnings to stderr.
pub fn flush() {
    for msg in drain() {
        eprintln!("{}", msg);
    }
}

/// Emit a warning: held while buffering is active, printed to stderr otherwise.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `eprintln!` that routes through the warning buffer when it is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
