//! Utility functions for formatting and lenient deserialization.

pub mod de;
pub mod format;

// Re-export commonly used functions at module level
pub use de::string_or_number;
pub use format::{format_date, format_optional, format_thousands, truncate_string};

/// Fresh scratch directory for tests that touch the filesystem
#[cfg(test)]
pub(crate) fn test_dir(name: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "houselink-{}-{}-{}",
        name,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create test dir");
    dir
}
