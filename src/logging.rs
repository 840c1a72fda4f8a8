use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Log file used while the terminal is in raw mode
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("folio-inbox/folio-inbox.log"))
}

fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
}

/// Route logs to the cache-dir log file so they don't draw over the UI.
/// Falls back to stderr if the file can't be opened.
pub fn init_file() {
    let mut builder = builder();
    if let Some(path) = log_path() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = builder.try_init();
}

pub fn init_stderr() {
    let _ = builder().try_init();
}
