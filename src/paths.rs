use std::path::PathBuf;

/// Base directory for all framectl data
pub fn base_dir() -> PathBuf {
    PathBuf::from("/var/lib/framectl")
}

/// Default configuration file
pub fn default_config_path() -> PathBuf {
    PathBuf::from("/etc/framectl/config.json")
}

/// Default directory for the mode store
pub fn default_store_dir() -> PathBuf {
    base_dir().join("store")
}

/// Default lock file, used when DPF_MODE_LOCK_FILE is not set
pub fn default_lock_file() -> PathBuf {
    PathBuf::from("/run/framectl/mode.lock")
}
