//! Canonical on-disk locations for menu-helper.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Layout
//!
//! ```text
//! <data home>/
//! └── menu-helper/          # created with mode 0700
//!     ├── recipes.db        # SQLite store
//!     └── recipes.lock      # advisory lock held while the store is open
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Application directory name under the data home
pub const APP_DIR: &str = "menu-helper";

/// Database file name inside the application directory
pub const DATABASE_FILE: &str = "recipes.db";

/// Lock file name inside the application directory
pub const LOCK_FILE: &str = "recipes.lock";

/// Config file name inside `<config dir>/menu-helper/`
pub const CONFIG_FILE: &str = "config.yaml";

/// Application directory (`<data home>/menu-helper`)
pub fn app_dir(data_home: &Path) -> PathBuf {
    data_home.join(APP_DIR)
}

/// Database file (`<data home>/menu-helper/recipes.db`)
pub fn database_file(data_home: &Path) -> PathBuf {
    app_dir(data_home).join(DATABASE_FILE)
}

/// Lock file (`<data home>/menu-helper/recipes.lock`)
pub fn lock_file(data_home: &Path) -> PathBuf {
    app_dir(data_home).join(LOCK_FILE)
}

/// Default config file location, if the platform has a config directory
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Create a directory (and parents) readable only by its owner
pub fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_data_home() {
        let home = PathBuf::from("/data");
        assert_eq!(app_dir(&home), PathBuf::from("/data/menu-helper"));
        assert_eq!(
            database_file(&home),
            PathBuf::from("/data/menu-helper/recipes.db")
        );
        assert_eq!(
            lock_file(&home),
            PathBuf::from("/data/menu-helper/recipes.lock")
        );
    }

    #[test]
    fn test_default_config_file_name() {
        if let Some(path) = default_config_file() {
            assert!(path.ends_with("menu-helper/config.yaml"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_private_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join(APP_DIR);
        create_private_dir(&dir).unwrap();

        let mode = std::fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);

        // Existing directory is fine
        create_private_dir(&dir).unwrap();
    }
}
