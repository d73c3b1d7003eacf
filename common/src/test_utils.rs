//! Helpers for tests that need files on disk.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Scratch directory shared by all crates: `<workspace>/target/test_output`.
fn output_dir() -> &'static PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .expect("common crate lives inside the workspace")
            .to_path_buf();
        let dir = workspace.join("target").join("test_output");
        std::fs::create_dir_all(&dir).expect("failed to create test output directory");
        dir
    })
}

/// Path of a scratch file named `name`. The file itself is not created.
pub fn test_output_path(name: &str) -> PathBuf {
    output_dir().join(name)
}
