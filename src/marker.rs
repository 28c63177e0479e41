use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bizwordle";
const MARKER_FILE: &str = "has_played";

/// Where the "has played before" flag lives, if the platform has a local data directory.
pub fn get_marker_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(MARKER_FILE))
}

pub fn has_played(path: &Path) -> bool {
    path.is_file()
}

pub fn mark_played(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "true\n")
}

/// Decides whether to open with the instructions, recording the visit on the way.
///
/// Instructions show on the first visit or when forced. Marker I/O problems are logged and count as a first visit.
pub fn should_show_instructions(path: Option<&Path>, force: bool) -> bool {
    let Some(path) = path else {
        log::warn!("No local data directory; instructions will show every time");
        return true;
    };
    if has_played(path) {
        return force;
    }
    if let Err(e) = mark_played(path) {
        log::warn!("Failed to write marker {}: {e}", path.display());
    }
    true
}
