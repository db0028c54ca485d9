use std::path::Path;

use actix_files::Files;

/// Assets for the editor page, served under `/static`.
pub fn static_files(dir: &Path) -> Files {
    Files::new("/static", dir)
}
