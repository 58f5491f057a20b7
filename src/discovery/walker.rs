use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::reporting::logging;

/// Walk every root and hand each non-directory entry to `visit`.
///
/// Every file is visited: hidden files and ignore files (`.gitignore` and
/// friends) do not filter anything. The first error under a root is logged and
/// ends the walk of that root; the remaining roots are still walked. `visit`
/// returning `false` stops the whole walk.
///
/// Returns the number of roots whose walk ended in an error.
pub fn walk_paths<F>(roots: &[PathBuf], follow_links: bool, mut visit: F) -> usize
where
    F: FnMut(PathBuf) -> bool,
{
    let mut errors = 0;

    for root in roots {
        match walk_root(root, follow_links, &mut visit) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                logging::log_walk_error(root, &err);
                errors += 1;
            }
        }
    }

    errors
}

fn walk_root<F>(root: &Path, follow_links: bool, visit: &mut F) -> Result<bool, ignore::Error>
where
    F: FnMut(PathBuf) -> bool,
{
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(follow_links);

    for entry in builder.build() {
        let entry = entry?;
        let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
        if !is_dir && !visit(entry.into_path()) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Walk on the blocking pool, streaming discovered files as they are found.
///
/// The receiver ends once every root has been walked; the handle yields the
/// number of roots that failed.
pub fn spawn_walk(
    roots: Vec<PathBuf>,
    follow_links: bool,
) -> (UnboundedReceiver<PathBuf>, JoinHandle<usize>) {
    let (discovered, files) = mpsc::unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || {
        walk_paths(&roots, follow_links, |path| discovered.send(path).is_ok())
    });

    (files, handle)
}
