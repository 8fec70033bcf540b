//! Filesystem helpers for relocating directory trees

use crate::error::{InstallError, InstallResult};
use std::fs;
use std::path::Path;

/// Move `src` to `dst`, replacing `dst`. Falls back to copy + delete when
/// a rename is not possible (e.g. across filesystems).
pub fn move_dir_or_copy(src: &Path, dst: &Path) -> InstallResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| InstallError::io(format!("creating {}", parent.display()), e))?;
    }
    remove_dir_if_exists(dst)?;

    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            copy_dir_recursive(src, dst)?;
            fs::remove_dir_all(src)
                .map_err(|e| InstallError::io(format!("removing {}", src.display()), e))
        }
    }
}

/// Remove a directory tree, ignoring a missing one
pub fn remove_dir_if_exists(path: &Path) -> InstallResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InstallError::io(format!("removing {}", path.display()), e)),
    }
}

/// Recursively copy a directory tree, preserving symlinks on Unix
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> InstallResult<()> {
    fs::create_dir_all(dst)
        .map_err(|e| InstallError::io(format!("creating {}", dst.display()), e))?;
    let entries =
        fs::read_dir(src).map_err(|e| InstallError::io(format!("reading {}", src.display()), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| InstallError::io(format!("reading {}", src.display()), e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let metadata = fs::symlink_metadata(&src_path)
            .map_err(|e| InstallError::io(format!("inspecting {}", src_path.display()), e))?;
        if metadata.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
            continue;
        }

        #[cfg(unix)]
        if metadata.file_type().is_symlink() {
            let target = fs::read_link(&src_path)
                .map_err(|e| InstallError::io(format!("reading link {}", src_path.display()), e))?;
            std::os::unix::fs::symlink(&target, &dst_path).map_err(|e| {
                InstallError::io(format!("creating link {}", dst_path.display()), e)
            })?;
            continue;
        }

        fs::copy(&src_path, &dst_path).map_err(|e| {
            InstallError::io(
                format!("copying {} to {}", src_path.display(), dst_path.display()),
                e,
            )
        })?;
    }
    Ok(())
}
