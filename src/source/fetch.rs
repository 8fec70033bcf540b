//! Source archive download and extraction
//!
//! Archives served for a reference contain exactly one top-level directory
//! (`<owner>-<repo>-<sha>/`); its contents become the build directory.

use crate::error::{InstallError, InstallResult};
use crate::fsutil::{move_dir_or_copy, remove_dir_if_exists};
use crate::github::SourceHost;
use crate::ui::{self, UiContext};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, warn};

/// Download the archive for `reference` and place its single top-level
/// directory at `target`
///
/// `work_root` holds the temporary download and extraction directories.
pub async fn fetch_source(
    ctx: &UiContext,
    host: &dyn SourceHost,
    name: &str,
    reference: &str,
    target: &Path,
    work_root: &Path,
) -> InstallResult<()> {
    ui::info(ctx, &format!("Downloading {} source for {}", name, reference));
    let url = host.archive_url(reference).await?;
    debug!("Archive for {} is at {}", reference, url);

    let staging = work_root.join(format!("install-sfml-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&staging)
        .map_err(|e| InstallError::io(format!("creating {}", staging.display()), e))?;

    let result = download_and_place(ctx, host, name, &url, &staging, target).await;

    if let Err(e) = remove_dir_if_exists(&staging) {
        warn!("Failed to clean up {}: {}", staging.display(), e);
    }
    result
}

async fn download_and_place(
    ctx: &UiContext,
    host: &dyn SourceHost,
    name: &str,
    url: &str,
    staging: &Path,
    target: &Path,
) -> InstallResult<()> {
    let archive = staging.join("source.tar.gz");
    host.download(url, &archive).await?;

    ui::info(ctx, &format!("Extracting {} source", name));
    let extracted = staging.join("extracted");
    let target = target.to_path_buf();
    tokio::task::spawn_blocking(move || {
        extract_tarball(&archive, &extracted)?;
        let root = only_subdir(&extracted)?;
        move_dir_or_copy(&root, &target)
    })
    .await
    .map_err(|e| InstallError::Internal(format!("extraction task failed: {}", e)))?
}

/// Unpack a gzip-compressed tarball into `dest`
pub(crate) fn extract_tarball(archive: &Path, dest: &Path) -> InstallResult<()> {
    let file = File::open(archive)
        .map_err(|e| InstallError::io(format!("opening {}", archive.display()), e))?;
    fs::create_dir_all(dest)
        .map_err(|e| InstallError::io(format!("creating {}", dest.display()), e))?;
    Archive::new(GzDecoder::new(file))
        .unpack(dest)
        .map_err(|e| InstallError::io(format!("extracting {}", archive.display()), e))
}

/// The single directory inside `path`, or `UnexpectedArchiveLayout`
pub fn only_subdir(path: &Path) -> InstallResult<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| InstallError::io(format!("reading {}", path.display()), e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(|e| InstallError::io(format!("reading {}", path.display()), e))?;

    if entries.len() == 1 && entries[0].is_dir() {
        return Ok(entries.remove(0));
    }

    let mut names: Vec<String> = entries
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect();
    names.sort();
    Err(InstallError::UnexpectedArchiveLayout {
        path: path.to_path_buf(),
        entries: names,
    })
}
