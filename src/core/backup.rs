use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a consistent copy of the database to `dest_file`.
    ///
    /// `VACUUM INTO` is used instead of a file copy so the backup is safe to
    /// take while the daemon is writing. An existing destination is only
    /// replaced with `force`.
    pub fn backup(
        pool: &mut DbPool,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Both targets are checked before anything is written.
        let zip_path = compress.then(|| dest.with_extension("zip"));
        for target in std::iter::once(dest).chain(zip_path.as_deref()) {
            if target.exists() && !force {
                return Err(AppError::Other(format!(
                    "'{}' already exists (use --force to overwrite)",
                    target.display()
                )));
            }
        }

        if dest.exists() {
            fs::remove_file(dest)?;
        }

        let dest_str = dest.to_string_lossy().to_string();
        pool.conn.execute("VACUUM INTO ?1", [dest_str.as_str()])?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if let Some(zip_path) = zip_path {
            let compressed = compress_backup(dest, &zip_path)?;

            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {e}"));
            } else {
                info(format!("Removed uncompressed backup: {}", dest.display()));
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        ttlog_quiet(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }
}

/// Compress a backup into `zip_path`, replacing it if present.
fn compress_backup(path: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "fuellog.sqlite".to_string());

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path.to_path_buf())
}
