//! Filesystem staging helpers: recursive copy and zip assembly.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::error::{Error, Result};

fn relative_to<'a>(path: &'a Path, root: &Path) -> Result<&'a Path> {
    path.strip_prefix(root).map_err(|_| Error::OutsideStagingTree {
        path: path.to_path_buf(),
    })
}

/// Copy `src` into `dst` recursively, keeping directory structure and
/// file permissions (`fs::copy` carries permission bits over).
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = relative_to(entry.path(), src)?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| Error::Write {
                path: target.clone(),
                source,
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|source| Error::Copy {
                path: entry.path().to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Zip the tree rooted at `root` into an in-memory archive.
///
/// Entry names are relative to `root`, with `/` separators. Entries are
/// sorted so the same tree always produces the same archive.
pub fn zip_dir(root: &Path) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = relative_to(entry.path(), root)?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let options = entry_options(&entry)?;
        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else {
            writer.start_file(name, options)?;
            let data = fs::read(entry.path()).map_err(|source| Error::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            writer.write_all(&data).map_err(|source| Error::Write {
                path: entry.path().to_path_buf(),
                source,
            })?;
        }
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(unix)]
fn entry_options(entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;

    let mode = entry.metadata()?.permissions().mode();
    Ok(SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(mode))
}

#[cfg(not(unix))]
fn entry_options(_entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    Ok(SimpleFileOptions::default().compression_method(CompressionMethod::Deflated))
}
