//! Module staging and archive orchestration.

use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use log::info;
use tempfile::TempDir;

use crate::{
    error::{Error, Result},
    metadata::ModuleMetadata,
    stage::{copy_dir, zip_dir},
};

/// module.prop location, relative to the module root.
const MODULE_PROP: &str = "module.prop";

/// Font destination directory, relative to the module root.
const FONTS_DIR: &str = "system/fonts";

/// Font configuration location, relative to the module root.
const FONT_XML: &str = "system/etc/fonts.xml";

/// Packages one font file into a flashable module archive.
///
/// All staging happens in a scoped temporary directory that is removed
/// when [`ModulePackager::package_module`] returns, on success and on
/// error alike. Only the finished archive, written to the system temp
/// directory, outlives the call; moving it somewhere durable is the
/// caller's job.
pub struct ModulePackager {
    template_dir: PathBuf,
    font_path: PathBuf,
    base_font_xml: PathBuf,
    font_name: String,
}

impl ModulePackager {
    pub fn new(
        template_dir: impl Into<PathBuf>,
        font_path: impl Into<PathBuf>,
        base_font_xml: impl Into<PathBuf>,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            template_dir: template_dir.into(),
            font_path: font_path.into(),
            base_font_xml: base_font_xml.into(),
            font_name: font_name.into(),
        }
    }

    /// Stage the template, font, metadata, and merged font configuration,
    /// then zip the tree into `<temp dir>/<font name>.zip`.
    ///
    /// The font and template are checked up front, before any staging
    /// directory is created. The archive lands in the shared temp
    /// location only after every staging step has succeeded.
    pub fn package_module(&self, metadata: &ModuleMetadata) -> Result<PathBuf> {
        if !self.font_path.is_file() {
            return Err(Error::MissingFont {
                path: self.font_path.clone(),
            });
        }
        if !self.template_dir.is_dir() {
            return Err(Error::MissingTemplate {
                path: self.template_dir.clone(),
            });
        }
        let font_file_name = self
            .font_path
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::NoFileName {
                path: self.font_path.clone(),
            })?
            .to_string();

        let staging = TempDir::new().map_err(Error::Staging)?;
        let tree_name = self
            .template_dir
            .file_name()
            .unwrap_or_else(|| OsStr::new("module"));
        let root = staging.path().join(tree_name);

        info!("Staging module template from {}", self.template_dir.display());
        copy_dir(&self.template_dir, &root)?;

        let font_dest = root.join(FONTS_DIR).join(&font_file_name);
        self.ensure_parent_dir(&font_dest)?;
        fs::copy(&self.font_path, &font_dest).map_err(|source| Error::Copy {
            path: self.font_path.clone(),
            source,
        })?;

        let prop_path = root.join(MODULE_PROP);
        write_file(&prop_path, metadata.to_prop_string())?;

        let merged = fontmod_fontconfig::transform(&self.base_font_xml, &font_file_name)?;
        let xml_path = root.join(FONT_XML);
        self.ensure_parent_dir(&xml_path)?;
        write_file(&xml_path, merged)?;

        let archive = zip_dir(&root)?;
        let archive_path = env::temp_dir().join(format!("{}.zip", self.font_name));
        write_file(&archive_path, archive)?;

        info!("Module archive written to {}", archive_path.display());
        Ok(archive_path)
    }

    fn ensure_parent_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

fn write_file(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, data).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
