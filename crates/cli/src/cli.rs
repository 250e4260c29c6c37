//! CLI definitions and command dispatch.

use std::{env, fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;

use fontmod_packager::{ModuleMetadata, ModulePackager};

#[derive(Parser)]
#[command(name = "fontmod")]
#[command(about = "Package a custom font into a flashable font module")]
pub struct Cli {
    /// Path to the replacement font file.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Base font config, e.g. "/system/etc/fonts.xml" pulled from a device.
    /// Defaults to the bundled template's copy.
    #[arg(long)]
    pub font_config: Option<PathBuf>,

    /// Human readable font name, used for metadata and archive naming.
    #[arg(long)]
    pub font_name: Option<String>,

    /// Module template directory.
    #[arg(long, default_value = "template")]
    pub template: PathBuf,

    /// Module author written to module.prop.
    #[arg(long)]
    pub author: Option<String>,

    /// Directory the finished archive is copied into.
    #[arg(long, default_value = ".")]
    pub output: PathBuf,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let font = match &self.font {
            Some(font) if font.is_file() => font.clone(),
            _ => {
                println!("No font file set or font file does not exist!");
                process::exit(-1);
            }
        };

        let font_config = self
            .font_config
            .clone()
            .unwrap_or_else(|| self.template.join("system/etc/fonts.xml"));
        if !font_config.is_file() {
            println!("Font config file does not exist!");
        }

        let font_name = match self.font_name {
            Some(ref name) => name.clone(),
            None => font
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_owned)
                .context("font path has no usable file name")?,
        };
        let author = self
            .author
            .clone()
            .or_else(|| env::var("USER").ok())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = ModuleMetadata::new()
            .with("id", &font_name)
            .with("name", &font_name)
            .with("version", "1.0")
            .with("versionCode", "1")
            .with("author", author)
            .with("description", format!("Replace default font with {font_name}"));

        println!("Packaging {font_name}");
        let packager = ModulePackager::new(&self.template, &font, &font_config, &font_name);
        let archive = packager.package_module(&metadata)?;

        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.display())
        })?;
        let file_name = archive
            .file_name()
            .context("archive path has no file name")?;
        let dest = self.output.join(file_name);
        fs::copy(&archive, &dest)
            .with_context(|| format!("Failed to copy archive to {}", dest.display()))?;

        println!("Module archive: {}", dest.display());
        Ok(())
    }
}
