use std::{env, fs, io::Cursor, io::Read, path::Path};

use fontmod_fontconfig::Element;
use fontmod_packager::{Error, ModuleMetadata, ModulePackager};

const BASE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<familyset version="23">
    <family name="sans-serif">
        <font weight="400" style="normal">Roboto-Regular.ttf</font>
    </family>
    <family lang="ja">
        <font weight="400" style="normal">NotoSansCJK-Regular.ttc</font>
    </family>
</familyset>"#;

const FONT_BYTES: &[u8] = b"\x00\x01\x00\x00not-a-real-font";

fn make_template(root: &Path) {
    fs::create_dir_all(root.join("system/etc")).unwrap();
    fs::create_dir_all(root.join("system/fonts")).unwrap();
    fs::write(root.join("module.prop"), "id=placeholder\n").unwrap();
    fs::write(root.join("system/etc/fonts.xml"), BASE_XML).unwrap();
}

fn read_entry(archive_bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes.to_vec())).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = Vec::new();
    entry.read_to_end(&mut out).unwrap();
    out
}

#[test]
fn packages_template_font_and_config_into_zip() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    make_template(&template);

    let font = dir.path().join("PackagerTestFont.ttf");
    fs::write(&font, FONT_BYTES).unwrap();

    let metadata = ModuleMetadata::new()
        .with("id", "packager-test")
        .with("name", "Packager Test")
        .with("version", "1.0")
        .with("versionCode", "1")
        .with("author", "tester")
        .with("description", "Replace default font with Packager Test");

    let packager = ModulePackager::new(
        &template,
        &font,
        template.join("system/etc/fonts.xml"),
        "packager-test-module",
    );
    let archive_path = packager.package_module(&metadata).unwrap();
    assert_eq!(
        archive_path.file_name().and_then(|n| n.to_str()),
        Some("packager-test-module.zip")
    );

    let bytes = fs::read(&archive_path).unwrap();

    // module.prop carries exactly the supplied pairs, in order
    let prop = String::from_utf8(read_entry(&bytes, "module.prop")).unwrap();
    assert_eq!(
        prop,
        "id=packager-test\nname=Packager Test\nversion=1.0\nversionCode=1\n\
         author=tester\ndescription=Replace default font with Packager Test\n"
    );

    // the font is staged byte-identical under system/fonts/
    assert_eq!(
        read_entry(&bytes, "system/fonts/PackagerTestFont.ttf"),
        FONT_BYTES
    );

    // fonts.xml was replaced by the merged configuration
    let fonts_xml = read_entry(&bytes, "system/etc/fonts.xml");
    let merged = Element::parse(&fonts_xml).unwrap();
    let families: Vec<_> = merged
        .children
        .iter()
        .filter(|c| c.tag == "family")
        .collect();
    assert_eq!(families.len(), 5);
    assert_eq!(families[1].children.len(), 9);
    assert!(
        families[1]
            .children
            .iter()
            .all(|f| f.text.as_deref() == Some("PackagerTestFont.ttf"))
    );

    fs::remove_file(&archive_path).ok();
}

#[test]
fn missing_font_fails_before_staging() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    make_template(&template);

    let packager = ModulePackager::new(
        &template,
        dir.path().join("DoesNotExist.ttf"),
        template.join("system/etc/fonts.xml"),
        "missing-font-module",
    );
    let err = packager.package_module(&ModuleMetadata::new()).unwrap_err();
    assert!(matches!(err, Error::MissingFont { .. }));
    assert!(!env::temp_dir().join("missing-font-module.zip").exists());
}

#[test]
fn missing_template_fails() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("Font.ttf");
    fs::write(&font, FONT_BYTES).unwrap();

    let packager = ModulePackager::new(
        dir.path().join("no-template"),
        &font,
        dir.path().join("fonts.xml"),
        "missing-template-module",
    );
    let err = packager.package_module(&ModuleMetadata::new()).unwrap_err();
    assert!(matches!(err, Error::MissingTemplate { .. }));
}

#[test]
fn malformed_base_config_aborts_without_archive() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    make_template(&template);

    let bad_xml = dir.path().join("broken.xml");
    fs::write(&bad_xml, "<familyset><family></familyset>").unwrap();

    let font = dir.path().join("BrokenConfigFont.ttf");
    fs::write(&font, FONT_BYTES).unwrap();

    let packager = ModulePackager::new(&template, &font, &bad_xml, "broken-config-module");
    let err = packager.package_module(&ModuleMetadata::new()).unwrap_err();
    assert!(matches!(err, Error::FontConfig(_)));
    assert!(!env::temp_dir().join("broken-config-module.zip").exists());
}

#[test]
fn extra_template_files_survive_packaging() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    make_template(&template);
    fs::create_dir_all(template.join("META-INF/com/google/android")).unwrap();
    fs::write(
        template.join("META-INF/com/google/android/update-binary"),
        "#!/sbin/sh\n",
    )
    .unwrap();

    let font = dir.path().join("MetaInfFont.ttf");
    fs::write(&font, FONT_BYTES).unwrap();

    let packager = ModulePackager::new(
        &template,
        &font,
        template.join("system/etc/fonts.xml"),
        "meta-inf-module",
    );
    let archive_path = packager.package_module(&ModuleMetadata::new()).unwrap();

    let bytes = fs::read(&archive_path).unwrap();
    assert_eq!(
        read_entry(&bytes, "META-INF/com/google/android/update-binary"),
        b"#!/sbin/sh\n"
    );

    fs::remove_file(&archive_path).ok();
}
