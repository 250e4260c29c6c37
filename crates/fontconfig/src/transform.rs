//! Builds the merged `familyset` for a custom font.

use std::{fs, path::Path};

use log::info;

use crate::{
    element::Element,
    error::{Error, Result},
};

const FAMILYSET_VERSION: &str = "23";

/// Language block the custom font is also registered for.
const CUSTOM_FAMILY_LANG: &str = "zh-Hans";

/// Weight range of the custom family: 100..=900, step 100.
const CUSTOM_WEIGHTS: std::ops::RangeInclusive<u16> = 100..=900;
const WEIGHT_STEP: u16 = 100;

/// Placeholder faces for the leading sans-serif fallback family.
///
/// Order matches the shipped EmptyFont set, with Black ahead of Bold.
const FALLBACK_FACES: &[(u16, &str, &str)] = &[
    (100, "normal", "EmptyFont-Thin.ttf"),
    (100, "italic", "EmptyFont-ThinItalic.ttf"),
    (300, "normal", "EmptyFont-Light.ttf"),
    (300, "italic", "EmptyFont-LightItalic.ttf"),
    (400, "normal", "EmptyFont-Regular.ttf"),
    (400, "italic", "EmptyFont-Italic.ttf"),
    (500, "normal", "EmptyFont-Medium.ttf"),
    (500, "italic", "EmptyFont-MediumItalic.ttf"),
    (900, "normal", "EmptyFont-Black.ttf"),
    (900, "italic", "EmptyFont-BlackItalic.ttf"),
    (700, "normal", "EmptyFont-Bold.ttf"),
    (700, "italic", "EmptyFont-BoldItalic.ttf"),
];

/// Read `base_xml` and produce the merged, pretty-printed configuration
/// referencing `font_file_name`.
pub fn transform(base_xml: &Path, font_file_name: &str) -> Result<Vec<u8>> {
    let data = fs::read(base_xml).map_err(|source| Error::Read {
        path: base_xml.to_path_buf(),
        source,
    })?;
    let base = Element::parse(&data)?;
    info!(
        "Merging {} into font config with {} top-level elements",
        font_file_name,
        base.children.len()
    );
    merge_familyset(&base, font_file_name).to_pretty_xml()
}

/// Build a new `familyset` from the base document's children.
///
/// The output starts with the empty sans-serif fallback family and the
/// nameless custom family, so the custom font becomes the default. The
/// base document's children follow in their original order, with two
/// adjustments:
///
/// - every `family` named "sans-serif" loses that attribute, demoting it
///   in favor of the custom family;
/// - a `lang`-tagged copy of the custom family is inserted immediately
///   before the first original family that carries a `lang` attribute.
///   Later lang-tagged families pass through untouched.
pub fn merge_familyset(base: &Element, font_file_name: &str) -> Element {
    let mut familyset = Element::new("familyset").with_attr("version", FAMILYSET_VERSION);
    familyset.children.push(fallback_family());
    familyset.children.push(custom_family(font_file_name, None));

    let mut lang_family_inserted = false;
    for child in &base.children {
        let mut child = child.clone();
        if child.tag == "family" {
            if child.attr("name") == Some("sans-serif") {
                child.remove_attr("name");
            }
            if child.attr("lang").is_some() && !lang_family_inserted {
                familyset
                    .children
                    .push(custom_family(font_file_name, Some(CUSTOM_FAMILY_LANG)));
                lang_family_inserted = true;
            }
        }
        familyset.children.push(child);
    }

    familyset
}

/// The full-coverage placeholder family that heads the fallback chain.
fn fallback_family() -> Element {
    let mut family = Element::new("family").with_attr("name", "sans-serif");
    for &(weight, style, file) in FALLBACK_FACES {
        family.children.push(font_face(weight, style, file));
    }
    family
}

/// One `family` of upright faces for `font_file_name`, one per weight.
fn custom_family(font_file_name: &str, lang: Option<&str>) -> Element {
    let mut family = Element::new("family");
    if let Some(lang) = lang {
        family = family.with_attr("lang", lang);
    }
    for weight in CUSTOM_WEIGHTS.step_by(WEIGHT_STEP as usize) {
        family.children.push(font_face(weight, "normal", font_file_name));
    }
    family
}

fn font_face(weight: u16, style: &str, file: &str) -> Element {
    Element::new("font")
        .with_attr("weight", weight.to_string())
        .with_attr("style", style)
        .with_text(file)
}
