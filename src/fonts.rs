//! Font preset registry: an immutable table of the supported Unicode
//! font families, validated eagerly so a missing file fails before any
//! document is started.

use std::fs;
use std::path::Path;

use genpdf::fonts::{FontData, FontFamily};
use log::info;

use crate::error::{Error, Result};

/// Preset used when the caller does not pick one.
pub const DEFAULT_PRESET: &str = "noto";

/// One font preset: a family name plus its four style-variant files,
/// expected under `<fonts dir>/<folder>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPreset {
    /// Selector key (CLI `--font` value).
    pub key: &'static str,
    /// Family name registered with the PDF backend.
    pub family_name: &'static str,
    /// Folder under the fonts directory.
    pub folder: &'static str,
    /// Regular style file.
    pub regular: &'static str,
    /// Bold style file.
    pub bold: &'static str,
    /// Italic style file.
    pub italic: &'static str,
    /// Bold-italic style file.
    pub bold_italic: &'static str,
}

/// The registry. `noto` is the default; `dejavu` is the legacy preset
/// kept for documents generated by earlier versions.
pub const FONT_PRESETS: &[FontPreset] = &[
    FontPreset {
        key: "noto",
        family_name: "NotoSans",
        folder: "NotoSans",
        regular: "NotoSans-Regular.ttf",
        bold: "NotoSans-Bold.ttf",
        italic: "NotoSans-Italic.ttf",
        bold_italic: "NotoSans-BoldItalic.ttf",
    },
    FontPreset {
        key: "dejavu",
        family_name: "DejaVuSans",
        folder: "DejaVuSans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
];

impl FontPreset {
    /// Look up a preset by key.
    pub fn by_key(key: &str) -> Result<&'static FontPreset> {
        FONT_PRESETS
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| Error::UnknownFontPreset {
                requested: key.to_string(),
                available: keys(),
            })
    }

    /// Load and validate all four style variants from `fonts_dir`.
    pub fn load<P: AsRef<Path>>(&self, fonts_dir: P) -> Result<LoadedFonts> {
        let dir = fonts_dir.as_ref().join(self.folder);
        let family = FontFamily {
            regular: self.load_style(&dir, self.regular)?,
            bold: self.load_style(&dir, self.bold)?,
            italic: self.load_style(&dir, self.italic)?,
            bold_italic: self.load_style(&dir, self.bold_italic)?,
        };
        info!("Loaded font preset '{}' from {}", self.key, dir.display());
        Ok(LoadedFonts {
            family_name: self.family_name,
            family,
        })
    }

    fn load_style(&self, dir: &Path, file: &str) -> Result<FontData> {
        let path = dir.join(file);
        if !path.exists() {
            return Err(Error::FontFileMissing {
                file: file.to_string(),
                expected_at: path,
            });
        }
        let data = fs::read(&path)?;
        FontData::new(data, None).map_err(|source| Error::FontLoad {
            file: file.to_string(),
            source,
        })
    }
}

/// All preset keys, for diagnostics.
pub fn keys() -> Vec<&'static str> {
    FONT_PRESETS.iter().map(|p| p.key).collect()
}

/// A validated, ready-to-register font family.
#[derive(Debug, Clone)]
pub struct LoadedFonts {
    /// Family name under which all four variants are registered.
    pub family_name: &'static str,
    /// The four style variants.
    pub family: FontFamily<FontData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keys() {
        assert_eq!(keys(), vec!["noto", "dejavu"]);
        assert!(FontPreset::by_key(DEFAULT_PRESET).is_ok());
    }

    #[test]
    fn test_unknown_preset() {
        let err = FontPreset::by_key("comic-sans").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("comic-sans"));
        assert!(msg.contains("noto"));
        assert!(msg.contains("dejavu"));
    }

    #[test]
    fn test_missing_font_file_reports_expected_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let preset = FontPreset::by_key("noto").unwrap();
        let err = preset.load(dir.path()).unwrap_err();
        let Error::FontFileMissing { file, expected_at } = err else {
            panic!("expected FontFileMissing");
        };
        assert_eq!(file, "NotoSans-Regular.ttf");
        assert!(expected_at.starts_with(dir.path()));
        assert!(expected_at.ends_with("NotoSans/NotoSans-Regular.ttf"));
    }

    #[test]
    fn test_invalid_font_data_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let font_dir = dir.path().join("NotoSans");
        std::fs::create_dir_all(&font_dir).unwrap();
        for file in [
            "NotoSans-Regular.ttf",
            "NotoSans-Bold.ttf",
            "NotoSans-Italic.ttf",
            "NotoSans-BoldItalic.ttf",
        ] {
            std::fs::write(font_dir.join(file), b"not a real font").unwrap();
        }
        let preset = FontPreset::by_key("noto").unwrap();
        let err = preset.load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::FontLoad { .. }), "got {err}");
    }
}
