//! Font faces and text measurement

use crate::RenderError;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use ansishot_ansi::Style;
use fontdb::{Database, FaceInfo, Family, Query, Source, Stretch, Weight};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Face used to draw a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl From<Style> for FontStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Bold => FontStyle::Bold,
            Style::Italic => FontStyle::Italic,
            // Underline is drawn as a separate rule
            Style::Underline | Style::None => FontStyle::Regular,
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontStyle::Regular => "regular",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
        };
        f.write_str(name)
    }
}

/// Measured size of a string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Glyph metrics needed for layout
pub trait TextMeasure {
    /// Advance width and line height of `text` in `face`
    fn measure(&self, face: FontStyle, text: &str) -> TextExtent;

    /// Line height of the body font in whole pixels
    fn font_height(&self) -> f32;
}

/// Font files on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPaths {
    pub regular: PathBuf,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}

impl FontPaths {
    pub fn new(regular: impl Into<PathBuf>) -> Self {
        Self {
            regular: regular.into(),
            bold: None,
            italic: None,
        }
    }

    pub fn with_bold(mut self, bold: impl Into<PathBuf>) -> Self {
        self.bold = Some(bold.into());
        self
    }

    pub fn with_italic(mut self, italic: impl Into<PathBuf>) -> Self {
        self.italic = Some(italic.into());
        self
    }
}

/// Monospace families tried first, best match first
const PREFERRED_FAMILIES: &[&str] = &[
    "Victor Mono",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "Cascadia Mono",
    "Menlo",
    "Consolas",
    "Courier New",
];

/// Fixed locations used when the font database finds nothing: (regular, bold, italic)
const FALLBACK_FONTS: &[(&str, &str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Oblique.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono-Oblique.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Italic.ttf",
    ),
];

#[derive(Clone)]
struct Face {
    font: FontArc,
    scale: PxScale,
}

impl Face {
    fn parse(bytes: Vec<u8>, style: FontStyle, em_px: f32) -> Result<Self, RenderError> {
        let font =
            FontArc::try_from_vec(bytes).map_err(|_| RenderError::FontAssetCorrupt { face: style })?;

        // ab_glyph scales by ascent - descent; convert from an em size
        let units_per_em = font
            .units_per_em()
            .ok_or(RenderError::FontAssetCorrupt { face: style })?;
        let scale = PxScale::from(em_px * font.height_unscaled() / units_per_em);

        Ok(Self { font, scale })
    }
}

/// Regular, bold and italic faces at one size
#[derive(Clone)]
pub struct FontSet {
    regular: Face,
    bold: Face,
    italic: Face,
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("scale", &self.regular.scale)
            .finish_non_exhaustive()
    }
}

impl FontSet {
    /// Parse faces from raw font data.
    ///
    /// A missing bold or italic face falls back to the regular one; data
    /// that does not parse is an error.
    pub fn from_bytes(
        regular: Vec<u8>,
        bold: Option<Vec<u8>>,
        italic: Option<Vec<u8>>,
        em_px: f32,
    ) -> Result<Self, RenderError> {
        let regular = Face::parse(regular, FontStyle::Regular, em_px)?;
        let bold = match bold {
            Some(bytes) => Face::parse(bytes, FontStyle::Bold, em_px)?,
            None => {
                warn!("No bold face, using regular");
                regular.clone()
            }
        };
        let italic = match italic {
            Some(bytes) => Face::parse(bytes, FontStyle::Italic, em_px)?,
            None => {
                warn!("No italic face, using regular");
                regular.clone()
            }
        };

        Ok(Self {
            regular,
            bold,
            italic,
        })
    }

    /// Load faces from files
    pub fn load(paths: &FontPaths, em_px: f32) -> Result<Self, RenderError> {
        let regular = read_font(&paths.regular)?;
        let bold = paths.bold.as_deref().map(read_font).transpose()?;
        let italic = paths.italic.as_deref().map(read_font).transpose()?;
        Self::from_bytes(regular, bold, italic, em_px)
    }

    /// Load the best installed monospace family
    pub fn discover(em_px: f32) -> Result<Self, RenderError> {
        let paths = discover_paths().ok_or(RenderError::NoFontFound)?;
        info!("Using font {}", paths.regular.display());
        Self::load(&paths, em_px)
    }

    fn face(&self, style: FontStyle) -> &Face {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }

    /// Font and pixel scale for a face
    pub fn scaled(&self, style: FontStyle) -> (&FontArc, PxScale) {
        let face = self.face(style);
        (&face.font, face.scale)
    }
}

impl TextMeasure for FontSet {
    fn measure(&self, face: FontStyle, text: &str) -> TextExtent {
        let face = self.face(face);
        let font = face.font.as_scaled(face.scale);

        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                width += font.kern(prev, id);
            }
            width += font.h_advance(id);
            previous = Some(id);
        }

        TextExtent {
            width,
            height: self.font_height(),
        }
    }

    fn font_height(&self) -> f32 {
        let font = self.regular.font.as_scaled(self.regular.scale);
        (font.height() + font.line_gap()).floor()
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>, RenderError> {
    debug!("Reading font {}", path.display());
    std::fs::read(path).map_err(|source| RenderError::FontRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Locate an installed monospace family with its bold and italic variants.
///
/// Queries the system font database for [`PREFERRED_FAMILIES`], then for any
/// face flagged monospaced, and only then checks a few fixed paths.
pub fn discover_paths() -> Option<FontPaths> {
    let mut db = Database::new();
    db.load_system_fonts();
    debug!("Font database holds {} faces", db.len());

    query_paths(&db).or_else(fallback_paths)
}

fn query_paths(db: &Database) -> Option<FontPaths> {
    let preferred = PREFERRED_FAMILIES
        .iter()
        .find_map(|name| family_paths(db, Family::Name(name)));
    if preferred.is_some() {
        return preferred;
    }

    let family = db
        .faces()
        .find(|face| face.monospaced && face.style == fontdb::Style::Normal)
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.as_str())?;
    debug!("Using first monospaced family {}", family);
    family_paths(db, Family::Name(family))
}

/// Regular, bold and italic files of one family.
///
/// A variant the query resolves to a different weight or slant is left
/// out so the regular face stands in for it.
fn family_paths(db: &Database, family: Family<'_>) -> Option<FontPaths> {
    let families = [family];
    let find = |weight: Weight, style: fontdb::Style| {
        let query = Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style,
        };
        db.query(&query).and_then(|id| db.face(id))
    };

    let regular = find(Weight::NORMAL, fontdb::Style::Normal)?;
    if let Family::Name(name) = family {
        let matches = regular
            .families
            .iter()
            .any(|(found, _)| found.eq_ignore_ascii_case(name));
        if !matches {
            return None;
        }
    }
    let regular_path = face_path(regular)?;

    let bold = find(Weight::BOLD, fontdb::Style::Normal)
        .filter(|face| face.id != regular.id && face.weight >= Weight::SEMIBOLD)
        .and_then(face_path);
    let italic = find(Weight::NORMAL, fontdb::Style::Italic)
        .filter(|face| face.id != regular.id && face.style != fontdb::Style::Normal)
        .and_then(face_path);

    Some(FontPaths {
        regular: regular_path,
        bold,
        italic,
    })
}

/// File backing a face; only the first face of a file can be parsed
fn face_path(face: &FaceInfo) -> Option<PathBuf> {
    if face.index != 0 {
        return None;
    }
    match &face.source {
        Source::File(path) => Some(path.clone()),
        Source::SharedFile(path, _) => Some(path.clone()),
        Source::Binary(_) => None,
    }
}

fn fallback_paths() -> Option<FontPaths> {
    FALLBACK_FONTS
        .iter()
        .find(|(regular, _, _)| Path::new(regular).is_file())
        .map(|(regular, bold, italic)| {
            warn!("Font database found no monospace family, using {}", regular);
            let optional = |p: &str| Some(PathBuf::from(p)).filter(|p| p.is_file());
            FontPaths {
                regular: PathBuf::from(regular),
                bold: optional(bold),
                italic: optional(italic),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEEDS_FONT: &str = "no system monospace font found; install DejaVu Sans Mono";

    #[test]
    fn test_style_to_face() {
        assert_eq!(FontStyle::from(Style::Bold), FontStyle::Bold);
        assert_eq!(FontStyle::from(Style::Italic), FontStyle::Italic);
        assert_eq!(FontStyle::from(Style::Underline), FontStyle::Regular);
        assert_eq!(FontStyle::from(Style::None), FontStyle::Regular);
    }

    #[test]
    fn test_corrupt_font_fails_fast() {
        let result = FontSet::from_bytes(b"not a font".to_vec(), None, None, 48.0);
        assert!(matches!(
            result,
            Err(RenderError::FontAssetCorrupt {
                face: FontStyle::Regular
            })
        ));
    }

    #[test]
    fn test_missing_font_file() {
        let paths = FontPaths::new("/nonexistent/ansishot/font.ttf");
        assert!(matches!(
            FontSet::load(&paths, 48.0),
            Err(RenderError::FontRead { .. })
        ));
    }

    #[test]
    fn test_unknown_family_is_not_substituted() {
        let mut db = Database::new();
        db.load_system_fonts();
        assert!(family_paths(&db, Family::Name("No Such Family Ansishot")).is_none());
    }

    #[test]
    fn test_discovered_font_measures_monospace() {
        let fonts = FontSet::discover(48.0).expect(NEEDS_FONT);
        let one = fonts.measure(FontStyle::Regular, " ").width;
        let ten = fonts.measure(FontStyle::Regular, &" ".repeat(10)).width;
        assert!(one > 0.0);
        assert!((ten - 10.0 * one).abs() < 0.01);
        assert!(fonts.font_height() > 0.0);
    }
}
