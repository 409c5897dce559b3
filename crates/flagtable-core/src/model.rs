// crates/flagtable-core/src/model.rs
use crate::error::FlagError;
use crate::text::article_slug;
use crate::traits::NameMatch;
use image::RgbaImage;
use std::fmt;

/// A decoded flag bitmap. Always has non-zero width and height.
#[derive(Clone, PartialEq)]
pub struct Flag {
    image: RgbaImage,
}

impl Flag {
    /// Decodes raw image bytes (PNG from the flag endpoint) for `code`.
    pub fn decode(code: &str, bytes: &[u8]) -> Result<Self, FlagError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| FlagError::Decode {
            code: code.to_owned(),
            source,
        })?;
        Self::from_rgba(code, decoded.into_rgba8())
    }

    pub fn from_rgba(code: &str, image: RgbaImage) -> Result<Self, FlagError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FlagError::EmptyImage {
                code: code.to_owned(),
            });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

// Pixel buffers are noise in logs; dimensions are enough.
impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// One entry of the country directory.
///
/// Created by the directory loader with `name` and `code`; the flag loader
/// sets `flag` at most once. The article link is never stored, see
/// [`Country::wiki_link`].
#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    name: String,
    code: String,
    flag: Option<Flag>,
}

impl Country {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            flag: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn flag(&self) -> Option<&Flag> {
        self.flag.as_ref()
    }

    pub fn has_flag(&self) -> bool {
        self.flag.is_some()
    }

    /// Attaches `flag` unless one is already present.
    ///
    /// Returns `false` (and drops `flag`) when the country already had one.
    pub fn set_flag(&mut self, flag: Flag) -> bool {
        if self.flag.is_some() {
            return false;
        }
        self.flag = Some(flag);
        true
    }

    /// Builder form of [`Country::set_flag`].
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.set_flag(flag);
        self
    }

    /// Article URL derived from the name, e.g.
    /// `https://pl.wikipedia.org/wiki/` + `Stany Zjednoczone` ->
    /// `https://pl.wikipedia.org/wiki/Stany_Zjednoczone`.
    pub fn wiki_link(&self, article_base: &str) -> String {
        format!("{article_base}{}", article_slug(&self.name))
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Ordered result of one directory load.
pub type Directory = Vec<Country>;
