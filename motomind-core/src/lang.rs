//! Language selection for bilingual content.
//!
//! Listings and community posts carry Hebrew and English variants of their
//! free-text fields. Clients choose with `?lang=he`; anything else falls
//! back to English.

/// Display language requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    He,
    #[default]
    En,
}

impl Lang {
    /// Parse the `lang` parameter. Only the exact value `he` selects Hebrew.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("he") => Self::He,
            _ => Self::En,
        }
    }
}

/// A field stored in both Hebrew and English
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bilingual<T> {
    pub he: T,
    pub en: T,
}

impl<T> Bilingual<T> {
    pub fn new(he: T, en: T) -> Self {
        Self { he, en }
    }

    /// Take the variant for `lang`, dropping the other.
    pub fn select(self, lang: Lang) -> T {
        match lang {
            Lang::He => self.he,
            Lang::En => self.en,
        }
    }
}
