//! Companion formats renamed alongside the primary `.azw3`.

/// Extension of the file the tool is pointed at.
pub const PRIMARY_EXTENSION: &str = ".azw3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Companion {
    /// Comic archives: `.zip`, `.cbz`.
    Zip,
    /// Kobo conversions: `.kepub`, `.kepub.epub`.
    Kepub,
    Epub,
}

impl Companion {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Companion::Zip => &[".zip", ".cbz"],
            Companion::Kepub => &[".kepub", ".kepub.epub"],
            Companion::Epub => &[".epub"],
        }
    }
}

/// Which companion groups to rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Companions {
    pub zip: bool,
    pub kepub: bool,
    pub epub: bool,
}

impl Companions {
    /// Selected groups in rename order: zip, kepub, epub.
    pub fn selected(&self) -> Vec<Companion> {
        [
            (self.zip, Companion::Zip),
            (self.kepub, Companion::Kepub),
            (self.epub, Companion::Epub),
        ]
        .into_iter()
        .filter_map(|(on, c)| on.then_some(c))
        .collect()
    }

    /// Extensions of all selected groups, in rename order.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.selected()
            .into_iter()
            .flat_map(|c| c.extensions().iter().copied())
            .collect()
    }
}
