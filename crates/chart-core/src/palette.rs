//! Ordinal color domain.
//!
//! Maps distinct category names to palette indices in list order, recomputed
//! on every redraw. The actual palette colors live in the UI theme; this type
//! only decides which index a name gets.

/// Number of colors in the slice palette carried by the UI themes.
pub const PALETTE_SIZE: usize = 12;

/// Ordinal assignment from category name to palette index.
///
/// The domain is the sequence of distinct names in record-list order; a
/// name's color index is its position in that sequence, wrapping around once
/// the palette is exhausted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorDomain {
    names: Vec<String>,
}

impl ColorDomain {
    /// Build the domain from the current list of category names, keeping the
    /// first occurrence order and dropping duplicates.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            if !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        Self { names: out }
    }

    /// Palette index for a name, or `None` when the name is not in the domain.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| i % PALETTE_SIZE)
    }

    /// Domain entries in order; these are the legend labels.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
