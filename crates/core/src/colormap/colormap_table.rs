use crate::shared::constants::COLORMAP_SIZE;

/// An RGB triple with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// A 256-entry lookup table resolved once from a named palette.
///
/// Indexing by `u8` makes every lookup in range.
#[derive(Clone, Debug, PartialEq)]
pub struct ColormapTable {
    name: String,
    entries: Box<[Rgb; COLORMAP_SIZE]>,
}

impl ColormapTable {
    pub fn new(name: impl Into<String>, entries: [Rgb; COLORMAP_SIZE]) -> Self {
        Self {
            name: name.into(),
            entries: Box::new(entries),
        }
    }

    /// Samples `color_at` at `i / 255` for every index `i`.
    pub fn from_fn(name: impl Into<String>, mut color_at: impl FnMut(f64) -> Rgb) -> Self {
        let last = (COLORMAP_SIZE - 1) as f64;
        let entries = std::array::from_fn(|i| color_at(i as f64 / last));
        Self::new(name, entries)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.entries[usize::from(index)]
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries[..]
    }
}
