//! Flat row-major depth buffer for a single tile.

/// One tile's worth of cell depths, laid out row-major.
///
/// Indexing past `len()` is a programming error: it trips a
/// `debug_assert!` in debug builds and a slice-bounds panic otherwise.
/// Callers that take indices from the outside world (disturbances) must
/// validate them against the topology first.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    cells: Vec<f32>,
}

impl HeightField {
    /// A field of `len` cells, all set to `value`.
    pub fn filled(len: usize, value: f32) -> Self {
        Self {
            cells: vec![value; len],
        }
    }

    /// A field holding a copy of `template`.
    pub fn from_template(template: &[f32]) -> Self {
        Self {
            cells: template.to_vec(),
        }
    }

    /// Depth at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        debug_assert!(
            index < self.cells.len(),
            "cell index {index} out of range for field of {}",
            self.cells.len()
        );
        self.cells[index]
    }

    /// Overwrite the depth at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, depth: f32) {
        debug_assert!(
            index < self.cells.len(),
            "cell index {index} out of range for field of {}",
            self.cells.len()
        );
        self.cells[index] = depth;
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the field has no cells. Never true for grid-owned fields.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.cells.fill(value);
    }

    /// Overwrite this field with the contents of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn copy_from(&mut self, other: &HeightField) {
        self.cells.copy_from_slice(&other.cells);
    }

    /// Read-only view of the cells.
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Mutable view of the cells.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Freshly allocated copy of the cells, for handing to a consumer.
    pub fn to_vec(&self) -> Vec<f32> {
        self.cells.clone()
    }
}
