//! Origin-centered point lattice for the displaced surface.
//!
//! A `PointLattice` stores `rows * cols` points as interleaved `[x, y, z]`
//! f32 components. Planar coordinates are fixed at generation; the y
//! component is the only thing an animation loop writes, in place, so the
//! buffer is allocated exactly once per renderer instance.

/// Fixed-size lattice of sample points centered on the origin.
///
/// Point `(i, j)` lives at index `i * cols + j` with
/// `x = j * spacing - half_width`, `z = i * spacing - half_height`, `y = 0`.
/// That ordering is stable for the lattice's lifetime, so parallel per-point
/// buffers (colors, sizes) can rely on index correspondence.
#[derive(Debug, Clone)]
pub struct PointLattice {
    rows: usize,
    cols: usize,
    spacing: f32,
    positions: Vec<f32>,
}

impl PointLattice {
    /// Generates a `rows x cols` lattice with the given spacing.
    ///
    /// Zero rows or columns yield an empty lattice; callers render nothing
    /// rather than failing.
    pub fn generate(rows: usize, cols: usize, spacing: f32) -> Self {
        let count = rows.saturating_mul(cols);
        let mut positions = Vec::with_capacity(count * 3);
        if count > 0 {
            let half_width = (cols - 1) as f32 * spacing * 0.5;
            let half_height = (rows - 1) as f32 * spacing * 0.5;
            for i in 0..rows {
                let z = i as f32 * spacing - half_height;
                for j in 0..cols {
                    let x = j as f32 * spacing - half_width;
                    positions.extend_from_slice(&[x, 0.0, z]);
                }
            }
        }
        Self {
            rows,
            cols,
            spacing,
            positions,
        }
    }

    /// Number of lattice rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of lattice columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Spacing between adjacent points.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Number of points in the lattice.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns true when the lattice holds no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Read-only access to the interleaved `[x, y, z]` buffer.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Planar coordinates of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn planar(&self, index: usize) -> (f32, f32) {
        (self.positions[index * 3], self.positions[index * 3 + 2])
    }

    /// Current height (y component) of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> f32 {
        self.positions[index * 3 + 1]
    }

    /// Writes the height of point `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_height(&mut self, index: usize, height: f32) {
        self.positions[index * 3 + 1] = height;
    }
}
