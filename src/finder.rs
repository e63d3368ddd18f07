//! Finder-zone classification.
//!
//! A QR symbol carries three fixed 7x7 finder patterns, anchored at the
//! top-left, top-right, and bottom-left corners. The renderer excludes their
//! modules from the circle pass and draws stylized eyes over them instead.

/// Side length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// The three corners that carry a finder pattern. There is no bottom-right
/// finder in a QR symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinderCorner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl FinderCorner {
    pub const ALL: [FinderCorner; 3] = [
        FinderCorner::TopLeft,
        FinderCorner::TopRight,
        FinderCorner::BottomLeft,
    ];

    /// Module-space origin (x, y) of this corner's 7x7 zone in an N x N grid.
    pub fn origin(self, size: usize) -> (usize, usize) {
        match self {
            FinderCorner::TopLeft => (0, 0),
            FinderCorner::TopRight => (size - FINDER_SIZE, 0),
            FinderCorner::BottomLeft => (0, size - FINDER_SIZE),
        }
    }
}

/// True if module (x, y) of an N x N grid lies inside any finder zone.
///
/// For grids smaller than 15 modules the three zones overlap; a module in the
/// overlap still classifies as a finder module, since classification only
/// gates exclusion.
pub fn is_finder_module(x: usize, y: usize, size: usize) -> bool {
    let (x, y, n) = (x as isize, y as isize, size as isize);
    (x < 7 && y < 7) || (x > n - 8 && y < 7) || (x < 7 && y > n - 8)
}
