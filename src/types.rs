//! Core types for scrawl-shell.
//!
//! These types define the foundation that everything builds on.
//! They flow between the host page model, the widget, and the mount pipeline.

// =============================================================================
// Geometry
// =============================================================================

/// On-page rectangle of an element, in cells.
///
/// Using integers for exact comparison - layout in the host is cell-grid
/// aligned, so there is no sub-cell geometry to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A zero-sized rectangle at the origin (pre-layout state).
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle has no area yet.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Measured dimensions of a widget, in cells.
///
/// Width and height are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);
}

// =============================================================================
// Tests
// =============================================================================
