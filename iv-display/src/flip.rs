//! Image orientation applied at render time.
//!
//! Flipping is a reflection of sampling coordinates; the source pixels are never
//! touched. The four modes form a cycle driven by the flip key.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Axes mirrored by a flip mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlipAxes: u8 {
        /// Mirror left/right.
        const HORIZONTAL = 1 << 0;
        /// Mirror top/bottom.
        const VERTICAL   = 1 << 1;
    }
}

/// Orientation of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlipMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl FlipMode {
    /// All modes in toggle order.
    pub const CYCLE: [FlipMode; 4] = [
        FlipMode::None,
        FlipMode::Horizontal,
        FlipMode::Vertical,
        FlipMode::Both,
    ];

    /// The mode selected by the next toggle (None → Horizontal → Vertical → Both → None).
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Both,
            Self::Both => Self::None,
        }
    }

    /// Mirrored axes for this mode.
    pub const fn axes(self) -> FlipAxes {
        match self {
            Self::None => FlipAxes::empty(),
            Self::Horizontal => FlipAxes::HORIZONTAL,
            Self::Vertical => FlipAxes::VERTICAL,
            Self::Both => FlipAxes::HORIZONTAL.union(FlipAxes::VERTICAL),
        }
    }

    /// Mode mirroring exactly `axes`.
    pub fn from_axes(axes: FlipAxes) -> Self {
        match (
            axes.contains(FlipAxes::HORIZONTAL),
            axes.contains(FlipAxes::VERTICAL),
        ) {
            (false, false) => Self::None,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (true, true) => Self::Both,
        }
    }

    /// Orientation obtained by applying `other` on top of `self`.
    ///
    /// Mirroring the same axis twice cancels out, so composition is an XOR of axes
    /// and is commutative.
    pub fn then(self, other: FlipMode) -> Self {
        Self::from_axes(self.axes().symmetric_difference(other.axes()))
    }

    pub fn is_horizontal(self) -> bool {
        self.axes().contains(FlipAxes::HORIZONTAL)
    }

    pub fn is_vertical(self) -> bool {
        self.axes().contains(FlipAxes::VERTICAL)
    }

    /// Reflects a column index of a `width`-wide image if this mode mirrors horizontally.
    #[inline]
    pub fn map_x(self, x: u32, width: u32) -> u32 {
        if self.is_horizontal() {
            width - 1 - x
        } else {
            x
        }
    }

    /// Reflects a row index of a `height`-tall image if this mode mirrors vertically.
    #[inline]
    pub fn map_y(self, y: u32, height: u32) -> u32 {
        if self.is_vertical() {
            height - 1 - y
        } else {
            y
        }
    }
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
            Self::Both => write!(f, "Both"),
        }
    }
}
