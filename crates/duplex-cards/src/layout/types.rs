//! Layout data types shared by the grid mapper, the fitters and the renderer.
//!
//! All lengths are in PDF points with the origin at the bottom-left of the page.

/// Which printed document a placement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Question side (printed first)
    Front,
    /// Answer side
    Back,
}

/// Rule mapping a front placement to the matching back placement.
///
/// The two policies are not interchangeable: a back file laid out for one
/// will misalign when printed under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplexPolicy {
    /// Same page, same row, column mirrored (flip on long edge).
    #[default]
    MirroredColumns,
    /// Column mirrored and the back document's page order reversed, for
    /// two separately printed files where the back stack is fed face-down.
    ReversedPages,
}

/// What to do when wrapped text does not fit its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowPolicy {
    /// Shrink in steps down to the minimum size; at the floor the block is
    /// accepted even if it still overflows.
    #[default]
    ShrinkToFit,
    /// Keep the initial size and silently drop trailing lines.
    Truncate,
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Where one card lands on one side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Zero-based page in emission order of its document
    pub page: usize,
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
    /// Lower-left corner of the cell
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn cell(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Box a text block is fitted into, given by its center and limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub center_x: f32,
    pub center_y: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl TextBox {
    /// Box centered in `area`, inset by `margin_x` on each side and by
    /// `margin_y` in total height.
    pub fn inset(area: Rect, margin_x: f32, margin_y: f32) -> Self {
        Self {
            center_x: area.center_x(),
            center_y: area.center_y(),
            max_width: area.width - 2.0 * margin_x,
            max_height: area.height - margin_y,
        }
    }
}
