//! Rectangle type for UI layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        self.pad_sides(padding, padding, padding, padding)
    }

    /// Shrink by different padding on each side
    pub fn pad_sides(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            (self.w - left - right).max(0.0),
            (self.h - top - bottom).max(0.0),
        )
    }

    /// A `w` x `h` rect centered inside this one
    pub fn centered(&self, w: f32, h: f32) -> Self {
        Self::new(self.x + (self.w - w) * 0.5, self.y + (self.h - h) * 0.5, w, h)
    }

    /// Split horizontally at fixed pixel position from left
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Take a fixed-width column off the right, returns (rest, column)
    pub fn split_right_px(&self, pixels: f32) -> (Self, Self) {
        self.split_h_px(self.w - pixels.clamp(0.0, self.w))
    }

    /// Get a horizontal slice (for headers and toolbars)
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }

    /// Get remaining area after slicing top
    pub fn remaining_after_top(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Get a horizontal slice from bottom
    pub fn slice_bottom(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.bottom() - h, self.w, h)
    }

    /// Cell `index` of a grid with `cols` equal columns and fixed row height
    pub fn grid_cell(&self, index: usize, cols: usize, row_h: f32, gap: f32) -> Self {
        let cols = cols.max(1);
        let cell_w = (self.w - gap * (cols as f32 - 1.0)) / cols as f32;
        let col = (index % cols) as f32;
        let row = (index / cols) as f32;
        Self::new(self.x + col * (cell_w + gap), self.y + row * (row_h + gap), cell_w, row_h)
    }

    /// Columns that fit when each needs at least `min_w`
    pub fn columns_for(&self, min_w: f32, gap: f32) -> usize {
        (((self.w + gap) / (min_w + gap)).floor() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }

    #[test]
    fn test_split_right() {
        let r = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let (rest, column) = r.split_right_px(300.0);
        assert_eq!(rest.w, 700.0);
        assert_eq!(column.x, 700.0);
        assert_eq!(column.w, 300.0);
    }

    #[test]
    fn test_grid_cell() {
        let r = Rect::new(0.0, 0.0, 620.0, 400.0);
        assert_eq!(r.columns_for(200.0, 10.0), 3);
        let cell = r.grid_cell(4, 3, 100.0, 10.0);
        assert_eq!(cell.x, 210.0);
        assert_eq!(cell.y, 110.0);
        assert_eq!(cell.w, 200.0);
    }

    #[test]
    fn test_centered() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0).centered(40.0, 20.0);
        assert_eq!((r.x, r.y), (30.0, 40.0));
    }
}
