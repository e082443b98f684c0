use bs_core::defaults::{CANVAS_HEIGHT, CANVAS_WIDTH};
use bs_core::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoardViewport {
    pub(crate) col: u16,
    pub(crate) row: u16,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRect {
    pub(crate) col: u16,
    pub(crate) row: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Default for BoardViewport {
    fn default() -> Self {
        Self {
            col: 0,
            row: 0,
            cols: 80,
            rows: 20,
        }
    }
}

const HEADER_ROWS: u16 = 2;

impl BoardViewport {
    pub(crate) fn fit(x: u16, y: u16, width: u16, height: u16, help_visible: bool) -> Self {
        let footer_rows = if help_visible { 2 } else { 1 };
        Self {
            col: x,
            row: y.saturating_add(HEADER_ROWS),
            cols: width.max(1),
            rows: height.saturating_sub(HEADER_ROWS + footer_rows).max(1),
        }
    }

    fn scale_x(&self) -> f32 {
        f32::from(self.cols.max(1)) / CANVAS_WIDTH
    }

    fn scale_y(&self) -> f32 {
        f32::from(self.rows.max(1)) / CANVAS_HEIGHT
    }

    pub(crate) fn to_world(&self, col: u16, row: u16) -> Point {
        let local_col = f32::from(col.saturating_sub(self.col)) + 0.5;
        let local_row = f32::from(row.saturating_sub(self.row)) + 0.5;
        Point::new(local_col / self.scale_x(), local_row / self.scale_y())
    }

    pub(crate) fn to_cells(&self, rect: Rect) -> CellRect {
        let left = (rect.x * self.scale_x()).round().max(0.0) as u16;
        let top = (rect.y * self.scale_y()).round().max(0.0) as u16;
        let width = (rect.width * self.scale_x()).round().max(3.0) as u16;
        let height = (rect.height * self.scale_y()).round().max(3.0) as u16;
        CellRect {
            col: self.col.saturating_add(left),
            row: self.row.saturating_add(top),
            width,
            height,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TuiUiState {
    pub(crate) help_visible: bool,
    pub(crate) status: String,
    pub(crate) viewport: BoardViewport,
}

impl TuiUiState {
    pub(crate) fn new() -> Self {
        Self {
            status: "ready".to_string(),
            ..Self::default()
        }
    }
}
