//! Chart layout: plotting area and legend geometry for a canvas size.

use iced::{Point, Rectangle, Size};

/// Space left of the plot for value labels and the axis title.
const PADDING_LEFT: f32 = 64.0;
const PADDING_TOP: f32 = 16.0;
/// Space below the plot for time labels and the axis title.
const PADDING_BOTTOM: f32 = 48.0;
const LEGEND_GAP: f32 = 16.0;
const LEGEND_WIDTH: f32 = 200.0;
/// Height of one legend entry.
pub const LEGEND_ROW_HEIGHT: f32 = 20.0;

/// Regions of a chart canvas, in canvas-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub size: Size,
    /// Region where series are drawn. Excludes legend, labels and padding.
    pub plot_area: Rectangle,
    /// Right-hand legend column.
    pub legend_area: Rectangle,
}

impl ChartLayout {
    pub fn compute(size: Size) -> Self {
        let legend_x = (size.width - LEGEND_WIDTH).max(0.0);
        let plot_width = (legend_x - LEGEND_GAP - PADDING_LEFT).max(0.0);
        let plot_height = (size.height - PADDING_TOP - PADDING_BOTTOM).max(0.0);

        Self {
            size,
            plot_area: Rectangle {
                x: PADDING_LEFT,
                y: PADDING_TOP,
                width: plot_width,
                height: plot_height,
            },
            legend_area: Rectangle {
                x: legend_x,
                y: PADDING_TOP,
                width: size.width - legend_x,
                height: (size.height - PADDING_TOP).max(0.0),
            },
        }
    }

    /// Bounds of the legend entry for a dataset index.
    pub fn legend_entry(&self, index: usize) -> Rectangle {
        Rectangle {
            x: self.legend_area.x,
            y: self.legend_area.y + index as f32 * LEGEND_ROW_HEIGHT,
            width: self.legend_area.width,
            height: LEGEND_ROW_HEIGHT,
        }
    }

    /// Legend entry under `position`, given `count` entries.
    pub fn legend_hit(&self, position: Point, count: usize) -> Option<usize> {
        (0..count).find(|&index| self.legend_entry(index).contains(position))
    }

    /// Whether the plot has room to draw anything.
    pub fn is_drawable(&self) -> bool {
        self.plot_area.width > 0.0 && self.plot_area.height > 0.0
    }
}
