use crate::config::{PositionMode, PreviewConfig};
use crate::geometry::{Point, Rect, Size};

// Auto placement insets the preview by a tenth of the list's extent.
const AUTO_INSET_DIVISOR: f64 = 10.0;
// Suggestion text is left-aligned, so the left/right split sits right of center.
const HORIZONTAL_SPLIT_RATIO: f64 = 0.6;
const VERTICAL_SPLIT_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    pub viewport: Size,
    pub list: Rect,
    /// Size of the last preview that rendered, if any did.
    pub popover: Option<Size>,
    pub pointer: Option<Point>,
}

pub fn compute_preview_anchor(config: &PreviewConfig, input: PlacementInput) -> Point {
    let viewport = input.viewport;
    match config.position {
        PositionMode::FollowPointer => match input.pointer {
            Some(pointer) if input.list.contains(pointer) => pointer,
            _ => auto_anchor(input),
        },
        PositionMode::Custom => config.custom_position,
        PositionMode::TopLeft => Point::new(0.0, 0.0),
        PositionMode::TopRight => Point::new(viewport.width, 0.0),
        PositionMode::BottomLeft => Point::new(0.0, viewport.height),
        PositionMode::BottomRight => Point::new(viewport.width, viewport.height),
        PositionMode::Auto => auto_anchor(input),
    }
}

fn auto_anchor(input: PlacementInput) -> Point {
    let list = input.list;
    let Some(popover) = input.popover else {
        return opposite_corner(list, input.viewport);
    };

    let inset_x = list.width() / AUTO_INSET_DIVISOR;
    let y = list.top + list.height() / AUTO_INSET_DIVISOR;

    let right_x = list.right - inset_x;
    if right_x + popover.width <= input.viewport.width {
        return Point::new(right_x, y);
    }

    let left_x = list.left + inset_x - popover.width;
    if left_x >= 0.0 {
        return Point::new(left_x, y);
    }

    opposite_corner(list, input.viewport)
}

fn opposite_corner(list: Rect, viewport: Size) -> Point {
    let center = list.center();
    let x = if center.x < viewport.width * HORIZONTAL_SPLIT_RATIO {
        viewport.width
    } else {
        0.0
    };
    let y = if center.y < viewport.height * VERTICAL_SPLIT_RATIO {
        viewport.height
    } else {
        0.0
    };
    Point::new(x, y)
}
