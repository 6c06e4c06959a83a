//! Collision geometry for the catcher
//!
//! Everything moves in a 100x100 percent space: the basket slides along the
//! bottom edge, items fall straight down. The hit test is a plain axis-aligned
//! rectangle overlap, sampled by the per-item poll in `tick`.

use glam::Vec2;

use crate::consts::*;

/// An axis-aligned rectangle in play-area percent space.
///
/// `top` < `bottom` (the vertical axis grows downward, screen-style).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Rect {
    /// Build a rect from its center point and size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            top: center.y - half.y,
            bottom: center.y + half.y,
            left: center.x - half.x,
            right: center.x + half.x,
        }
    }

    /// Inclusive overlap test; touching edges count as a hit
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.bottom >= other.top
            && self.top <= other.bottom
            && self.right >= other.left
            && self.left <= other.right
    }
}

/// Bounding rect of the basket given its center position along the bottom
pub fn basket_rect(x_percent: f32) -> Rect {
    Rect::from_center_size(
        Vec2::new(x_percent, BASKET_TOP_PCT + BASKET_HEIGHT_PCT / 2.0),
        Vec2::new(BASKET_WIDTH_PCT, BASKET_HEIGHT_PCT),
    )
}

/// Bounding rect of a falling item given its center x and its top edge
pub fn heart_rect(x_percent: f32, top_percent: f32) -> Rect {
    Rect::from_center_size(
        Vec2::new(x_percent, top_percent + ITEM_SIZE_PCT / 2.0),
        Vec2::new(ITEM_SIZE_PCT, ITEM_SIZE_PCT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit_and_miss() {
        let basket = basket_rect(50.0);

        // Item directly above the basket mouth, low enough to touch
        let hit = heart_rect(50.0, BASKET_TOP_PCT - ITEM_SIZE_PCT / 2.0);
        assert!(hit.overlaps(&basket));
        assert!(basket.overlaps(&hit));

        // Same height but far to the left
        let wide = heart_rect(10.0, BASKET_TOP_PCT - ITEM_SIZE_PCT / 2.0);
        assert!(!wide.overlaps(&basket));

        // Same x but still high up
        let high = heart_rect(50.0, 20.0);
        assert!(!high.overlaps(&basket));
    }

    #[test]
    fn test_touching_edges_count() {
        let basket = basket_rect(50.0);

        // Item bottom exactly on the basket top
        let grazing = heart_rect(50.0, BASKET_TOP_PCT - ITEM_SIZE_PCT);
        assert!((grazing.bottom - basket.top).abs() < f32::EPSILON);
        assert!(grazing.overlaps(&basket));

        // Item right edge exactly on the basket left edge
        let side = heart_rect(
            50.0 - BASKET_WIDTH_PCT / 2.0 - ITEM_SIZE_PCT / 2.0,
            BASKET_TOP_PCT,
        );
        assert!((side.right - basket.left).abs() < 0.001);
        assert!(side.overlaps(&basket));
    }

    #[test]
    fn test_basket_rect_geometry() {
        let r = basket_rect(50.0);
        assert!((r.right - r.left - BASKET_WIDTH_PCT).abs() < f32::EPSILON);
        assert!((r.top - BASKET_TOP_PCT).abs() < f32::EPSILON);
        assert!(((r.left + r.right) / 2.0 - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_heart_rect_tracks_top_edge() {
        let r = heart_rect(30.0, 42.0);
        assert!((r.top - 42.0).abs() < f32::EPSILON);
        assert!((r.bottom - (42.0 + ITEM_SIZE_PCT)).abs() < f32::EPSILON);
    }
}
