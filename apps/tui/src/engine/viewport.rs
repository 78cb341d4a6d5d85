use crate::domain::Point;
use serde::Serialize;

/// Size of the drawable area handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Fixed logical extent of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentBounds {
    pub design_width: f64,
    pub content_top: f64,
    pub content_bottom: f64,
    pub padding: f64,
}

impl ContentBounds {
    pub const REFERENCE: Self = Self {
        design_width: 1000.0,
        content_top: 90.0,
        content_bottom: 810.0,
        padding: 40.0,
    };

    pub fn min_y(&self) -> f64 {
        self.content_top - self.padding
    }

    pub fn max_y(&self) -> f64 {
        self.content_bottom + self.padding
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }
}

impl Default for ContentBounds {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Uniform scale plus centering offsets from logical space to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Screen y of logical y = 0 once the content band is centered.
    pub origin_y: f64,
}

impl Transform {
    pub fn compute(bounds: &ContentBounds, viewport: Viewport) -> Self {
        let width = viewport.width.max(1.0);
        let height = viewport.height.max(1.0);
        let content_height = bounds.height();

        let scale = (width / bounds.design_width).min(height / content_height);
        let offset_x = bounds.design_width.mul_add(-scale, width) / 2.0;
        let offset_y = content_height.mul_add(-scale, height) / 2.0;

        Self {
            scale,
            offset_x,
            offset_y,
            origin_y: bounds.min_y().mul_add(-scale, offset_y),
        }
    }

    pub fn to_screen(&self, point: Point) -> Point {
        Point {
            x: point.x.mul_add(self.scale, self.offset_x),
            y: point.y.mul_add(self.scale, self.origin_y),
        }
    }

    pub fn to_logical(&self, point: Point) -> Point {
        Point {
            x: (point.x - self.offset_x) / self.scale,
            y: (point.y - self.origin_y) / self.scale,
        }
    }

    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn exact_design_size_is_identity_scale() {
        let bounds = ContentBounds::REFERENCE;
        let transform =
            Transform::compute(&bounds, Viewport::new(bounds.design_width, bounds.height()));
        assert_close(transform.scale, 1.0);
        assert_close(transform.offset_x, 0.0);
        assert_close(transform.offset_y, 0.0);

        let top = transform.to_screen(Point::new(0.0, bounds.min_y()));
        assert_close(top.y, 0.0);
    }

    #[test]
    fn wide_viewport_is_pillarboxed() {
        let bounds = ContentBounds::REFERENCE;
        let transform = Transform::compute(&bounds, Viewport::new(3000.0, 800.0));
        assert_close(transform.scale, 1.0);
        assert_close(transform.offset_x, 1000.0);
        assert_close(transform.offset_y, 0.0);
    }

    #[test]
    fn tall_viewport_is_letterboxed() {
        let bounds = ContentBounds::REFERENCE;
        let transform = Transform::compute(&bounds, Viewport::new(500.0, 1000.0));
        assert_close(transform.scale, 0.5);
        assert_close(transform.offset_x, 0.0);
        assert_close(transform.offset_y, 300.0);

        let top = transform.to_screen(Point::new(250.0, bounds.min_y()));
        assert_close(top.x, 125.0);
        assert_close(top.y, 300.0);
        let bottom = transform.to_screen(Point::new(0.0, bounds.max_y()));
        assert_close(bottom.y, 700.0);
    }

    #[test]
    fn aspect_is_never_distorted() {
        let bounds = ContentBounds::REFERENCE;
        for (w, h) in [(10.0, 10.0), (1920.0, 1080.0), (333.0, 2000.0)] {
            let transform = Transform::compute(&bounds, Viewport::new(w, h));
            let a = transform.to_screen(Point::new(0.0, 100.0));
            let b = transform.to_screen(Point::new(100.0, 200.0));
            assert_close(b.x - a.x, b.y - a.y);
            assert!(transform.offset_x >= -1e-9 && transform.offset_y >= -1e-9);
        }
    }

    #[test]
    fn screen_and_logical_are_inverse() {
        let transform =
            Transform::compute(&ContentBounds::REFERENCE, Viewport::new(640.0, 480.0));
        let point = Point::new(412.0, 333.0);
        let back = transform.to_logical(transform.to_screen(point));
        assert_close(back.x, point.x);
        assert_close(back.y, point.y);
    }

    #[test]
    fn empty_viewport_keeps_positive_scale() {
        let transform = Transform::compute(&ContentBounds::REFERENCE, Viewport::new(0.0, -5.0));
        assert!(transform.scale > 0.0);
    }
}
