use crate::domain::Point;
use crate::engine::time_source::TimeValue;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Closed polyline with cumulative edge lengths, walked by arclength.
#[derive(Debug, Clone)]
pub struct Polyline {
    vertices: Vec<Point>,
    cumulative: Vec<f64>,
}

impl Polyline {
    pub fn closed(vertices: &[Point]) -> Self {
        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        for (i, vertex) in vertices.iter().enumerate() {
            let next = vertices[(i + 1) % vertices.len()];
            total += vertex.distance(next);
            cumulative.push(total);
        }
        Self {
            vertices: vertices.to_vec(),
            cumulative,
        }
    }

    pub fn perimeter(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at `distance` along the boundary, starting at the first vertex. Wraps.
    pub fn point_at(&self, distance: f64) -> Point {
        let Some(&first) = self.vertices.first() else {
            return Point::default();
        };
        let perimeter = self.perimeter();
        if perimeter <= f64::EPSILON || !distance.is_finite() {
            return first;
        }

        let target = distance.rem_euclid(perimeter);
        // first edge whose end lies beyond the target
        let edge = self
            .cumulative
            .partition_point(|&end| end <= target)
            .min(self.vertices.len() - 1);
        let start_distance = if edge == 0 {
            0.0
        } else {
            self.cumulative[edge - 1]
        };
        let length = self.cumulative[edge] - start_distance;
        let from = self.vertices[edge];
        let to = self.vertices[(edge + 1) % self.vertices.len()];
        if length <= f64::EPSILON {
            return from;
        }
        from.lerp(to, (target - start_distance) / length)
    }
}

/// One sinusoid of elapsed time mapped into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oscillator {
    pub frequency: f64,
    pub phase: f64,
}

impl Oscillator {
    pub fn weight(&self, elapsed_seconds: f64) -> f64 {
        (TAU * self.frequency)
            .mul_add(elapsed_seconds, self.phase)
            .sin()
            .mul_add(0.5, 0.5)
    }
}

/// Fixed layout of the three dials in logical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Composition {
    pub hour_center: Point,
    pub hour_half_size: f64,
    pub hour_tilt_degrees: f64,
    pub oscillators: [Oscillator; 3],
    pub minute_x: f64,
    pub minute_top: f64,
    pub minute_bottom: f64,
    pub second_center: Point,
    pub second_rx: f64,
    pub second_ry: f64,
}

impl Composition {
    pub const REFERENCE: Self = Self {
        hour_center: Point::new(300.0, 450.0),
        hour_half_size: 170.0,
        hour_tilt_degrees: -8.0,
        oscillators: [
            Oscillator {
                frequency: 0.050,
                phase: 0.0,
            },
            Oscillator {
                frequency: 0.037,
                phase: 2.1,
            },
            Oscillator {
                frequency: 0.023,
                phase: 4.2,
            },
        ],
        minute_x: 600.0,
        minute_top: 130.0,
        minute_bottom: 770.0,
        second_center: Point::new(810.0, 450.0),
        second_rx: 130.0,
        second_ry: 300.0,
    };

    /// Local vertex sets, each starting at the twelve o'clock corner and running clockwise.
    fn silhouettes(&self) -> [[Point; 4]; 3] {
        let h = self.hour_half_size;
        let square = [
            Point::new(-h, -h),
            Point::new(h, -h),
            Point::new(h, h),
            Point::new(-h, h),
        ];
        let kite = [
            Point::new(0.0, -1.25 * h),
            Point::new(0.8 * h, -0.2 * h),
            Point::new(0.0, 1.3 * h),
            Point::new(-0.8 * h, -0.2 * h),
        ];
        let triangle = [
            Point::new(0.0, -1.1 * h),
            Point::new(1.05 * h, 0.8 * h),
            Point::new(0.0, 0.8 * h),
            Point::new(-1.05 * h, 0.8 * h),
        ];
        [square, kite, triangle]
    }

    /// Blends square, kite and triangle by the oscillator weights (local coordinates).
    pub fn hour_shape_local(&self, elapsed_seconds: f64) -> [Point; 4] {
        let weights = self.oscillators.map(|osc| osc.weight(elapsed_seconds));
        let sum: f64 = weights.iter().sum();
        let silhouettes = self.silhouettes();
        if sum <= 1e-9 {
            return silhouettes[0];
        }

        let mut shape = [Point::default(); 4];
        for (vertex, slot) in shape.iter_mut().enumerate() {
            for (silhouette, weight) in silhouettes.iter().zip(weights) {
                slot.x += silhouette[vertex].x * weight / sum;
                slot.y += silhouette[vertex].y * weight / sum;
            }
        }
        shape
    }

    /// Rotates by the tilt and moves to the hour center.
    pub fn hour_to_shared(&self, local: Point) -> Point {
        let (sin, cos) = self.hour_tilt_degrees.to_radians().sin_cos();
        Point {
            x: local.x.mul_add(cos, -(local.y * sin)) + self.hour_center.x,
            y: local.x.mul_add(sin, local.y * cos) + self.hour_center.y,
        }
    }

    pub fn minute_marker(&self, time: &TimeValue) -> Point {
        let t = time.minute_float().rem_euclid(60.0) / 60.0;
        Point::new(self.minute_x, (self.minute_bottom - self.minute_top).mul_add(t, self.minute_top))
    }

    pub fn second_marker(&self, time: &TimeValue) -> Point {
        let angle = TAU.mul_add(time.seconds_float() / 60.0, -FRAC_PI_2);
        Point::new(
            angle.cos().mul_add(self.second_rx, self.second_center.x),
            angle.sin().mul_add(self.second_ry, self.second_center.y),
        )
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Angle in degrees at `vertex` between the rays to `a` and `b`; 0 when either ray is empty.
pub fn vertex_angle(vertex: Point, a: Point, b: Point) -> f64 {
    let (ux, uy) = (a.x - vertex.x, a.y - vertex.y);
    let (vx, vy) = (b.x - vertex.x, b.y - vertex.y);
    let len_u = ux.hypot(uy);
    let len_v = vx.hypot(vy);
    if len_u <= f64::EPSILON || len_v <= f64::EPSILON {
        return 0.0;
    }
    let dot = (ux / len_u).mul_add(vx / len_v, (uy / len_u) * (vy / len_v));
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Markers {
    pub hour: Point,
    pub minute: Point,
    pub second: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angles {
    pub at_hour: f64,
    pub at_minute: f64,
    pub at_second: f64,
}

impl Angles {
    pub fn between(markers: &Markers) -> Self {
        Self {
            at_hour: vertex_angle(markers.hour, markers.minute, markers.second),
            at_minute: vertex_angle(markers.minute, markers.hour, markers.second),
            at_second: vertex_angle(markers.second, markers.hour, markers.minute),
        }
    }

    pub fn sum(&self) -> f64 {
        self.at_hour + self.at_minute + self.at_second
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourLabel {
    pub hour: u8,
    pub position: Point,
    pub active: bool,
}

/// Everything derived from one time value in shared logical space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub hour_shape: [Point; 4],
    pub perimeter: f64,
    pub markers: Markers,
    pub angles: Angles,
    pub hour_labels: Vec<HourLabel>,
}

fn label_is_active(hour12: f64, index: u8) -> bool {
    let diff = (hour12 - f64::from(index)).rem_euclid(12.0);
    diff.min(12.0 - diff) <= 0.5
}

impl Geometry {
    pub fn compute(composition: &Composition, time: &TimeValue, elapsed_seconds: f64) -> Self {
        let local = composition.hour_shape_local(elapsed_seconds);
        let outline = Polyline::closed(&local);
        let perimeter = outline.perimeter();
        let hour12 = time.hour12_float();

        let hour = composition.hour_to_shared(outline.point_at(perimeter * hour12 / 12.0));
        let markers = Markers {
            hour,
            minute: composition.minute_marker(time),
            second: composition.second_marker(time),
        };

        let hour_labels = (0..12_u8)
            .map(|i| HourLabel {
                hour: if i == 0 { 12 } else { i },
                position: composition
                    .hour_to_shared(outline.point_at(perimeter * f64::from(i) / 12.0)),
                active: label_is_active(hour12, i),
            })
            .collect();

        Self {
            hour_shape: local.map(|p| composition.hour_to_shared(p)),
            perimeter,
            markers,
            angles: Angles::between(&markers),
            hour_labels,
        }
    }
}
