use geoclock::engine::geometry::HourLabel;
use geoclock::engine::viewport::Transform;
use geoclock::{FrameState, Point};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::Frame;

const ELLIPSE_SEGMENTS: u32 = 72;
const LABEL_OFFSET: f64 = 22.0;

const GEO_COLOR: (u8, u8, u8) = (0, 200, 220);
const LABEL_COLOR: (u8, u8, u8) = (150, 150, 150);
const ACTIVE_LABEL_COLOR: (u8, u8, u8) = (255, 220, 0);
const TRI_COLOR: (u8, u8, u8) = (230, 80, 200);
const MARKER_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Scales an RGB triple by a layer alpha.
pub fn faded(rgb: (u8, u8, u8), alpha: u8) -> Color {
    let scale = |channel: u8| (u16::from(channel) * u16::from(alpha) / 255) as u8;
    Color::Rgb(scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

/// Maps a logical point onto canvas coordinates, whose y axis points up.
pub fn canvas_point(transform: &Transform, viewport_height: f64, point: Point) -> (f64, f64) {
    let screen = transform.to_screen(point);
    (screen.x, viewport_height - screen.y)
}

pub fn ellipse_points(center: Point, rx: f64, ry: f64) -> Vec<Point> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let theta = std::f64::consts::TAU * f64::from(i) / f64::from(ELLIPSE_SEGMENTS);
            Point::new(
                theta.cos().mul_add(rx, center.x),
                theta.sin().mul_add(ry, center.y),
            )
        })
        .collect()
}

fn centroid(points: &[Point]) -> Point {
    let count = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / count, sy / count)
}

/// Pushes a label away from the shape's center so it does not sit on the outline.
fn label_anchor(label: &HourLabel, center: Point) -> Point {
    let distance = label.position.distance(center);
    if distance < f64::EPSILON {
        return label.position;
    }
    let t = (distance + LABEL_OFFSET) / distance;
    center.lerp(label.position, t)
}

struct Painter<'f> {
    frame: &'f FrameState,
}

impl Painter<'_> {
    fn point(&self, point: Point) -> (f64, f64) {
        canvas_point(&self.frame.transform, self.frame.viewport.height, point)
    }

    fn segment(&self, ctx: &mut Context<'_>, a: Point, b: Point, color: Color) {
        let (x1, y1) = self.point(a);
        let (x2, y2) = self.point(b);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }

    fn closed(&self, ctx: &mut Context<'_>, points: &[Point], color: Color) {
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.segment(ctx, *a, b, color);
        }
    }

    fn dot(&self, ctx: &mut Context<'_>, at: Point, color: Color) {
        let (x, y) = self.point(at);
        let r = self.frame.transform.scale_length(6.0).max(1.0);
        ctx.draw(&CanvasLine {
            x1: x - r,
            y1: y,
            x2: x + r,
            y2: y,
            color,
        });
        ctx.draw(&CanvasLine {
            x1: x,
            y1: y - r,
            x2: x,
            y2: y + r,
            color,
        });
    }

    fn geo_layer(&self, ctx: &mut Context<'_>) {
        let alpha = self.frame.alphas.geo;
        if alpha == 0 {
            return;
        }
        let line = faded(GEO_COLOR, alpha);

        self.closed(ctx, &self.frame.hour_shape, line);
        self.segment(ctx, self.frame.ruler.top, self.frame.ruler.bottom, line);
        let ellipse = &self.frame.ellipse;
        self.closed(
            ctx,
            &ellipse_points(ellipse.center, ellipse.rx, ellipse.ry),
            line,
        );

        let center = centroid(&self.frame.hour_shape);
        for label in &self.frame.hour_labels {
            let (x, y) = self.point(label_anchor(label, center));
            let style = if label.active {
                Style::default()
                    .fg(faded(ACTIVE_LABEL_COLOR, alpha))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(faded(LABEL_COLOR, alpha))
            };
            ctx.print(x, y, TextLine::from(Span::styled(label.hour.to_string(), style)));
        }

        let markers = &self.frame.markers;
        let marker = faded(MARKER_COLOR, alpha);
        self.dot(ctx, markers.hour, marker);
        self.dot(ctx, markers.minute, marker);
        self.dot(ctx, markers.second, marker);
    }

    fn tri_layer(&self, ctx: &mut Context<'_>) {
        let alpha = self.frame.alphas.tri;
        if alpha == 0 {
            return;
        }
        let markers = &self.frame.markers;
        let color = faded(TRI_COLOR, alpha);
        self.closed(ctx, &[markers.hour, markers.minute, markers.second], color);

        let angles = &self.frame.angles;
        let style = Style::default().fg(color);
        for (at, degrees) in [
            (markers.hour, angles.at_hour),
            (markers.minute, angles.at_minute),
            (markers.second, angles.at_second),
        ] {
            let (x, y) = self.point(at);
            ctx.print(
                x,
                y,
                TextLine::from(Span::styled(format!("{degrees:.1}°"), style)),
            );
        }
    }
}

/// Draws the clock composition. The frame's viewport must match the area in braille dots.
pub fn render_composition(f: &mut Frame<'_>, area: Rect, frame: &FrameState) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let painter = Painter { frame };
    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                painter.geo_layer(ctx);
                ctx.layer();
                painter.tri_layer(ctx);
            })
            .x_bounds([0.0, frame.viewport.width])
            .y_bounds([0.0, frame.viewport.height]),
        area,
    );
}
