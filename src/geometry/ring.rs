use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Point, Vec2};

/// Largest outer radius the ring may take on the icon canvas.
pub const MAX_OUTER_RADIUS: f64 = Canvas::ICON.max_radius();

const ARC_TOLERANCE: f64 = 0.1;

/// Inner radius for a ring of `outer` radius at `thickness_pct` percent thickness.
///
/// `0` keeps the full disk, `100` collapses the ring to zero width at the outer edge.
pub fn inner_radius_for(outer: f64, thickness_pct: f64) -> f64 {
    let t = if thickness_pct.is_finite() {
        thickness_pct.clamp(0.0, 100.0)
    } else {
        0.0
    };
    outer * (1.0 - t / 100.0)
}

/// Two concentric circles that bound the visible ring of the icon.
///
/// Radii always satisfy `0 <= inner <= outer <= MAX_OUTER_RADIUS`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RingGeometry {
    center: Point,
    outer: f64,
    inner: f64,
}

impl RingGeometry {
    /// Build a ring, clamping the radii into the valid range.
    pub fn new(center: Point, outer: f64, inner: f64) -> Self {
        let outer = sanitize_radius(outer).min(MAX_OUTER_RADIUS);
        let inner = sanitize_radius(inner).min(outer);
        Self {
            center,
            outer,
            inner,
        }
    }

    /// Ring centered on `canvas` from the size (diameter) and thickness slider values.
    ///
    /// The outer radius never exceeds what fits inside `canvas`.
    pub fn from_controls(canvas: Canvas, size_px: f64, thickness_pct: f64) -> Self {
        let outer = sanitize_radius(size_px / 2.0).min(canvas.max_radius());
        Self::new(canvas.center(), outer, inner_radius_for(outer, thickness_pct))
    }

    /// Shared center of both circles.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the ring's outer edge.
    pub fn outer_radius(&self) -> f64 {
        self.outer
    }

    /// Radius of the ring's hole.
    pub fn inner_radius(&self) -> f64 {
        self.inner
    }

    /// Exact area covered by the ring.
    pub fn area(&self) -> f64 {
        PI * (self.outer * self.outer - self.inner * self.inner)
    }

    /// Whether `p` lies inside the ring band (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        if self.inner >= self.outer {
            return false;
        }
        let d = (p - self.center).hypot();
        d >= self.inner && d <= self.outer
    }

    /// Closed path with the outer circle clockwise and the inner circle counter-clockwise.
    ///
    /// Filled with the non-zero rule this covers exactly the ring band. An inner radius of zero
    /// yields a solid disk and equal radii yield an empty ring.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.outer <= 0.0 {
            return path;
        }
        push_circle(&mut path, self.center, self.outer, TAU);
        if self.inner > 0.0 {
            push_circle(&mut path, self.center, self.inner, -TAU);
        }
        path
    }

    /// SVG path data for the same ring, built from two half-arcs per circle.
    pub fn to_svg_path_data(&self) -> String {
        let (cx, cy) = (self.center.x, self.center.y);
        let (r, i) = (self.outer, self.inner);
        format!(
            "M {cx},{top} A {r},{r} 0 1,1 {cx},{bottom} A {r},{r} 0 1,1 {cx},{top} Z \
             M {cx},{itop} A {i},{i} 0 1,0 {cx},{ibottom} A {i},{i} 0 1,0 {cx},{itop} Z",
            top = cy - r,
            bottom = cy + r,
            itop = cy - i,
            ibottom = cy + i,
        )
    }
}

fn sanitize_radius(r: f64) -> f64 {
    if r.is_finite() { r.max(0.0) } else { 0.0 }
}

/// Append a full circle starting at its top point. Positive sweep is clockwise in y-down space.
fn push_circle(path: &mut BezPath, center: Point, radius: f64, sweep: f64) {
    let arc = kurbo::Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: -FRAC_PI_2,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    for el in arc.path_elements(ARC_TOLERANCE) {
        path.push(el);
    }
    path.close_path();
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
