//! Planar geometry primitives: hulls, containment, intersection and
//! clipping against convex boundaries.
//!
//! Rings are open vertex lists (the first vertex is not repeated at the end).

use super::types::Point;

/// Tolerance for collinearity and on-edge tests, in degrees.
const EPSILON: f64 = 1e-9;

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Edges of a ring, including the closing edge.
pub fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = ring.len();
    let count = if n > 1 { n } else { 0 };
    (0..count).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point]) -> f64 {
    ring_edges(ring)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        / 2.0
}

/// Convex hull by Andrew's monotone chain.
///
/// Returns the hull counter-clockwise without collinear vertices. Fewer than
/// three distinct input points are returned as they are (deduplicated).
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Convex hull of `points` grown by `buffer` in each axis direction.
///
/// Equivalent to the Minkowski sum of the hull with a square of side
/// `2 * buffer`, so the result always contains the bounding box of every
/// input point expanded by `buffer` around that point.
pub fn buffered_hull(points: &[Point], buffer: f64) -> Vec<Point> {
    if buffer <= 0.0 {
        return convex_hull(points);
    }
    let corners: Vec<Point> = points
        .iter()
        .flat_map(|p| {
            [
                Point::new(p.x - buffer, p.y - buffer),
                Point::new(p.x + buffer, p.y - buffer),
                Point::new(p.x + buffer, p.y + buffer),
                Point::new(p.x - buffer, p.y + buffer),
            ]
        })
        .collect();
    convex_hull(&corners)
}

/// Whether every turn of the ring goes the same way.
pub fn is_convex(ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..n {
        let turn = cross(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        if turn.abs() <= EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Whether `p` lies on the segment `a`-`b`.
pub fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let ab = sub(b, a);
    let ap = sub(p, a);
    let len = dot(ab, ab);
    if len <= EPSILON * EPSILON {
        return dot(ap, ap) <= EPSILON * EPSILON;
    }
    let area = ab.x * ap.y - ab.y * ap.x;
    if area.abs() > EPSILON * len.sqrt() {
        return false;
    }
    let t = dot(ap, ab);
    t >= -EPSILON && t <= len + EPSILON
}

/// Whether `p` lies on any edge of the ring.
pub fn on_ring(ring: &[Point], p: &Point) -> bool {
    ring_edges(ring).any(|(a, b)| on_segment(*p, a, b))
}

/// Ray-casting point-in-ring test. Points on the boundary count as inside.
pub fn ring_contains(ring: &[Point], p: &Point) -> bool {
    if ring.len() < 3 {
        return on_ring(ring, p);
    }
    if on_ring(ring, p) {
        return true;
    }
    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Whether segments `p1`-`p2` and `q1`-`q2` share at least one point.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    on_segment(p1, q1, q2)
        || on_segment(p2, q1, q2)
        || on_segment(q1, p1, p2)
        || on_segment(q2, p1, p2)
}

/// Return the ring in counter-clockwise order.
pub fn counter_clockwise(ring: &[Point]) -> Vec<Point> {
    let mut ring = ring.to_vec();
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

/// Sutherland–Hodgman: clip `subject` against the convex ring `clip`.
///
/// `clip` may be in either orientation. An empty result means the subject
/// lies entirely outside.
pub fn clip_ring(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let clip = counter_clockwise(clip);
    let mut output = subject.to_vec();

    for (a, b) in ring_edges(&clip) {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let inside = |p: Point| cross(a, b, p) >= -EPSILON;

        let mut prev = input[input.len() - 1];
        for &current in &input {
            match (inside(current), inside(prev)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(line_intersection(prev, current, a, b));
                    output.push(current);
                }
                (false, true) => output.push(line_intersection(prev, current, a, b)),
                (false, false) => {}
            }
            prev = current;
        }
    }

    output.dedup();
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    output
}

/// Intersection of segment `s`-`e` with the infinite line through `a`-`b`.
fn line_intersection(s: Point, e: Point, a: Point, b: Point) -> Point {
    let denom = cross(a, b, e) - cross(a, b, s);
    if denom.abs() <= f64::EPSILON {
        return e;
    }
    lerp(s, e, -cross(a, b, s) / denom)
}

/// Cyrus–Beck: the part of segment `p0`-`p1` inside the convex ring `clip`.
pub fn clip_segment(p0: Point, p1: Point, clip: &[Point]) -> Option<(Point, Point)> {
    let clip = counter_clockwise(clip);
    if clip.len() < 3 {
        return None;
    }
    let d = sub(p1, p0);
    let (mut t_enter, mut t_exit) = (0.0_f64, 1.0_f64);

    for (a, b) in ring_edges(&clip) {
        // Inward normal of a counter-clockwise edge.
        let normal = Point::new(-(b.y - a.y), b.x - a.x);
        let num = dot(normal, sub(p0, a));
        let den = dot(normal, d);

        if den.abs() <= f64::EPSILON {
            if num < -EPSILON {
                return None;
            }
            continue;
        }
        let t = -num / den;
        if den > 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    Some((lerp(p0, p1, t_enter), lerp(p0, p1, t_exit)))
}

/// Clip a polyline against a convex ring, returning the inside pieces.
pub fn clip_line(line: &[Point], clip: &[Point]) -> Vec<Vec<Point>> {
    let mut pieces: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for pair in line.windows(2) {
        match clip_segment(pair[0], pair[1], clip) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if current.len() >= 2 {
                        pieces.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(start);
                }
                current.push(end);
            }
            None => {
                if current.len() >= 2 {
                    pieces.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}
