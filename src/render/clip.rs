use std::ops::Range;

type Point = (f64, f64);

/// Split a polyline into the runs that lie inside the axes rectangle.
/// Segments crossing the border are cut at the border (Liang–Barsky).
pub fn clip_polyline(
    points: impl IntoIterator<Item = Point>,
    x: &Range<f64>,
    y: &Range<f64>,
) -> Vec<Vec<Point>> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut prev: Option<Point> = None;

    for p in points {
        if let Some(p0) = prev {
            match clip_segment(p0, p, x, y) {
                Some((a, b)) => {
                    if current.last() != Some(&a) {
                        if current.len() > 1 {
                            runs.push(std::mem::take(&mut current));
                        }
                        current.clear();
                        current.push(a);
                    }
                    current.push(b);
                }
                None => {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }
        prev = Some(p);
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

fn clip_segment(p0: Point, p1: Point, x: &Range<f64>, y: &Range<f64>) -> Option<(Point, Point)> {
    let dx = p1.0 - p0.0;
    let dy = p1.1 - p0.1;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let edges = [
        (-dx, p0.0 - x.start),
        (dx, x.end - p0.0),
        (-dy, p0.1 - y.start),
        (dy, y.end - p0.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    // Keep unclipped endpoints bit-exact so consecutive segments join.
    let a = if t0 == 0.0 { p0 } else { (p0.0 + t0 * dx, p0.1 + t0 * dy) };
    let b = if t1 == 1.0 { p1 } else { (p0.0 + t1 * dx, p0.1 + t1 * dy) };
    Some((a, b))
}
