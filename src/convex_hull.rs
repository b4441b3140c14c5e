//! Geometric primitives shared by every hull algorithm, plus the counterclockwise normalizer.
use std::cmp::Ordering;

pub trait Point {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Point for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

impl Point for [f64; 2] {
    fn x(&self) -> f64 {
        self[0]
    }

    fn y(&self) -> f64 {
        self[1]
    }
}

/// A closed boundary. Every element borrows a point of the input cloud, points are never synthesized.
pub type Hull<'a, T> = Vec<&'a T>;

/// Twice the signed area of the triangle `o, a, b`.
///
/// Positive when `o -> a -> b` turns left (counterclockwise), negative when it turns right, zero when collinear.
pub fn cross<T: Point + ?Sized>(o: &T, a: &T, b: &T) -> f64 {
    (a.x() - o.x()) * (b.y() - o.y()) - (a.y() - o.y()) * (b.x() - o.x())
}

/// Squared euclidean distance, used to break orientation ties without a square root.
pub fn dist_sq<T: Point + ?Sized>(a: &T, b: &T) -> f64 {
    (a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)
}

/// Equality by value: both coordinates exactly equal.
pub fn same_point<T: Point + ?Sized>(a: &T, b: &T) -> bool {
    a.x() == b.x() && a.y() == b.y()
}

/// Orders points by x, then by y.
pub fn lexicographic_cmp<T: Point + ?Sized>(a: &T, b: &T) -> Ordering {
    a.x().total_cmp(&b.x()).then_with(|| a.y().total_cmp(&b.y()))
}

fn sort_by_polar_angle<'a, T: Point>(pts: &[&'a T], pivot: &T) -> Vec<&'a T> {
    let mut points: Vec<(f64, f64, &T)> = pts
        .iter()
        .filter(|p| !same_point(**p, pivot))
        .map(|p| {
            (
                // angle
                (p.y() - pivot.y()).atan2(p.x() - pivot.x()),
                // negated distance (we want the farthest to be first)
                -dist_sq(pivot, *p),
                *p,
            )
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    points.into_iter().map(|p| p.2).collect()
}

/*
    Rewrites a boundary in the canonical form shared by the algorithms: the lexicographically smallest point first,
    every other point by increasing polar angle around it (farthest first on ties), and the first point repeated at the end.

    Duplicates of the pivot are dropped. Other duplicates are kept, they only end up next to each other.
*/
pub fn reorder_ccw<'a, T: Point>(hull: &[&'a T]) -> Vec<&'a T> {
    if hull.len() < 2 {
        return hull.to_vec();
    }
    if hull.len() == 2 && !same_point(hull[0], hull[1]) {
        return vec![hull[0], hull[1], hull[0]];
    }

    let open = if same_point(hull[0], hull[hull.len() - 1]) {
        &hull[..hull.len() - 1]
    } else {
        hull
    };
    let Some(pivot) = open.iter().copied().min_by(|a, b| lexicographic_cmp(*a, *b)) else {
        return hull.to_vec();
    };

    let mut reordered = Vec::with_capacity(open.len() + 1);
    reordered.push(pivot);
    reordered.extend(sort_by_polar_angle(open, pivot));
    reordered.push(pivot);
    log::debug!("Reordered {} boundary points counterclockwise around ({}, {})", hull.len(), pivot.x(), pivot.y());
    reordered
}
