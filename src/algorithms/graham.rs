use std::cmp::Ordering;
use std::iter;
use crate::algorithms::degenerate_hull;
use crate::convex_hull::{cross, dist_sq, same_point, Hull, Point};
use crate::trace::Recorder;

/// Angular order around `pivot`.
///
/// `a` comes first when `b` is a strict counterclockwise turn from `a`. Collinear points come nearer first,
/// so the stack pops the inner ones and only the extreme point of every collinear run survives.
pub fn polar_order<T: Point + ?Sized>(pivot: &T, a: &T, b: &T) -> Ordering {
    let turn = cross(pivot, a, b);
    if turn > 0. {
        Ordering::Less
    } else if turn < 0. {
        Ordering::Greater
    } else {
        dist_sq(pivot, a).total_cmp(&dist_sq(pivot, b))
    }
}

/// The point with the lowest y coordinate, the lowest x coordinate among equals.
fn lowest_point<'a, T: Point>(points: &[&'a T]) -> Option<&'a T> {
    points
        .iter()
        .copied()
        .min_by(|a, b| a.y().total_cmp(&b.y()).then_with(|| a.x().total_cmp(&b.x())))
}

/*
    Collinear points on the boundary are not kept, every vertex of the result is a strict left turn.

    The first point is the one with the lowest y-coordinate and the lowest x-coordinate.
    Points are then given counter-clockwise and the first point is repeated at the end.
*/
pub fn graham_scan<'a, T, R>(points: &'a [T], recorder: &mut R) -> Hull<'a, T>
where
    T: Point,
    R: Recorder<'a, T>,
{
    let cloud: Vec<&T> = points.iter().collect();
    if let Some(hull) = degenerate_hull(&cloud) {
        recorder.record_closed(&hull);
        return hull;
    }
    recorder.record(&cloud);

    let Some(pivot) = lowest_point(&cloud) else {
        return Vec::new();
    };
    let mut sorted: Vec<&T> = cloud.iter().copied().filter(|p| !same_point(*p, pivot)).collect();
    sorted.sort_by(|a, b| polar_order(pivot, *a, *b));
    log::debug!("Graham scan: pivot ({}, {}), {} points sorted by angle", pivot.x(), pivot.y(), sorted.len());

    let mut stack: Vec<&T> = Vec::with_capacity(sorted.len() + 2);
    for point in iter::once(pivot).chain(sorted) {
        while stack.len() >= 2 && cross(stack[stack.len() - 2], stack[stack.len() - 1], point) <= 0. {
            stack.pop();
            recorder.record(&stack);
        }
        stack.push(point);
        recorder.record(&stack);
    }

    // convex closure
    stack.push(pivot);
    recorder.record_closed(&stack);
    log::debug!("Graham scan: hull of {} vertices", stack.len() - 1);
    stack
}
