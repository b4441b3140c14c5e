use crate::algorithms::degenerate_hull;
use crate::convex_hull::{cross, dist_sq, lexicographic_cmp, same_point, Hull, Point};
use crate::trace::Recorder;

/// Wraps one step around `current`: the point with no other point strictly on its left,
/// the farthest one on collinear ties.
fn wrap_step<'a, T: Point>(cloud: &[&'a T], current: &T) -> Option<&'a T> {
    cloud.iter().copied().reduce(|next, p| {
        let turn = cross(current, next, p);
        if turn > 0. || (turn == 0. && dist_sq(current, p) > dist_sq(current, next)) {
            p
        } else {
            next
        }
    })
}

/// Gift wrapping, in O(n·h) where h is the number of hull vertices.
///
/// Starts from the leftmost point (the lowest one among equals) and walks the boundary clockwise.
/// The walk is bounded by the number of points: a hull never has more vertices than its cloud, so hitting the bound
/// (or a step that does not move) means floating point trouble, and the boundary found so far is closed and returned.
pub fn jarvis_march<'a, T, R>(points: &'a [T], recorder: &mut R) -> Hull<'a, T>
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

    let Some(start) = cloud.iter().copied().min_by(|a, b| lexicographic_cmp(*a, *b)) else {
        return Vec::new();
    };
    log::debug!("Jarvis march: starting from ({}, {})", start.x(), start.y());

    let mut hull: Vec<&T> = Vec::new();
    let mut current = start;
    let mut wrapped = false;
    for _ in 0..cloud.len() {
        hull.push(current);
        recorder.record(&hull);

        let Some(next) = wrap_step(&cloud, current) else {
            break;
        };
        if same_point(next, start) {
            wrapped = true;
            break;
        }
        if same_point(next, current) {
            log::warn!("Jarvis march: no progress from ({}, {}), stopping the walk", current.x(), current.y());
            break;
        }
        current = next;
    }
    if !wrapped {
        log::warn!("Jarvis march: boundary did not wrap back to the start after {} steps", hull.len());
    }

    // convex closure
    hull.push(start);
    recorder.record_closed(&hull);
    log::debug!("Jarvis march: hull of {} vertices", hull.len() - 1);
    hull
}
