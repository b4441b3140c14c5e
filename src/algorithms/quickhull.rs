use crate::algorithms::degenerate_hull;
use crate::convex_hull::{cross, dist_sq, lexicographic_cmp, reorder_ccw, Hull, Point};
use crate::trace::Recorder;

/// Pending work of the divide step. Splits expand a chain, merges glue the two finished halves around their apex.
enum Task<'a, T> {
    Split {
        from: &'a T,
        to: &'a T,
        candidates: Vec<&'a T>,
    },
    Merge(&'a T),
}

/// The candidate farthest from the line `from -> to`.
///
/// Among equally far candidates (all on one parallel line) the one farthest from `from` wins, which is always an
/// end of that run: the other end is found by the next split and the points in between are discarded.
fn farthest_from_line<'a, T: Point>(from: &T, to: &T, candidates: &[&'a T]) -> Option<&'a T> {
    let mut farthest: Option<(&T, f64)> = None;
    for &p in candidates {
        let distance = cross(from, to, p).abs();
        let is_farther = match farthest {
            None => true,
            Some((best, max_distance)) => {
                distance > max_distance || (distance == max_distance && dist_sq(from, p) > dist_sq(from, best))
            }
        };
        if is_farther {
            farthest = Some((p, distance));
        }
    }
    farthest.map(|(p, _)| p)
}

/// Chain of hull vertices strictly between `from` and `to`, all candidates lying left of `from -> to`.
///
/// Runs on an explicit task stack so that adversarial clouds cannot exhaust the native stack. The recorder receives
/// every merged sub-chain in the order a recursive implementation would produce them.
fn hull_side<'a, T, R>(from: &'a T, to: &'a T, candidates: Vec<&'a T>, recorder: &mut R) -> Vec<&'a T>
where
    T: Point,
    R: Recorder<'a, T>,
{
    let mut tasks = vec![Task::Split { from, to, candidates }];
    let mut chains: Vec<Vec<&'a T>> = Vec::new();
    while let Some(task) = tasks.pop() {
        match task {
            Task::Split { from, to, candidates } => {
                let Some(farthest) = farthest_from_line(from, to, &candidates) else {
                    chains.push(Vec::new());
                    continue;
                };
                let outside_left: Vec<&T> = candidates.iter().copied().filter(|p| cross(from, farthest, *p) > 0.).collect();
                let outside_right: Vec<&T> = candidates.iter().copied().filter(|p| cross(farthest, to, *p) > 0.).collect();
                // popped in reverse: left side first, then right side, then the merge
                tasks.push(Task::Merge(farthest));
                tasks.push(Task::Split { from: farthest, to, candidates: outside_right });
                tasks.push(Task::Split { from, to: farthest, candidates: outside_left });
            }
            Task::Merge(apex) => {
                let right = chains.pop().unwrap_or_default();
                let mut chain = chains.pop().unwrap_or_default();
                chain.push(apex);
                chain.extend(right);
                // sub-hulls are always closed, a lone apex included
                chain.push(chain[0]);
                recorder.record_closed(&chain);
                chain.pop();
                chains.push(chain);
            }
        }
    }
    chains.pop().unwrap_or_default()
}

/// QuickHull: splits the cloud along the line between its extreme points and recursively keeps the farthest point
/// of each side. The merged boundary is returned counterclockwise from the lexicographically smallest point.
pub fn quickhull<'a, T, R>(points: &'a [T], recorder: &mut R) -> Hull<'a, T>
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

    let (Some(a), Some(b)) = (
        cloud.iter().copied().min_by(|p, q| lexicographic_cmp(*p, *q)),
        cloud.iter().copied().max_by(|p, q| lexicographic_cmp(*p, *q)),
    ) else {
        return Vec::new();
    };

    // points on the line a-b are never on the hull
    let upper: Vec<&T> = cloud.iter().copied().filter(|p| cross(a, b, *p) > 0.).collect();
    let lower: Vec<&T> = cloud.iter().copied().filter(|p| cross(a, b, *p) < 0.).collect();
    log::debug!("QuickHull: {} points above and {} below the extreme line", upper.len(), lower.len());

    let upper_hull = hull_side(a, b, upper, recorder);
    let lower_hull = hull_side(b, a, lower, recorder);

    let mut full_hull = Vec::with_capacity(upper_hull.len() + lower_hull.len() + 3);
    full_hull.push(a);
    full_hull.extend(upper_hull);
    full_hull.push(b);
    full_hull.extend(lower_hull);
    full_hull.push(a);

    let hull = reorder_ccw(&full_hull);
    recorder.record_closed(&hull);
    log::debug!("QuickHull: hull of {} vertices", hull.len().saturating_sub(1));
    hull
}
