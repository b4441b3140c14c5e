use crate::algorithms::degenerate_hull;
use crate::convex_hull::{cross, lexicographic_cmp, Hull, Point};
use crate::trace::Recorder;

/// Convex chain of `points`, keeping only strict left turns. Every push and pop is recorded.
fn half_hull<'a, T, R, I>(points: I, recorder: &mut R) -> Vec<&'a T>
where
    T: Point + 'a,
    R: Recorder<'a, T>,
    I: Iterator<Item = &'a T>,
{
    let mut chain: Vec<&T> = Vec::new();
    for point in points {
        while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], point) <= 0. {
            chain.pop();
            recorder.record(&chain);
        }
        chain.push(point);
        recorder.record(&chain);
    }
    chain
}

/// Andrew's monotone chain: points sorted by x then y, lower chain built left to right, upper chain right to left.
///
/// The hull is given counterclockwise from the lexicographically smallest point.
pub fn monotone_chain<'a, T, R>(points: &'a [T], recorder: &mut R) -> Hull<'a, T>
where
    T: Point,
    R: Recorder<'a, T>,
{
    let cloud: Vec<&T> = points.iter().collect();
    let mut sorted = cloud.clone();
    sorted.sort_by(|a, b| lexicographic_cmp(*a, *b));
    if let Some(hull) = degenerate_hull(&sorted) {
        recorder.record_closed(&hull);
        return hull;
    }
    recorder.record(&cloud);

    let lower = half_hull(sorted.iter().copied(), recorder);
    let upper = half_hull(sorted.iter().rev().copied(), recorder);
    log::debug!("Monotone chain: lower chain of {} points, upper chain of {} points", lower.len(), upper.len());

    // the last point of each chain is the first point of the other one
    let mut hull = Vec::with_capacity(lower.len() + upper.len());
    hull.extend_from_slice(&lower[..lower.len() - 1]);
    hull.extend_from_slice(&upper[..upper.len() - 1]);
    hull.push(lower[0]);
    recorder.record_closed(&hull);
    hull
}
