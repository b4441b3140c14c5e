pub mod graham;
pub mod jarvis;
pub mod quickhull;
pub mod monotone_chain;

use std::error::Error;
use std::fmt;
use std::str::FromStr;
use crate::convex_hull::{same_point, Hull, Point};
use crate::trace::{NoTrace, Recorder, Trace};

/// The hull algorithms provided by the crate.
///
/// All of them borrow the cloud read-only and return a closed boundary made of references into it.
/// Graham scan, QuickHull and the monotone chain list the boundary counterclockwise, Jarvis march walks it clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// O(n log n), starts from the lowest point.
    GrahamScan,
    /// O(n·h) where h is the number of hull vertices: prefer another algorithm for large hulls.
    JarvisMarch,
    /// O(n log n) on average, O(n²) in the worst case.
    QuickHull,
    /// O(n log n), starts from the leftmost point.
    MonotoneChain,
}

/// Result of [`Algorithm::compute`]. The trace is only present when it was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct HullOutput<'a, T> {
    pub hull: Hull<'a, T>,
    pub trace: Option<Trace<'a, T>>,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::GrahamScan,
        Algorithm::JarvisMarch,
        Algorithm::QuickHull,
        Algorithm::MonotoneChain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::GrahamScan => "Graham Scan",
            Algorithm::JarvisMarch => "Jarvis March",
            Algorithm::QuickHull => "QuickHull",
            Algorithm::MonotoneChain => "Monotone Chain",
        }
    }

    /// Runs the algorithm, reporting every intermediate state to `recorder`.
    pub fn run_with<'a, T: Point, R: Recorder<'a, T>>(&self, points: &'a [T], recorder: &mut R) -> Hull<'a, T> {
        match self {
            Algorithm::GrahamScan => graham::graham_scan(points, recorder),
            Algorithm::JarvisMarch => jarvis::jarvis_march(points, recorder),
            Algorithm::QuickHull => quickhull::quickhull(points, recorder),
            Algorithm::MonotoneChain => monotone_chain::monotone_chain(points, recorder),
        }
    }

    pub fn hull<'a, T: Point>(&self, points: &'a [T]) -> Hull<'a, T> {
        self.run_with(points, &mut NoTrace)
    }

    pub fn hull_with_trace<'a, T: Point>(&self, points: &'a [T]) -> (Hull<'a, T>, Trace<'a, T>) {
        let mut trace = Trace::new();
        let hull = self.run_with(points, &mut trace);
        (hull, trace)
    }

    /// Computes the hull, with the full trace when `trace` is set.
    pub fn compute<'a, T: Point>(&self, points: &'a [T], trace: bool) -> HullOutput<'a, T> {
        if trace {
            let (hull, trace) = self.hull_with_trace(points);
            HullOutput { hull, trace: Some(trace) }
        } else {
            HullOutput { hull: self.hull(points), trace: None }
        }
    }
}

#[derive(Debug)]
pub struct AlgorithmParseError(String);

impl fmt::Display for AlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse algorithm \"{}\". Expected one of: graham, jarvis, quickhull, monotone.", self.0)
    }
}

impl Error for AlgorithmParseError {}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(input: &str) -> Result<Algorithm, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "graham" | "graham-scan" | "graham_scan" => Ok(Algorithm::GrahamScan),
            "jarvis" | "jarvis-march" | "jarvis_march" | "gift-wrapping" => Ok(Algorithm::JarvisMarch),
            "quickhull" | "quick-hull" | "quick_hull" => Ok(Algorithm::QuickHull),
            "monotone" | "monotone-chain" | "monotone_chain" | "andrew" => Ok(Algorithm::MonotoneChain),
            _ => Err(AlgorithmParseError(String::from(input))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::GrahamScan => write!(f, "graham"),
            Algorithm::JarvisMarch => write!(f, "jarvis"),
            Algorithm::QuickHull => write!(f, "quickhull"),
            Algorithm::MonotoneChain => write!(f, "monotone"),
        }
    }
}

/// Hull of a cloud that cannot enclose an area because it is too small or collapsed on a single location,
/// or `None` when the algorithm has work to do.
pub(crate) fn degenerate_hull<'a, T: Point>(points: &[&'a T]) -> Option<Hull<'a, T>> {
    match points {
        [] => Some(Vec::new()),
        [p] => Some(vec![*p]),
        [p0, p1] if same_point(*p0, *p1) => Some(vec![*p0, *p1]),
        [p0, p1] => Some(vec![*p0, *p1, *p0]),
        [first, rest @ ..] if rest.iter().all(|p| same_point(*p, *first)) => {
            log::warn!("All {} points of the cloud coincide", points.len());
            Some(vec![*first, *first])
        }
        _ => None,
    }
}
