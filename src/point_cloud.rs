use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use crate::algorithms::Algorithm;
use crate::convex_hull::Hull;
use crate::trace::Trace;

pub type Coordinates = (f64, f64);

/// How randomly generated clouds are drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Uniform over the requested x and y ranges.
    Uniform,
    /// Standard normal on both axes, ranges are ignored.
    Gaussian,
}

#[derive(Debug)]
pub struct DistributionParseError(String);

impl fmt::Display for DistributionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid distribution type \"{}\". Choose 'uniform' or 'gaussian'.", self.0)
    }
}

impl Error for DistributionParseError {}

impl FromStr for Distribution {
    type Err = DistributionParseError;

    fn from_str(input: &str) -> Result<Distribution, Self::Err> {
        match input {
            "uniform" => Ok(Distribution::Uniform),
            "gaussian" | "normal" => Ok(Distribution::Gaussian),
            _ => Err(DistributionParseError(String::from(input))),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distribution::Uniform => write!(f, "uniform"),
            Distribution::Gaussian => write!(f, "gaussian"),
        }
    }
}

#[derive(Debug)]
pub enum PointFileError {
    Io(io::Error),
    /// A data line that is not made of exactly two numbers. Lines are numbered from 1.
    Parse { line: usize, content: String },
}

impl fmt::Display for PointFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointFileError::Io(e) => write!(f, "Could not read point file: {}", e),
            PointFileError::Parse { line, content } => {
                write!(f, "Line {} is not a point (expected two numbers): \"{}\"", line, content)
            }
        }
    }
}

impl Error for PointFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PointFileError::Io(e) => Some(e),
            PointFileError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for PointFileError {
    fn from(e: io::Error) -> Self {
        PointFileError::Io(e)
    }
}

/// An ordered set of points, duplicates allowed. Hull computations only borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub name: String,
    points: Vec<Coordinates>,
}

impl PointCloud {
    pub fn new(name: String, points: Vec<Coordinates>) -> Self {
        Self { name, points }
    }

    /// Draws `n` points with a seeded generator, so the same arguments always give the same cloud.
    pub fn generate(name: String, n: usize, x_range: (f64, f64), y_range: (f64, f64), distribution: Distribution, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..n)
            .map(|_| match distribution {
                Distribution::Uniform => (uniform(&mut rng, x_range), uniform(&mut rng, y_range)),
                Distribution::Gaussian => (rng.sample(StandardNormal), rng.sample(StandardNormal)),
            })
            .collect();
        log::debug!("Generated {} {} points with seed {}", n, distribution, seed);
        Self { name, points }
    }

    /// Reads a point file: the first line is a header and is skipped, then one `x y` pair per line
    /// separated by whitespace. Blank lines are ignored.
    pub fn from_reader<R: BufRead>(name: String, reader: R) -> Result<Self, PointFileError> {
        let mut points = Vec::new();
        for (index, line) in reader.lines().enumerate().skip(1) {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut fields = trimmed.split_whitespace().map(|field| field.parse::<f64>());
            match (fields.next(), fields.next(), fields.next()) {
                (Some(Ok(x)), Some(Ok(y)), None) => points.push((x, y)),
                _ => return Err(PointFileError::Parse { line: index + 1, content: trimmed.to_string() }),
            }
        }
        log::debug!("Read {} points for cloud \"{}\"", points.len(), name);
        Ok(Self { name, points })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PointFileError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        Self::from_reader(name, BufReader::new(file))
    }

    pub fn points(&self) -> &[Coordinates] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Coordinates>) {
        self.points = points;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest coordinates on each axis, as `((min_x, max_x), (min_y, max_y))`.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let (&(x, y), rest) = self.points.split_first()?;
        Some(rest.iter().fold(((x, x), (y, y)), |((min_x, max_x), (min_y, max_y)), &(x, y)| {
            ((min_x.min(x), max_x.max(x)), (min_y.min(y), max_y.max(y)))
        }))
    }

    pub fn hull(&self, algorithm: Algorithm) -> Hull<'_, Coordinates> {
        algorithm.hull(&self.points)
    }

    pub fn hull_with_trace(&self, algorithm: Algorithm) -> (Hull<'_, Coordinates>, Trace<'_, Coordinates>) {
        algorithm.hull_with_trace(&self.points)
    }
}

fn uniform<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use crate::algorithms::Algorithm;
    use crate::point_cloud::{Distribution, PointCloud, PointFileError};

    const MESH: &str = "x y
0.0 0.0
1.5   2.0

2.0\t-1.0
-3e-1 4
";

    #[test]
    fn read_mesh_file() {
        let _ = env_logger::try_init();
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(MESH.as_bytes()).unwrap();
        let cloud = PointCloud::from_file(tmp.path()).unwrap();
        assert_eq!(cloud.points(), &[(0., 0.), (1.5, 2.), (2., -1.), (-0.3, 4.)]);
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.bounds(), Some(((-0.3, 2.), (-1., 4.))));
    }

    #[test]
    fn malformed_lines_are_reported() {
        let err = PointCloud::from_reader(String::from("bad"), Cursor::new("header\n1 2\n3 four\n")).unwrap_err();
        match err {
            PointFileError::Parse { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "3 four");
            }
            e => panic!("unexpected error {:?}", e),
        }
        assert!(PointCloud::from_reader(String::from("bad"), Cursor::new("header\n1 2 3\n")).is_err());
        assert!(PointCloud::from_reader(String::from("bad"), Cursor::new("header\n1\n")).is_err());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PointCloud::from_file(dir.path().join("mesh.dat")).unwrap_err();
        assert!(matches!(err, PointFileError::Io(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let cloud = PointCloud::from_reader(String::from("empty"), Cursor::new("x y\n")).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(cloud.bounds(), None);
        assert!(cloud.hull(Algorithm::QuickHull).is_empty());
    }

    #[test]
    fn generation_is_seeded() {
        let a = PointCloud::generate(String::from("a"), 200, (-5., 5.), (0., 1.), Distribution::Uniform, 42);
        let b = PointCloud::generate(String::from("b"), 200, (-5., 5.), (0., 1.), Distribution::Uniform, 42);
        let c = PointCloud::generate(String::from("c"), 200, (-5., 5.), (0., 1.), Distribution::Uniform, 43);
        assert_eq!(a.points(), b.points());
        assert_ne!(a.points(), c.points());
        assert!(a.points().iter().all(|&(x, y)| (-5. ..5.).contains(&x) && (0. ..1.).contains(&y)));
    }

    #[test]
    fn gaussian_generation() {
        let cloud = PointCloud::generate(String::from("g"), 2000, (0., 1.), (0., 1.), Distribution::Gaussian, 0);
        assert_eq!(cloud.len(), 2000);
        assert!(cloud.points().iter().all(|&(x, y)| x.is_finite() && y.is_finite()));
        let mean = cloud.points().iter().map(|p| p.0).sum::<f64>() / cloud.len() as f64;
        assert!(mean.abs() < 0.15, "mean {}", mean);
        // ranges are ignored: some points fall outside [0, 1)
        assert!(cloud.points().iter().any(|&(x, _)| x < 0.));
    }

    #[test]
    fn empty_range_yields_its_bound() {
        let cloud = PointCloud::generate(String::from("line"), 10, (2., 2.), (0., 1.), Distribution::Uniform, 1);
        assert!(cloud.points().iter().all(|&(x, _)| x == 2.));
    }

    #[test]
    fn hulls_through_the_cloud() {
        let mut cloud = PointCloud::new(String::from("square"), vec![(0., 0.), (0., 1.), (1., 0.), (1., 1.)]);
        let (hull, trace) = cloud.hull_with_trace(Algorithm::GrahamScan);
        assert_eq!(trace.last(), Some(&hull));
        assert_eq!(hull.len(), 5);
        cloud.set_points(vec![(5., 5.)]);
        assert_eq!(cloud.hull(Algorithm::JarvisMarch), vec![&(5., 5.)]);
        assert_eq!("gaussian".parse::<Distribution>().unwrap(), Distribution::Gaussian);
        assert!("poisson".parse::<Distribution>().is_err());
    }
}
