use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::{Duration, Instant};
use crate::algorithms::Algorithm;
use crate::convex_hull::Point;
use crate::point_cloud::{Distribution, PointCloud};

/// Wall clock time of a single untraced hull computation.
pub fn measure_runtime<T: Point>(algorithm: Algorithm, points: &[T]) -> Duration {
    let instant = Instant::now();
    let hull = algorithm.hull(black_box(points));
    let elapsed = instant.elapsed();
    black_box(hull);
    elapsed
}

/// Runtime of every algorithm over clouds of increasing size.
#[derive(Debug, Clone)]
pub struct RuntimeAnalysis {
    pub distribution: Distribution,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub sizes: Vec<usize>,
    /// One duration per size, in the order of `sizes`.
    pub runtimes: BTreeMap<Algorithm, Vec<Duration>>,
}

/// Repeated timings of every algorithm over the same cloud.
#[derive(Debug, Clone)]
pub struct DistributionAnalysis {
    pub distribution: Distribution,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub n: usize,
    pub runtimes: BTreeMap<Algorithm, Vec<Duration>>,
}

/// Summary of a series of timings, in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RuntimeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl RuntimeStats {
    pub fn new(runtimes: &[Duration]) -> Option<RuntimeStats> {
        if runtimes.is_empty() {
            return None;
        }
        let seconds: Vec<f64> = runtimes.iter().map(Duration::as_secs_f64).collect();
        let min = seconds.iter().copied().fold(f64::INFINITY, f64::min);
        let max = seconds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = seconds.iter().sum::<f64>() / seconds.len() as f64;
        let variance = seconds.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / seconds.len() as f64;
        Some(RuntimeStats { min, max, mean, std_dev: variance.sqrt() })
    }
}

pub fn run_analysis(sizes: &[usize], x_range: (f64, f64), y_range: (f64, f64), distribution: Distribution, seed: u64) -> RuntimeAnalysis {
    let mut runtimes: BTreeMap<Algorithm, Vec<Duration>> = Algorithm::ALL
        .iter()
        .map(|algorithm| (*algorithm, Vec::with_capacity(sizes.len())))
        .collect();

    for &n in sizes {
        let cloud = PointCloud::generate(format!("{}_{}", distribution, n), n, x_range, y_range, distribution, seed);
        for (algorithm, timings) in runtimes.iter_mut() {
            let elapsed = measure_runtime(*algorithm, cloud.points());
            log::debug!("{} on {} points: {:?}", algorithm.name(), n, elapsed);
            timings.push(elapsed);
        }
    }
    log::info!("Runtime analysis done for sizes {:?} ({} distribution)", sizes, distribution);

    RuntimeAnalysis { distribution, x_range, y_range, sizes: sizes.to_vec(), runtimes }
}

pub fn run_distribution_analysis(n: usize, repeats: usize, x_range: (f64, f64), y_range: (f64, f64), distribution: Distribution, seed: u64) -> DistributionAnalysis {
    let cloud = PointCloud::generate(format!("{}_{}", distribution, n), n, x_range, y_range, distribution, seed);
    let mut runtimes: BTreeMap<Algorithm, Vec<Duration>> = Algorithm::ALL
        .iter()
        .map(|algorithm| (*algorithm, Vec::with_capacity(repeats)))
        .collect();

    for _ in 0..repeats {
        for (algorithm, timings) in runtimes.iter_mut() {
            timings.push(measure_runtime(*algorithm, cloud.points()));
        }
    }
    log::info!("Runtime distribution done: {} runs over {} points ({} distribution)", repeats, n, distribution);

    DistributionAnalysis { distribution, x_range, y_range, n, runtimes }
}

impl DistributionAnalysis {
    pub fn stats(&self) -> BTreeMap<Algorithm, RuntimeStats> {
        self.runtimes
            .iter()
            .filter_map(|(algorithm, timings)| RuntimeStats::new(timings).map(|stats| (*algorithm, stats)))
            .collect()
    }

    /// One line per algorithm: minimum, maximum, mean and standard deviation in seconds.
    pub fn report(&self) -> String {
        let mut report = String::new();
        for (algorithm, stats) in self.stats() {
            report.push_str(&format!(
                "{}: Min: {:.6}s, Max: {:.6}s, Mean: {:.6}s, Std Dev: {:.6}s\n",
                algorithm.name(),
                stats.min,
                stats.max,
                stats.mean,
                stats.std_dev
            ));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use crate::algorithms::Algorithm;
    use crate::benchmark::{run_analysis, run_distribution_analysis, RuntimeStats};
    use crate::point_cloud::Distribution;

    #[test]
    fn stats_of_known_series() {
        let timings = [Duration::from_secs(2), Duration::from_secs(4), Duration::from_secs(4), Duration::from_secs(4), Duration::from_secs(5), Duration::from_secs(5), Duration::from_secs(7), Duration::from_secs(9)];
        let stats = RuntimeStats::new(&timings).unwrap();
        assert_eq!(stats.min, 2.);
        assert_eq!(stats.max, 9.);
        assert_eq!(stats.mean, 5.);
        assert_eq!(stats.std_dev, 2.);
        assert_eq!(RuntimeStats::new(&[]), None);
    }

    #[test]
    fn analysis_covers_every_size() {
        let _ = env_logger::try_init();
        let sizes = [10, 50, 100];
        let analysis = run_analysis(&sizes, (-5., 5.), (-5., 5.), Distribution::Uniform, 0);
        assert_eq!(analysis.sizes, sizes.to_vec());
        assert_eq!(analysis.runtimes.len(), Algorithm::ALL.len());
        assert!(analysis.runtimes.values().all(|timings| timings.len() == sizes.len()));
    }

    #[test]
    fn distribution_report() {
        let _ = env_logger::try_init();
        let analysis = run_distribution_analysis(50, 5, (0., 1.), (0., 1.), Distribution::Gaussian, 0);
        assert!(analysis.runtimes.values().all(|timings| timings.len() == 5));
        let report = analysis.report();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Graham Scan: Min: "));
        assert!(lines[3].starts_with("Monotone Chain: Min: "));
        assert!(lines.iter().all(|line| line.contains("Std Dev: ")));
    }
}
