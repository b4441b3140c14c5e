use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use plotly::{Histogram, Layout, Plot, Scatter};
use plotly::common::{Line, Marker, Mode, Title, Visible};
use plotly::layout::{Axis, BarMode, Legend};
use crate::algorithms::Algorithm;
use crate::benchmark::{DistributionAnalysis, RuntimeAnalysis};
use crate::point_cloud::{Coordinates, Distribution, PointCloud};
use crate::trace::Trace;

pub mod convex_hull;
pub mod trace;
pub mod algorithms;
pub mod point_cloud;
pub mod benchmark;

/// Outcome of one algorithm on one cloud, detached from the cloud it borrowed from.
#[derive(Debug, Clone, PartialEq)]
pub struct HullRun {
    pub algorithm: Algorithm,
    pub hull: Vec<Coordinates>,
    /// Number of trace snapshots recorded during the computation.
    pub steps: usize,
    /// Wall clock time of the traced computation.
    pub elapsed: Duration,
}

/// Computes the hull of `cloud` with each algorithm, recording the trace.
/// When `output_dir` is provided, one replay plot per algorithm is written there.
pub fn process_point_cloud(cloud: &PointCloud, algorithms: &[Algorithm], output_dir: Option<&Path>) -> Result<Vec<HullRun>, Box<dyn Error>> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }
    let mut runs = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let instant = Instant::now();
        let (hull, trace) = cloud.hull_with_trace(*algorithm);
        let elapsed = instant.elapsed();
        log::info!(
            "{} on cloud \"{}\": {} points, hull of {} vertices, {} steps in {:?}",
            algorithm.name(),
            cloud.name,
            cloud.len(),
            hull.len().saturating_sub(1),
            trace.len(),
            elapsed
        );

        if let Some(dir) = output_dir {
            let path = dir.join(format!("hull-{}-{}.html", cloud.name, algorithm));
            draw_hull_trace(cloud, *algorithm, &hull, &trace, &path);
            log::info!("Trace plot written to {}", path.display());
        }

        runs.push(HullRun {
            algorithm: *algorithm,
            hull: hull.into_iter().copied().collect(),
            steps: trace.len(),
            elapsed,
        });
    }
    Ok(runs)
}

/// Times the algorithms over clouds of increasing size and writes the runtime plot in `output_dir`.
pub fn process_runtime_analysis(sizes: &[usize], x_range: (f64, f64), y_range: (f64, f64), distribution: Distribution, seed: u64, output_dir: &Path) -> Result<RuntimeAnalysis, Box<dyn Error>> {
    let analysis = benchmark::run_analysis(sizes, x_range, y_range, distribution, seed);
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(analysis_file_name(distribution, x_range, y_range, "runtime"));
    draw_runtime_plot(&analysis, &path);
    log::info!("Runtime plot written to {}", path.display());
    Ok(analysis)
}

/// Times the algorithms `repeats` times over one cloud, writes the histogram plot
/// and the text summary (`runtime_analysis.txt`) in `output_dir`.
pub fn process_distribution_analysis(n: usize, repeats: usize, x_range: (f64, f64), y_range: (f64, f64), distribution: Distribution, seed: u64, output_dir: &Path) -> Result<DistributionAnalysis, Box<dyn Error>> {
    let analysis = benchmark::run_distribution_analysis(n, repeats, x_range, y_range, distribution, seed);
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(analysis_file_name(distribution, x_range, y_range, "runtime_distribution"));
    draw_runtime_distribution(&analysis, &path);
    fs::write(output_dir.join("runtime_analysis.txt"), analysis.report())?;
    log::info!("Runtime distribution written to {}", output_dir.display());
    Ok(analysis)
}

fn analysis_file_name(distribution: Distribution, x_range: (f64, f64), y_range: (f64, f64), suffix: &str) -> String {
    format!("{}_{}_{}_{}_{}_{}.html", distribution, x_range.0, x_range.1, y_range.0, y_range.1, suffix)
}

/// Draws the cloud, its hull and every trace snapshot. Snapshots are hidden by default (legend only),
/// toggling them in order replays the computation.
pub fn draw_hull_trace<P: AsRef<Path>>(cloud: &PointCloud, algorithm: Algorithm, hull: &[&Coordinates], trace: &Trace<Coordinates>, path: P) {
    let mut layout = Layout::new()
        .title(Title::new(&*format!("{} of \"{}\"", algorithm.name(), cloud.name)))
        .legend(Legend::new());
    // one unit of margin around the cloud
    if let Some(((min_x, max_x), (min_y, max_y))) = cloud.bounds() {
        layout = layout
            .x_axis(Axis::new().title(Title::new("X-axis")).range(vec![min_x - 1., max_x + 1.]))
            .y_axis(Axis::new().title(Title::new("Y-axis")).range(vec![min_y - 1., max_y + 1.]));
    }
    let mut plot = Plot::new();
    plot.set_layout(layout);

    let points = Scatter::new(
        cloud.points().iter().map(|p| p.0).collect(),
        cloud.points().iter().map(|p| p.1).collect())
        .mode(Mode::Markers)
        .marker(Marker::new().size(5))
        .name("Points");
    plot.add_trace(points);

    for (index, step) in trace.steps().iter().enumerate() {
        let trace_step = Scatter::new(
            step.iter().map(|p| p.0).collect(),
            step.iter().map(|p| p.1).collect())
            .mode(Mode::LinesMarkers)
            .visible(Visible::LegendOnly)
            .name(format!("Step {}", index));
        plot.add_trace(trace_step);
    }

    let hull = Scatter::new(
        hull.iter().map(|p| p.0).collect(),
        hull.iter().map(|p| p.1).collect())
        .mode(Mode::Lines)
        .line(Line::new().width(1.5))
        .name("Hull");
    plot.add_trace(hull);

    plot.write_html(path);
}

/// Draws the runtime of every algorithm against the number of points.
pub fn draw_runtime_plot<P: AsRef<Path>>(analysis: &RuntimeAnalysis, path: P) {
    let mut plot = Plot::new();
    plot.set_layout(Layout::new()
        .title(Title::new(&*format!(
            "Runtime Comparison ({} distribution, range {:?}, {:?})",
            analysis.distribution, analysis.x_range, analysis.y_range)))
        .x_axis(Axis::new().title(Title::new("Number of points (n)")))
        .y_axis(Axis::new().title(Title::new("Time (seconds)")).tick_format(".3s"))
        .legend(Legend::new()));

    for (algorithm, timings) in &analysis.runtimes {
        let trace = Scatter::new(
            analysis.sizes.clone(),
            timings.iter().map(Duration::as_secs_f64).collect())
            .mode(Mode::LinesMarkers)
            .name(algorithm.name());
        plot.add_trace(trace);
    }

    plot.write_html(path);
}

/// Draws overlaid histograms of the repeated timings of every algorithm.
pub fn draw_runtime_distribution<P: AsRef<Path>>(analysis: &DistributionAnalysis, path: P) {
    let mut plot = Plot::new();
    plot.set_layout(Layout::new()
        .title(Title::new(&*format!(
            "Runtime Distribution ({} points, {} distribution)",
            analysis.n, analysis.distribution)))
        .x_axis(Axis::new().title(Title::new("Time (seconds)")).tick_format(".3s"))
        .y_axis(Axis::new().title(Title::new("Frequency")))
        .bar_mode(BarMode::Overlay)
        .legend(Legend::new()));

    for (algorithm, timings) in &analysis.runtimes {
        let trace = Histogram::new(timings.iter().map(Duration::as_secs_f64).collect())
            .n_bins_x(15)
            .opacity(0.75)
            .name(format!("{} Runtime Distribution", algorithm.name()));
        plot.add_trace(trace);
    }

    plot.write_html(path);
}

#[cfg(test)]
mod tests {
    use crate::algorithms::Algorithm;
    use crate::point_cloud::{Distribution, PointCloud};
    use crate::{analysis_file_name, process_distribution_analysis, process_point_cloud, process_runtime_analysis};

    #[test]
    fn point_cloud_runs_and_plots() {
        let _ = env_logger::try_init();
        let dir = tempfile::tempdir().unwrap();
        let cloud = PointCloud::new(
            String::from("complex"),
            vec![(0., 0.), (1., 2.), (2., 2.), (2., 0.), (1., 1.), (3., 1.), (1., 0.)]);
        let runs = process_point_cloud(&cloud, &Algorithm::ALL, Some(dir.path())).unwrap();
        assert_eq!(runs.len(), 4);
        let quickhull = runs.iter().find(|run| run.algorithm == Algorithm::QuickHull).unwrap();
        assert_eq!(quickhull.hull, vec![(0., 0.), (2., 0.), (3., 1.), (2., 2.), (1., 2.), (0., 0.)]);
        for run in &runs {
            assert!(run.steps > 1);
            assert!(dir.path().join(format!("hull-complex-{}.html", run.algorithm)).exists());
        }
    }

    #[test]
    fn point_cloud_without_plots() {
        let cloud = PointCloud::new(String::from("pair"), vec![(3., 3.), (4., 4.)]);
        let runs = process_point_cloud(&cloud, &[Algorithm::MonotoneChain], None).unwrap();
        assert_eq!(runs[0].hull, vec![(3., 3.), (4., 4.), (3., 3.)]);
        assert_eq!(runs[0].steps, 1);
    }

    #[test]
    fn runtime_outputs() {
        let _ = env_logger::try_init();
        let dir = tempfile::tempdir().unwrap();
        let analysis = process_runtime_analysis(&[10, 20], (0., 1.), (0., 1.), Distribution::Uniform, 0, dir.path()).unwrap();
        assert_eq!(analysis.sizes, vec![10, 20]);
        assert!(dir.path().join(analysis_file_name(Distribution::Uniform, (0., 1.), (0., 1.), "runtime")).exists());

        let analysis = process_distribution_analysis(20, 3, (-5., 5.), (-5., 5.), Distribution::Uniform, 0, dir.path()).unwrap();
        assert_eq!(analysis.n, 20);
        assert!(dir.path().join(analysis_file_name(Distribution::Uniform, (-5., 5.), (-5., 5.), "runtime_distribution")).exists());
        let report = std::fs::read_to_string(dir.path().join("runtime_analysis.txt")).unwrap();
        assert_eq!(report, analysis.report());
    }
}
