use std::error::Error;
use std::path::PathBuf;
use std::process;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap::error::ErrorKind;
use convex_hulls::{process_distribution_analysis, process_point_cloud, process_runtime_analysis};
use convex_hulls::algorithms::Algorithm;
use convex_hulls::point_cloud::{Distribution, PointCloud};

/// Parse a `lo:hi` pair, e.g. `-5:5`
fn parse_range(s: &str) -> Result<(f64, f64), Box<dyn Error + Send + Sync + 'static>> {
    let pos = s
        .find(':')
        .ok_or_else(|| format!("invalid range: no `:` found in `{s}` (expected lo:hi)"))?;
    let (low, high): (f64, f64) = (s[..pos].trim().parse()?, s[pos + 1..].trim().parse()?);
    if low > high {
        Err(format!("invalid range: {s} (lower bound greater than upper bound)"))?;
    }
    Ok((low, high))
}

/// Convex hulls of 2D point clouds with Graham scan, Jarvis march, QuickHull and Andrew's monotone chain.
///
/// Hulls can be computed on a point file (one `x y` pair per line after a header line) or on a random cloud,
/// optionally plotting every intermediate step of the computation.
/// The runtime of the algorithms can be compared over clouds of increasing size, or over repeated runs on the same cloud.
/// Plots and reports are written in the output folder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder receiving plots and reports.
    #[arg(short, long, global = true, default_value = "results")]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the hull of a point cloud with one or more algorithms.
    Hull {
        /// Point file to read.
        #[arg(short, long, conflicts_with = "random")]
        file: Option<PathBuf>,

        /// Number of random points to generate instead of reading a file.
        #[arg(short, long)]
        random: Option<usize>,

        /// Algorithms to run, separated with a comma: graham, jarvis, quickhull, monotone. All of them by default.
        #[arg(short, long, value_delimiter = ',')]
        algorithms: Vec<Algorithm>,

        #[command(flatten)]
        generation: Generation,

        /// Print the number of recorded steps of every algorithm.
        #[arg(short, long)]
        trace: bool,

        /// Write one step by step plot per algorithm in the output folder.
        #[arg(short, long)]
        plot: bool,
    },
    /// Compare the runtime of every algorithm over clouds of increasing size.
    Bench {
        /// Cloud sizes, separated with a comma.
        #[arg(short, long, value_delimiter = ',', default_value = "10,50,100,200,400,800,1000")]
        sizes: Vec<usize>,

        #[command(flatten)]
        generation: Generation,
    },
    /// Time every algorithm repeatedly over the same cloud and report the runtime distribution.
    Distribution {
        /// Number of points of the cloud.
        #[arg(short, long, default_value_t = 50)]
        n: usize,

        /// Number of timed runs per algorithm.
        #[arg(short, long, default_value_t = 100)]
        repeats: usize,

        #[command(flatten)]
        generation: Generation,
    },
}

/// How random clouds are generated.
#[derive(Args, Debug)]
struct Generation {
    /// Distribution of the points: uniform or gaussian. Gaussian clouds ignore the ranges.
    #[arg(short, long, default_value = "uniform")]
    distribution: Distribution,

    /// Range of the x coordinates, as lo:hi.
    #[arg(long, value_parser = parse_range, default_value = "0:1", allow_hyphen_values = true)]
    x_range: (f64, f64),

    /// Range of the y coordinates, as lo:hi.
    #[arg(long, value_parser = parse_range, default_value = "0:1", allow_hyphen_values = true)]
    y_range: (f64, f64),

    /// Seed of the random generator.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    let output = args.output;

    let result = match args.command {
        Command::Hull { file, random, algorithms, generation, trace, plot } => {
            let cloud = match (file, random) {
                (Some(path), _) => match PointCloud::from_file(&path) {
                    Ok(cloud) => cloud,
                    Err(e) => {
                        log::error!("Could not load {}: {}", path.display(), e);
                        process::exit(1);
                    }
                },
                (None, Some(n)) => PointCloud::generate(
                    format!("{}_{}", generation.distribution, n),
                    n,
                    generation.x_range,
                    generation.y_range,
                    generation.distribution,
                    generation.seed),
                (None, None) => {
                    let mut cmd = Cli::command();
                    cmd.error(
                        ErrorKind::MissingRequiredArgument,
                        "Pass either a point file with --file or a number of random points with --random.",
                    )
                        .exit();
                }
            };
            let algorithms = if algorithms.is_empty() { Algorithm::ALL.to_vec() } else { algorithms };
            log::info!("Computing the hull of \"{}\" ({} points) with {:?}", cloud.name, cloud.len(), algorithms);

            process_point_cloud(&cloud, &algorithms, plot.then_some(output.as_path())).map(|runs| {
                for run in runs {
                    println!("{}: {:?}", run.algorithm.name(), run.hull);
                    if trace {
                        println!("{}: {} steps in {:?}", run.algorithm.name(), run.steps, run.elapsed);
                    }
                }
            })
        }
        Command::Bench { sizes, generation } => {
            if sizes.is_empty() {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::InvalidValue, "Pass at least one cloud size.").exit();
            }
            process_runtime_analysis(&sizes, generation.x_range, generation.y_range, generation.distribution, generation.seed, &output)
                .map(|analysis| {
                    for (algorithm, timings) in &analysis.runtimes {
                        println!("{}: {:?}", algorithm.name(), analysis.sizes.iter().zip(timings).collect::<Vec<_>>());
                    }
                })
        }
        Command::Distribution { n, repeats, generation } => {
            if repeats == 0 {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::InvalidValue, "The number of repeats must be positive.").exit();
            }
            process_distribution_analysis(n, repeats, generation.x_range, generation.y_range, generation.distribution, generation.seed, &output)
                .map(|analysis| print!("{}", analysis.report()))
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use crate::{parse_range, Cli};

    #[test]
    fn ranges() {
        assert_eq!(parse_range("-5:5").unwrap(), (-5., 5.));
        assert_eq!(parse_range(" 0 : 1.5").unwrap(), (0., 1.5));
        assert!(parse_range("0-1").is_err());
        assert!(parse_range("2:1").is_err());
        assert!(parse_range("a:1").is_err());
    }

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }
}
