//! glyphtier CLI
//!
//! Reads a distance-information JSON file, clusters its fonts into a
//! hierarchy of small groups and writes the hierarchy as nested JSON arrays.
//!
//! ```text
//! glyphtier distances.json clusters.json -v
//! glyphtier distances.json --algorithm components --max-cluster-size 8
//! ```
//!
//! Exit code 0 on success, 1 on any failure.

use clap::{Parser, ValueEnum};
use glyphtier::io::{save_hierarchy, write_hierarchy};
use glyphtier::{
    CeilingMode, ClusterConfig, ClusterHierarchy, ConnectedComponents, DistanceIndex,
    DistanceInformation, EdgeWeight, GraphClustering, Mcl, RecursiveClusterer,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Recursive threshold clustering of fonts from a distance matrix
#[derive(Parser, Debug)]
#[command(name = "glyphtier")]
#[command(version)]
#[command(about = "Cluster fonts into a hierarchy of small similarity groups")]
struct Cli {
    /// Distance-information JSON (`fonts` + `distances`)
    input: PathBuf,

    /// Where to write the hierarchy (stdout when omitted)
    output: Option<PathBuf>,

    /// Clustering primitive run at each threshold
    #[arg(long, value_enum, default_value_t = Algorithm::Mcl)]
    algorithm: Algorithm,

    /// JSON file with `clustering` and `mcl` sections; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Groups larger than this are subdivided
    #[arg(long)]
    max_cluster_size: Option<usize>,

    /// Ceiling propagation between recursion levels
    #[arg(long, value_enum)]
    ceiling: Option<CeilingArg>,

    /// Edge weighting of the threshold graph
    #[arg(long, value_enum)]
    edge_weight: Option<EdgeWeightArg>,

    /// Recursion depth guard
    #[arg(long)]
    max_depth: Option<usize>,

    /// MCL inflation exponent
    #[arg(long)]
    inflation: Option<f64>,

    /// MCL expansion power
    #[arg(long)]
    expansion: Option<u32>,

    /// MCL iteration cap
    #[arg(long)]
    loop_limit: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    /// Markov clustering
    Mcl,
    /// Connected components (single linkage)
    Components,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CeilingArg {
    PerLevel,
    Inherited,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeWeightArg {
    Distance,
    InverseDistance,
    Uniform,
}

/// Contents of `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    clustering: ClusterConfig,
    mcl: Mcl,
}

impl Cli {
    fn run_config(&self) -> glyphtier::Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => {
                let file = std::fs::File::open(path)?;
                serde_json::from_reader(std::io::BufReader::new(file))?
            }
            None => RunConfig::default(),
        };

        let mut clustering = run.clustering;
        if let Some(size) = self.max_cluster_size {
            clustering = clustering.with_max_cluster_size(size);
        }
        if let Some(ceiling) = self.ceiling {
            clustering = clustering.with_ceiling(match ceiling {
                CeilingArg::PerLevel => CeilingMode::PerLevel,
                CeilingArg::Inherited => CeilingMode::Inherited,
            });
        }
        if let Some(weight) = self.edge_weight {
            clustering = clustering.with_edge_weight(match weight {
                EdgeWeightArg::Distance => EdgeWeight::Distance,
                EdgeWeightArg::InverseDistance => EdgeWeight::InverseDistance,
                EdgeWeightArg::Uniform => EdgeWeight::Uniform,
            });
        }
        if let Some(depth) = self.max_depth {
            clustering = clustering.with_max_depth(depth);
        }
        run.clustering = clustering;

        let mut mcl = run.mcl;
        if let Some(inflation) = self.inflation {
            mcl = mcl.with_inflation(inflation);
        }
        if let Some(expansion) = self.expansion {
            mcl = mcl.with_expansion(expansion);
        }
        if let Some(loop_limit) = self.loop_limit {
            mcl = mcl.with_loop_limit(loop_limit);
        }
        run.mcl = mcl;

        Ok(run)
    }
}

fn cluster_with<C: GraphClustering>(
    algorithm: C,
    config: ClusterConfig,
    index: &DistanceIndex,
) -> glyphtier::Result<ClusterHierarchy<String>> {
    tracing::info!(
        algorithm = algorithm.name(),
        entities = index.len(),
        max_cluster_size = config.max_cluster_size,
        "clustering"
    );
    RecursiveClusterer::new(algorithm)
        .with_config(config)
        .cluster(index)
}

fn run(cli: &Cli) -> glyphtier::Result<()> {
    let run = cli.run_config()?;
    let info = DistanceInformation::load(&cli.input)?;
    if let Some(charset) = &info.charset {
        tracing::debug!(charset = %charset, "loaded distance information");
    }
    let index = info.into_index()?;

    let max_cluster_size = run.clustering.max_cluster_size;
    let hierarchy = match cli.algorithm {
        Algorithm::Mcl => cluster_with(run.mcl, run.clustering, &index)?,
        Algorithm::Components => cluster_with(ConnectedComponents::new(), run.clustering, &index)?,
    };

    let stats = hierarchy.stats(max_cluster_size);
    tracing::info!(
        leaves = stats.leaves,
        entities = stats.entities,
        depth = stats.depth,
        largest_leaf = stats.largest_leaf,
        oversized_leaves = stats.oversized_leaves,
        "hierarchy built"
    );
    let report = hierarchy.validate_partition(index.names(), max_cluster_size);
    if report.is_clean() {
        tracing::debug!("{}", report);
    } else {
        tracing::warn!("{}", report);
    }

    match &cli.output {
        Some(path) => {
            save_hierarchy(path, &hierarchy)?;
            tracing::info!(path = %path.display(), "hierarchy written");
        }
        None => write_hierarchy(std::io::stdout().lock(), &hierarchy)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "glyphtier failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
