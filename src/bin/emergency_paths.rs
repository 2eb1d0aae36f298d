use clap::Parser;
use emergency_paths::{Dijkstra, EdgeList, EmergencyRouter, Path};
use ordered_float::OrderedFloat;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "emergency_paths")]
#[command(about = "Find paths in a graph in case of emergency edges.", long_about = None)]
struct Cli {
    /// Path to a JSON file containing a list of edges, eg. input.json
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the output file, eg. out.txt
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Edge to remove, eg. 1 3. Every edge of the original path is tried when absent.
    #[arg(short, long, num_args = 2, value_names = ["U", "V"])]
    removed: Option<Vec<i64>>,

    /// Upper bound on a single path search, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Start node number, eg. 1
    start: i64,

    /// End node number, eg. 3
    end: i64,
}

type Router = EmergencyRouter<
    i64,
    OrderedFloat<f64>,
    emergency_paths::UndirectedGraph<i64, OrderedFloat<f64>>,
    Dijkstra,
>;

fn configure_logger(output: Option<&std::path::Path>) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));

    if let Some(path) = output {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn log_input_data(edges: &EdgeList<i64>) {
    log::info!("Input graph:");
    for edge in &edges.edges {
        log::info!("{}", edge);
    }
    log::info!("");
}

fn log_path(path: Option<&Path<i64>>, length: Option<OrderedFloat<f64>>) {
    match (path, length) {
        (Some(path), Some(length)) => log::info!("distance: {}, path {}\n", length, path),
        _ => log::info!("path not found\n"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    configure_logger(cli.output.as_deref())?;

    let edges = EdgeList::load_or_sample(cli.input.as_ref())?;
    let finder = match cli.timeout_ms {
        Some(ms) => Dijkstra::new().with_deadline(Duration::from_millis(ms)),
        None => Dijkstra::new(),
    };
    let router: Router = EmergencyRouter::with_finder(edges.to_graph()?, cli.start, cli.end, finder)?;

    log_input_data(&edges);

    log::info!("Original path from node {} to node {}", cli.start, cli.end);
    let original = router.original_path();
    let original_length = original.map(|path| router.path_length(path)).transpose()?;
    log_path(original, original_length);

    let requested = match cli.removed.as_deref() {
        Some(&[u, v]) => Some((u, v)),
        _ => None,
    };
    let removed_edges = router.removed_edges_or_path(requested);
    for report in router.emergency_reports(&removed_edges)? {
        let (u, v) = report.removed_edge;
        log::info!("Emergency path for removed edge ({}, {})", u, v);
        log_path(report.path.as_ref(), report.length);
    }

    Ok(())
}
