use super::*;

mod query;
pub use query::*;

mod validate;
pub use validate::*;

/// All CLI commands available in this binary.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Check a network and its load profiles for validity.
    #[command(alias = "v")]
    Validate(Validate),

    /// List the vertices downstream of an enabled edge.
    #[command(alias = "d")]
    Downstream(Downstream),

    /// List the normally-open edges that could back-feed the subtree behind
    /// an enabled edge.
    #[command(alias = "a")]
    Alternatives(Alternatives),

    /// Run the backfeed search for every enabled edge.
    #[command(alias = "c")]
    Contingencies(Contingencies),
}

#[derive(clap::Args, Debug)]
pub struct Validate {
    /// Path to the network JSON file.
    network: PathBuf,
    /// Path to the active power profile JSON file.
    active: PathBuf,
    /// Path to the reactive power profile JSON file.
    reactive: PathBuf,
    /// Path to the EV charging profile JSON file.
    ev: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct Downstream {
    /// Path to the network JSON file.
    network: PathBuf,
    /// Edge to hypothetically open.
    edge: EdgeId,
}

#[derive(clap::Args, Debug)]
pub struct Alternatives {
    /// Path to the network JSON file.
    network: PathBuf,
    /// Enabled edge modeled as failing.
    edge: EdgeId,
    /// Print the result as JSON (Hint: redirect stdout)
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Save the result table as JSON under this directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct Contingencies {
    /// Path to the network JSON file.
    network: PathBuf,
    /// Print the result as JSON (Hint: redirect stdout)
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Save the result table as JSON under this directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Command {
    pub fn run(self) {
        match self {
            Command::Validate(args) => args.run(),
            Command::Downstream(args) => args.run(),
            Command::Alternatives(args) => args.run(),
            Command::Contingencies(args) => args.run(),
        }
    }
}

/// Read a network file and build its topology graph.
fn load_graph(path: &Path) -> (io::Network, topology::Graph) {
    let network = match io::fs::read_network_from_file(path) {
        Ok(x) => x,
        Err(err) => fatal_error!(1, "Cannot read network: {}", err),
    };
    let (vertices, edges, source) = match network.topology_input() {
        Some(x) => x,
        None => fatal_error!(1, "Network lists no source"),
    };
    let graph = match topology::Graph::build(vertices, edges, source) {
        Ok(g) => g,
        Err(err) => fatal_error!(1, "Invalid grid topology: {}", err),
    };
    log::info!(
        "Loaded network {}: {} vertices, {} edges",
        network.name,
        graph.vertex_count(),
        graph.edges().len()
    );
    (network, graph)
}
