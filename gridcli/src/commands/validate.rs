/// Input validity command.
use super::*;

impl Validate {
    pub fn run(self) {
        let Validate {
            network,
            active,
            reactive,
            ev,
        } = self;

        let network = match io::fs::read_network_from_file(&network) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot read network: {}", err),
        };
        let mut profiles = Vec::with_capacity(3);
        for (path, name) in [(active, "active"), (reactive, "reactive"), (ev, "EV")] {
            match io::fs::read_profile_from_file(&path) {
                Ok(x) => profiles.push(x),
                Err(err) => fatal_error!(1, "Cannot read {} power profile: {}", name, err),
            }
        }

        match validation::validate_analysis_input(&network, &profiles[0], &profiles[1], &profiles[2])
        {
            Ok(graph) => {
                println!(
                    "{} {} ({} vertices, {} edges, source {})",
                    "Valid:".green().bold(),
                    network.name,
                    graph.vertex_count(),
                    graph.edges().len(),
                    graph.source_id()
                );
            }
            Err(err) => fatal_error!(1, "Invalid input: {}", err),
        }
    }
}
