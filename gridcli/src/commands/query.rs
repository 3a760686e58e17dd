/// Topology query commands.
use super::*;

impl Downstream {
    pub fn run(self) {
        let Downstream { network, edge } = self;
        let (_, graph) = load_graph(&network);
        let downstream = match gridlib::topology::downstream_vertices(&graph, edge) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Query failed: {}", err),
        };
        let formatted: Vec<String> = downstream.iter().map(|v| v.to_string()).collect();
        println!("{} {}", "Downstream:".green().bold(), formatted.join(" "));
    }
}

impl Alternatives {
    pub fn run(self) {
        let Alternatives {
            network,
            edge,
            json,
            output,
        } = self;
        let (network, graph) = load_graph(&network);
        let candidates = match gridlib::topology::alternative_edges(&graph, edge) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Query failed: {}", err),
        };

        if let Some(dir) = output {
            let name = format!("{} alternatives {}", network.name, edge);
            if let Err(e) = io::fs::save_table(&candidates, dir, &name) {
                fatal_error!(1, "Cannot save result table: {}", e);
            }
        }

        if json {
            let serialized = match serde_json::to_string_pretty(&candidates) {
                Ok(s) => s,
                Err(e) => fatal_error!(1, "Error while serializing results: {}", e),
            };
            println!("{}", serialized);
            return;
        }
        if candidates.is_empty() {
            println!("{}", "No backfeed candidate for this contingency.".yellow());
            return;
        }
        for candidate in candidates {
            let enabled: Vec<String> = candidate
                .enabled_edges
                .iter()
                .map(|e| e.to_string())
                .collect();
            println!("{} {}", "Candidate:".green().bold(), candidate.edge_id);
            println!("  enabled set: {}", enabled.join(" "));
        }
    }
}

impl Contingencies {
    pub fn run(self) {
        let Contingencies {
            network,
            json,
            output,
        } = self;
        let (network, graph) = load_graph(&network);

        let mut enabled: Vec<EdgeId> = graph
            .edges()
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.id)
            .collect();
        enabled.sort_unstable();

        let mut report: Vec<serde_json::Value> = Vec::with_capacity(enabled.len());
        for edge in enabled {
            let candidates = match gridlib::topology::alternative_edges(&graph, edge) {
                Ok(x) => x,
                Err(err) => fatal_error!(1, "Query failed for edge {}: {}", edge, err),
            };
            let ids: Vec<EdgeId> = candidates.iter().map(|c| c.edge_id).collect();
            if json || output.is_some() {
                report.push(serde_json::json!({
                    "edgeId": edge,
                    "candidates": ids,
                }));
            }
            if !json {
                if ids.is_empty() {
                    println!("{} {:>6}: {}", "edge".bold(), edge, "no backfeed".yellow());
                } else {
                    let formatted: Vec<String> = ids.iter().map(|c| c.to_string()).collect();
                    println!("{} {:>6}: {}", "edge".bold(), edge, formatted.join(" "));
                }
            }
        }

        if let Some(dir) = output {
            let name = format!("{} contingencies", network.name);
            if let Err(e) = io::fs::save_table(&report, dir, &name) {
                fatal_error!(1, "Cannot save result table: {}", e);
            }
        }

        if json {
            let serialized = match serde_json::to_string_pretty(&report) {
                Ok(s) => s,
                Err(e) => fatal_error!(1, "Error while serializing results: {}", e),
            };
            println!("{}", serialized);
        }
    }
}
