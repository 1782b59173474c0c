//! Build command implementation.

use notegraph_core::config::loader::ConfigError;
use notegraph_core::config::ResolvedConfig;
use notegraph_core::{DepthLimit, GraphBuilder};

use super::output::{print_graph_json, print_graph_table};
use crate::BuildArgs;

pub async fn run(loaded: Result<ResolvedConfig, ConfigError>, args: BuildArgs) {
    // --root wins over the profile, and then no config file is needed
    let (root, config_depth) = match (args.root, loaded) {
        (Some(root), loaded) => (root, loaded.ok().map(|rc| rc.max_depth)),
        (None, Ok(rc)) => (rc.notes_root, Some(rc.max_depth)),
        (None, Err(e)) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Hint: pass --root <DIR> to build without a config file.");
            std::process::exit(1);
        }
    };

    let max_depth =
        args.max_depth.map(DepthLimit::Limited).or(config_depth).unwrap_or_default();

    let builder = GraphBuilder::new(&root).max_depth(max_depth);
    let graph = match builder.build().await {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error building note graph: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        print_graph_json(&graph);
    } else {
        print_graph_table(&graph, &root);
    }
}
