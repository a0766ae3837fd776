//! Small front-end over `ddroute-core`: build a system from a JSON adjacency file, optionally
//! simulate one edge's expected delay changing, and print the resulting tables.

use clap::{Parser, Subcommand};
use ddroute_core::system::System;
use log::info;
use std::path::PathBuf;

mod graph_file;

#[derive(Parser, Debug)]
#[command(name = "ddroute", author, about = "Distributed two-delay routing core demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a system from a graph file and print every node's initial table.
    Init {
        /// JSON adjacency file: `{ node -> { neighbour -> [expected_delay, worst_case_delay] } }`.
        graph_file: PathBuf,
        /// Destination node identifier.
        destination: String,
    },
    /// Build a system, then simulate one edge's expected delay changing.
    Change {
        /// JSON adjacency file: `{ node -> { neighbour -> [expected_delay, worst_case_delay] } }`.
        graph_file: PathBuf,
        /// Destination node identifier.
        destination: String,
        /// Upstream endpoint of the edge to change.
        from: String,
        /// Downstream endpoint of the edge to change.
        to: String,
        /// New expected delay for the edge (must not exceed its worst-case delay).
        new_expected_delay: u64,
        /// Print the protocol's prose log alongside the resulting tables.
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Init { graph_file, destination } => {
            let graph = graph_file::load_graph(&graph_file)?;
            info!("building system for destination {}", destination);
            let system = System::build_system(graph, destination)?;
            print_tables(&system);
        }
        Command::Change { graph_file, destination, from, to, new_expected_delay, verbose } => {
            let graph = graph_file::load_graph(&graph_file)?;
            let mut system = System::build_system(graph, destination)?;
            info!("simulating {} -> {} = {}", from, to, new_expected_delay);
            system.simulate_edge_change(&from, &to, new_expected_delay)?;

            if verbose {
                for line in system.logs() {
                    println!("{}", line);
                }
            }
            println!("messages sent: {}", system.messages_sent());
            print_tables(&system);
        }
    }
    Ok(())
}

fn print_tables(system: &System<String>) {
    let tables = system.tables();
    let mut nodes: Vec<_> = tables.keys().cloned().collect();
    nodes.sort();
    for node in nodes {
        println!("{}:", node);
        for entry in tables[&node].sorted() {
            println!("  ({}, {:?}, {})", entry.worst_case_bound, entry.parent, entry.expected_delay);
        }
    }
}
