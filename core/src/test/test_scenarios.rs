//! End-to-end scenarios S1-S6.

use crate::batch::{solve, RelaxVariant};
use crate::system::System;
use crate::test::{assert_tables_match_oracle, s1_graph, s5_graph, sd_projection};

/// S1: the classic Baruah paper example. After init, check the sd-projected frontiers named in
/// the spec directly.
#[test]
fn s1_classic_baruah_paper_frontiers() {
    let system = System::build_system(s1_graph(), 4u32).unwrap();
    let tables = system.tables();

    assert_eq!(sd_projection(&tables[&1]), vec![(25, Some(4), 15)]);
    assert_eq!(sd_projection(&tables[&2]), vec![(15, Some(4), 12), (20, Some(3), 8)]);
    assert_eq!(sd_projection(&tables[&3]), vec![(10, Some(4), 4)]);
}

/// S2: increase along a chain. After the change, every table must equal the batch oracle on the
/// mutated graph.
#[test]
fn s2_increase_along_a_chain_matches_the_oracle() {
    let mut system = System::build_system(s1_graph(), 4u32).unwrap();
    system.simulate_edge_change(&2, &3, 5).unwrap();

    let tables = system.tables();
    let oracle = solve(system.graph(), &4u32, RelaxVariant::Original).unwrap();
    assert_tables_match_oracle(&tables, &oracle).unwrap();
}

/// S3: decreasing an edge whose downstream side is the destination picks up a cheaper entry that
/// propagates upstream.
#[test]
fn s3_decrease_to_zero_effect_edge_propagates() {
    let mut system = System::build_system(s1_graph(), 4u32).unwrap();
    system.simulate_edge_change(&3, &4, 1).unwrap();

    let tables = system.tables();
    assert!(tables[&3].iter().any(|e| e.worst_case_bound == 10
        && e.parent == Some(4)
        && e.expected_delay == 1));

    let oracle = solve(system.graph(), &4u32, RelaxVariant::Original).unwrap();
    assert_tables_match_oracle(&tables, &oracle).unwrap();
}

/// S4: setting an edge's expected delay to its current value is a strict no-op.
#[test]
fn s4_no_op_change_sends_no_messages() {
    let mut system = System::build_system(s1_graph(), 4u32).unwrap();
    system.simulate_edge_change(&1, &2, 4).unwrap();
    assert_eq!(system.messages_sent(), 0);
}

/// S5: a cyclic graph still drains to a fixpoint, and the per-parent tables still project onto
/// the same frontier as the strict-domination oracle.
#[test]
fn s5_cyclic_graph_terminates_and_matches_the_oracle() {
    let mut system = System::build_system(s5_graph(), 4u32).unwrap();
    system.simulate_edge_change(&3, &1, 1).unwrap();

    let tables = system.tables();
    let oracle = solve(system.graph(), &4u32, RelaxVariant::Original).unwrap();
    assert_tables_match_oracle(&tables, &oracle).unwrap();
}

/// S6: seed only, no simulated change. The destination holds only its sentinel entry, and every
/// other node's frontier already matches the from-scratch oracle.
#[test]
fn s6_seed_only_matches_the_oracle() {
    let system = System::build_system(s1_graph(), 4u32).unwrap();
    let tables = system.tables();
    assert_eq!(sd_projection(&tables[&4]), vec![(0, None, 0)]);

    let oracle = solve(system.graph(), &4u32, RelaxVariant::Original).unwrap();
    assert_tables_match_oracle(&tables, &oracle).unwrap();
}
