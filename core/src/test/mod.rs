#[cfg(test)]
mod test_properties;
#[cfg(test)]
mod test_scenarios;

/// Build the graph from classic S1: `{1:{2:(4,10),4:(15,25)}, 2:{3:(4,10),4:(12,15)},
/// 3:{4:(4,10)}, 4:{}}`, destination 4.
pub(crate) fn s1_graph() -> crate::graph::Graph<u32> {
    let mut g = crate::graph::Graph::new();
    g.add_edge(crate::graph::Edge::new(1, 2, 4, 10).unwrap());
    g.add_edge(crate::graph::Edge::new(1, 4, 15, 25).unwrap());
    g.add_edge(crate::graph::Edge::new(2, 3, 4, 10).unwrap());
    g.add_edge(crate::graph::Edge::new(2, 4, 12, 15).unwrap());
    g.add_edge(crate::graph::Edge::new(3, 4, 4, 10).unwrap());
    g.add_node(4);
    g
}

/// The cyclic graph from S5.
pub(crate) fn s5_graph() -> crate::graph::Graph<u32> {
    let mut g = crate::graph::Graph::new();
    g.add_edge(crate::graph::Edge::new(1, 2, 3, 7).unwrap());
    g.add_edge(crate::graph::Edge::new(1, 3, 4, 8).unwrap());
    g.add_edge(crate::graph::Edge::new(1, 4, 5, 10).unwrap());
    g.add_edge(crate::graph::Edge::new(2, 1, 3, 7).unwrap());
    g.add_edge(crate::graph::Edge::new(2, 3, 2, 6).unwrap());
    g.add_edge(crate::graph::Edge::new(2, 4, 4, 9).unwrap());
    g.add_edge(crate::graph::Edge::new(3, 1, 4, 8).unwrap());
    g.add_edge(crate::graph::Edge::new(3, 2, 2, 6).unwrap());
    g.add_edge(crate::graph::Edge::new(3, 4, 3, 7).unwrap());
    g.add_edge(crate::graph::Edge::new(4, 1, 5, 10).unwrap());
    g.add_edge(crate::graph::Edge::new(4, 2, 4, 9).unwrap());
    g.add_edge(crate::graph::Edge::new(4, 3, 3, 7).unwrap());
    g
}

/// The `(d, parent, delta)` frontier of `table` under `insert_sd`-projection, sorted for
/// deterministic comparison.
pub(crate) fn sd_projection<N: crate::types::NodeId>(
    table: &crate::table::Table<N>,
) -> Vec<(crate::types::Delay, Option<N>, crate::types::Delay)> {
    use crate::entry::DominationPolicy;
    use crate::table::Table;

    let mut projected = Table::new();
    for entry in table.iter() {
        projected.insert(entry.clone(), DominationPolicy::StrictDomination).unwrap();
    }
    let mut out: Vec<_> = projected
        .iter()
        .map(|e| (e.worst_case_bound, e.parent.clone(), e.expected_delay))
        .collect();
    out.sort();
    out
}

/// Compare every node's incrementally maintained table against the batch oracle's, after
/// projecting both onto the same domination discipline. Used by every oracle-comparison test in
/// place of a bare `assert_eq!`, so a genuine divergence is reported as a
/// [`CoreError::OracleDisagreement`] naming the offending node rather than an assertion failure
/// pointing at this helper's own call site.
pub(crate) fn assert_tables_match_oracle<N: crate::types::NodeId>(
    tables: &std::collections::HashMap<N, crate::table::Table<N>>,
    oracle: &std::collections::HashMap<N, crate::table::Table<N>>,
) -> Result<(), crate::error::CoreError> {
    for (node, table) in tables {
        let actual = sd_projection(table);
        let expected = sd_projection(&oracle[node]);
        if actual != expected {
            return Err(crate::error::CoreError::OracleDisagreement(format!(
                "node {:?}: incremental frontier {:?} does not match oracle frontier {:?}",
                node, actual, expected
            )));
        }
    }
    Ok(())
}
