use super::FixtureSet;
use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use tracing::trace;

/// Computes a valid creation order for the fixture tables.
///
/// A name referenced only as a dependency becomes a node with no further
/// constraints; callers are expected to check the resulting order against
/// the model registry before constructing records. The order is
/// deterministic for a fixed input: nodes are scanned in load order and
/// placed as soon as their dependencies are satisfied.
pub fn creation_order(set: &FixtureSet) -> Result<Vec<String>> {
    let mut deps: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for (name, fixture) in set.tables() {
        deps.entry(name)
            .or_default()
            .extend(fixture.depends.iter().map(String::as_str));
        for dep in &fixture.depends {
            deps.entry(dep.as_str()).or_default();
        }
    }

    let mut order = Vec::with_capacity(deps.len());
    let mut placed: IndexSet<&str> = IndexSet::new();
    while placed.len() < deps.len() {
        let mut advanced = false;
        for (name, node_deps) in &deps {
            if placed.contains(name) {
                continue;
            }
            if node_deps.iter().all(|dep| placed.contains(dep)) {
                placed.insert(*name);
                order.push(name.to_string());
                advanced = true;
            }
        }
        if !advanced {
            return Err(cycle_error(&deps, &placed));
        }
    }

    trace!(?order, "resolved fixture creation order");
    Ok(order)
}

/// Derives the explicit cycle path among the tables that could not be
/// placed, as an ordered chain with the first table repeated at the end.
fn cycle_error(deps: &IndexMap<&str, IndexSet<&str>>, placed: &IndexSet<&str>) -> Error {
    let mut path: Vec<&str> = Vec::new();

    // Walk unsatisfied dependencies until a node repeats. Every remaining
    // node has at least one unplaced dependency, so the walk cannot stall.
    let mut current = deps
        .keys()
        .copied()
        .find(|name| !placed.contains(name))
        .unwrap_or_default();

    loop {
        if let Some(start) = path.iter().position(|&name| name == current) {
            let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(current.to_string());
            return Error::dependency_cycle(cycle);
        }
        path.push(current);

        current = match deps
            .get(current)
            .and_then(|d| d.iter().find(|dep| !placed.contains(*dep)))
        {
            Some(next) => *next,
            None => {
                // should be unreachable; report what we have
                return Error::dependency_cycle(path.iter().map(|s| s.to_string()).collect());
            }
        };
    }
}
