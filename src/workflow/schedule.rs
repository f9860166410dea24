//! Dependency-level scheduling.
//!
//! Modules form a directed graph through shared responses: an edge i -> j
//! exists when module i produces any response module j consumes. The
//! graph is sorted into levels with Kahn's algorithm; modules within one
//! level share no dependency and are safe to execute in any order, or
//! concurrently by a collaborator that honors the declared port sets.

use super::module::Module;
use crate::error::{Error, Result};
use log::warn;
use std::collections::VecDeque;

/// Orders modules into dependency-respecting levels.
///
/// `responses` is the authoritative response list of the enclosing
/// process; only names on it create edges. Overlap of any size between
/// one module's outputs and another's inputs makes a single boolean edge.
///
/// Returns the levels as indices into `modules`, level 0 first. Fails
/// with [`Error::CyclicDependency`] when any module cannot be placed —
/// no partial order is returned.
pub fn organize(modules: &[Module], responses: &[&str]) -> Result<Vec<Vec<usize>>> {
    let count = modules.len();

    // boolean produces/consumes sets over the response list
    let produces: Vec<Vec<bool>> = modules
        .iter()
        .map(|m| responses.iter().map(|r| m.produces(r)).collect())
        .collect();
    let consumes: Vec<Vec<bool>> = modules
        .iter()
        .map(|m| responses.iter().map(|r| m.consumes(r)).collect())
        .collect();

    // adjacency and indegree; overlap size never weights the edge
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut indegree = vec![0usize; count];
    for i in 0..count {
        for j in 0..count {
            let linked = (0..responses.len()).any(|r| produces[i][r] && consumes[j][r]);
            if linked {
                successors[i].push(j);
                indegree[j] += 1;
            }
        }
    }

    // Kahn's algorithm with level assignment
    let mut level = vec![usize::MAX; count];
    let mut queue = VecDeque::new();
    let mut organized: Vec<Vec<usize>> = Vec::new();
    for (i, &deg) in indegree.iter().enumerate() {
        if deg == 0 {
            level[i] = 0;
            queue.push_back(i);
            if organized.is_empty() {
                organized.push(Vec::new());
            }
            organized[0].push(i);
        }
    }
    while let Some(i) = queue.pop_front() {
        for &j in &successors[i] {
            indegree[j] -= 1;
            if indegree[j] == 0 {
                level[j] = level[i] + 1;
                queue.push_back(j);
                if organized.len() <= level[j] {
                    organized.push(Vec::new());
                }
                organized[level[j]].push(j);
            }
        }
    }

    // any unplaced module sits on a cycle
    let stuck: Vec<String> = (0..count)
        .filter(|&i| level[i] == usize::MAX)
        .map(|i| modules[i].name.clone())
        .collect();
    if !stuck.is_empty() {
        warn!("dependency cycle through modules {stuck:?}");
        return Err(Error::CyclicDependency { modules: stuck });
    }
    Ok(organized)
}
