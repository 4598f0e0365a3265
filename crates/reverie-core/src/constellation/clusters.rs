//! Connected-component clusters
//!
//! Partitions the node indices of an adjacency graph into connected
//! components with an explicit stack-based depth-first traversal - plain
//! arrays only, no recursion, so pathological graphs cannot blow the call
//! stack.
//!
//! Ordering is part of the contract: the cluster list follows the ascending
//! index of each component's root, and members appear in DFS preorder with
//! neighbors explored in ascending index order. The rendering collaborator
//! relies on this for stable node placement.

use crate::constellation::matrix::AdjacencyMatrix;

/// Partition indices 0..N-1 into connected components
///
/// Every index lands in exactly one cluster. A fully disconnected graph
/// yields N singletons; a fully connected one yields a single cluster of
/// all N indices in DFS order from 0.
pub fn find_clusters(adjacency: &AdjacencyMatrix) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }

        let mut cluster = Vec::new();
        stack.push(root);

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            cluster.push(node);

            // Push neighbors in reverse so the lowest index is explored
            // first, matching recursive DFS preorder
            for neighbor in (0..n).rev() {
                if adjacency.get(node, neighbor) == 1 && !visited[neighbor] {
                    stack.push(neighbor);
                }
            }
        }

        clusters.push(cluster);
    }

    clusters
}

// ============================================================================
// TESTS
// ============================================================================
