//! Column assignment within depth bands.

use std::collections::HashMap;

/// Assign each node a zero-based column within its depth band.
///
/// Nodes sharing a depth are numbered in insertion order, so no two nodes in
/// the same band share a column.
pub fn assign_columns(depths: &[usize]) -> Vec<usize> {
    let mut next_column: HashMap<usize, usize> = HashMap::new();
    depths
        .iter()
        .map(|&depth| {
            let slot = next_column.entry(depth).or_insert(0);
            let column = *slot;
            *slot += 1;
            column
        })
        .collect()
}
