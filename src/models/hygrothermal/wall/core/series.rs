//! Alignment-preserving operations between node and edge sequences.
//!
//! A wall with `n` nodes has `n − 1` edges. Edge `i` joins nodes `i` and
//! `i + 1`.

/// First difference `values[i + 1] − values[i]`, one entry per edge.
pub(crate) fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Arithmetic mean of the two nodes on each edge.
pub(crate) fn edge_mean(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|pair| 0.5 * (pair[0] + pair[1])).collect()
}

/// Net inflow at each node from the fluxes on its two edges.
///
/// Node `i` receives `flux[i] − flux[i − 1]`. The first and last nodes have
/// a single edge and are held fixed, so their balance is zero.
pub(crate) fn node_balance(flux: &[f64]) -> Vec<f64> {
    let mut balance = Vec::with_capacity(flux.len() + 1);
    balance.push(0.0);
    balance.extend(flux.windows(2).map(|pair| pair[1] - pair[0]));
    if !flux.is_empty() {
        balance.push(0.0);
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_follow_nodes_and_edges() {
        let nodes = [1.0, 3.0, 6.0, 10.0];
        assert_eq!(diff(&nodes), vec![2.0, 3.0, 4.0]);
        assert_eq!(edge_mean(&nodes), vec![2.0, 4.5, 8.0]);
        assert_eq!(node_balance(&diff(&nodes)), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn balance_of_uniform_flux_is_zero() {
        assert_eq!(node_balance(&[2.5; 5]), vec![0.0; 6]);
    }
}
