/// Size of a node with no edges.
pub const MIN_NODE_SIZE: f64 = 1.0;
/// Size used when size-by-degree is off.
pub const DEFAULT_NODE_SIZE: f64 = 2.0;

/// Fourth root of the degree on top of a positive floor, so hubs stay
/// readable next to leaves.
pub fn degree_size(degree: usize) -> f64 {
	MIN_NODE_SIZE + (degree as f64).sqrt().sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn degree_zero_maps_to_positive_minimum() {
		assert!(degree_size(0) >= MIN_NODE_SIZE);
		assert!(MIN_NODE_SIZE > 0.0);
	}

	#[test]
	fn size_is_non_decreasing_in_degree() {
		let sizes: Vec<f64> = [0, 1, 5, 100].into_iter().map(degree_size).collect();
		assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{sizes:?}");
		// compressive: a 100x hub is far less than 100x larger
		assert!(sizes[3] / sizes[1] < 3.0);
	}
}
