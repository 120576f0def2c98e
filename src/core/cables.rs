use crate::error::{FarmError, FarmResult};
use crate::geometry::point::ProjectedPoint;

/// Result of the collection-network estimate.
#[derive(Debug, Clone, Copy)]
pub struct CableEstimate {
    /// Total trenching length in metres (MST weight).
    pub total_length: f64,
    /// Arithmetic centroid of the layout; stands in for an optimized
    /// substation placement.
    pub substation: ProjectedPoint,
}

/// Approximates collection-cable trenching as the minimum spanning
/// tree over the complete Euclidean graph of turbine positions.
///
/// Prim's algorithm on the dense distance matrix; layouts are small
/// enough that O(N^2) is the right tool.
pub fn estimate(layout: &[ProjectedPoint]) -> FarmResult<CableEstimate> {
    if layout.is_empty() {
        return Err(FarmError::Precondition(
            "cannot estimate cabling for an empty layout".to_string(),
        ));
    }

    let n = layout.len();
    let substation = centroid(layout);
    if n == 1 {
        return Ok(CableEstimate {
            total_length: 0.0,
            substation,
        });
    }

    // best_dist[i] = cheapest edge from the grown tree to vertex i
    let mut in_tree = vec![false; n];
    let mut best_dist = vec![f64::INFINITY; n];
    best_dist[0] = 0.0;
    let mut total_length = 0.0;

    for _ in 0..n {
        let mut next = None;
        let mut next_dist = f64::INFINITY;
        for i in 0..n {
            if !in_tree[i] && best_dist[i] < next_dist {
                next = Some(i);
                next_dist = best_dist[i];
            }
        }
        let u = next.expect("spanning tree always has an unvisited reachable vertex");
        in_tree[u] = true;
        total_length += next_dist;
        for v in 0..n {
            if !in_tree[v] {
                let d = layout[u].distance_to(&layout[v]);
                if d < best_dist[v] {
                    best_dist[v] = d;
                }
            }
        }
    }

    Ok(CableEstimate {
        total_length,
        substation,
    })
}

fn centroid(layout: &[ProjectedPoint]) -> ProjectedPoint {
    let n = layout.len() as f64;
    let (sx, sy) = layout
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    ProjectedPoint::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turbine_needs_no_cable() {
        let p = ProjectedPoint::new(10.0, 20.0);
        let est = estimate(&[p]).unwrap();
        assert_eq!(est.total_length, 0.0);
        assert_eq!(est.substation, p);
    }

    #[test]
    fn two_turbines_use_their_euclidean_distance() {
        let layout = [ProjectedPoint::new(0.0, 0.0), ProjectedPoint::new(30.0, 40.0)];
        let est = estimate(&layout).unwrap();
        assert!((est.total_length - 50.0).abs() < 1e-12);
        assert_eq!(est.substation, ProjectedPoint::new(15.0, 20.0));
    }

    #[test]
    fn mst_beats_the_naive_path_order() {
        // visiting in index order would zig-zag; the MST connects each
        // point to its nearest neighbour instead
        let layout = [
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(100.0, 0.0),
            ProjectedPoint::new(1.0, 1.0),
            ProjectedPoint::new(101.0, 1.0),
        ];
        let est = estimate(&layout).unwrap();
        let path_weight: f64 = layout
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum();
        assert!(est.total_length < path_weight);
    }

    #[test]
    fn collinear_points_sum_segment_lengths() {
        let layout = [
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(200.0, 0.0),
            ProjectedPoint::new(100.0, 0.0),
        ];
        let est = estimate(&layout).unwrap();
        assert!((est.total_length - 200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_layout_is_a_precondition_error() {
        assert!(estimate(&[]).is_err());
    }
}
