use serde::{Deserialize, Serialize};

use crate::error::{FarmError, FarmResult};
use crate::geometry::point::ProjectedPoint;

/// A simple closed polygon ring in projected coordinates.
///
/// Vertices are stored without the closing duplicate; edges wrap from
/// the last vertex back to the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    vertices: Vec<ProjectedPoint>,
}

impl Ring {
    /// Builds a ring from an ordered vertex list. A trailing vertex
    /// equal to the first (closed-ring input convention) is dropped.
    pub fn new(mut vertices: Vec<ProjectedPoint>) -> FarmResult<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(FarmError::Domain(format!(
                "polygon ring needs at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[ProjectedPoint] {
        &self.vertices
    }

    /// Even-odd (ray crossing) containment test. Points exactly on an
    /// edge may land on either side; the sampler never depends on
    /// boundary points.
    pub fn contains(&self, p: &ProjectedPoint) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vj.x + (p.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Unsigned area by the shoelace formula, in square units of the
    /// projected system.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut twice_area = 0.0;
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];
            twice_area += (vj.x + vi.x) * (vj.y - vi.y);
            j = i;
        }
        (twice_area / 2.0).abs()
    }

    pub fn bounds(&self) -> (ProjectedPoint, ProjectedPoint) {
        let mut min = ProjectedPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = ProjectedPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        (min, max)
    }
}
