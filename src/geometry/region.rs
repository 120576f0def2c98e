use crate::error::{FarmError, FarmResult};
use crate::geometry::point::{GeoPoint, ProjectedPoint};
use crate::geometry::polygon::Ring;
use crate::geometry::projection::UtmProjection;

/// The usable site: outer boundary rings minus exclusion rings, in the
/// session's projected coordinate system.
#[derive(Debug, Clone)]
pub struct Region {
    boundaries: Vec<Ring>,
    exclusions: Vec<Ring>,
    min: ProjectedPoint,
    max: ProjectedPoint,
    feasible_area: f64,
}

impl Region {
    /// Projects the geographic rings and assembles the region.
    ///
    /// Exclusion rings are expected to lie inside the outer boundary;
    /// an exclusion that pokes outside only removes the overlapping
    /// area it actually covers inside, which this estimate ignores.
    /// Fails with a Domain error when no feasible area remains, so the
    /// samplers never enter a loop that cannot terminate.
    pub fn from_geographic(
        projection: &UtmProjection,
        boundaries: &[Vec<GeoPoint>],
        exclusions: &[Vec<GeoPoint>],
    ) -> FarmResult<Self> {
        if boundaries.is_empty() {
            return Err(FarmError::Precondition(
                "no boundary polygon has been provided".to_string(),
            ));
        }
        let project_ring = |ring: &Vec<GeoPoint>| -> FarmResult<Ring> {
            Ring::new(ring.iter().map(|g| projection.project(g)).collect())
        };
        let boundaries: Vec<Ring> = boundaries.iter().map(project_ring).collect::<FarmResult<_>>()?;
        let exclusions: Vec<Ring> = exclusions.iter().map(project_ring).collect::<FarmResult<_>>()?;
        Self::new(boundaries, exclusions)
    }

    pub fn new(boundaries: Vec<Ring>, exclusions: Vec<Ring>) -> FarmResult<Self> {
        if boundaries.is_empty() {
            return Err(FarmError::Precondition(
                "no boundary polygon has been provided".to_string(),
            ));
        }

        let mut min = ProjectedPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = ProjectedPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for ring in &boundaries {
            let (rmin, rmax) = ring.bounds();
            min.x = min.x.min(rmin.x);
            min.y = min.y.min(rmin.y);
            max.x = max.x.max(rmax.x);
            max.y = max.y.max(rmax.y);
        }

        let outer_area: f64 = boundaries.iter().map(Ring::area).sum();
        let excluded_area: f64 = exclusions.iter().map(Ring::area).sum();
        let feasible_area = outer_area - excluded_area;
        if feasible_area <= 0.0 {
            return Err(FarmError::Domain(format!(
                "region has no feasible area ({:.1} m2 outer, {:.1} m2 excluded)",
                outer_area, excluded_area
            )));
        }

        Ok(Self {
            boundaries,
            exclusions,
            min,
            max,
            feasible_area,
        })
    }

    /// True iff the point lies inside some boundary ring and outside
    /// every exclusion ring.
    pub fn is_feasible(&self, p: &ProjectedPoint) -> bool {
        self.boundaries.iter().any(|r| r.contains(p))
            && !self.exclusions.iter().any(|r| r.contains(p))
    }

    /// Bounding box of the outer boundary, (min, max) corners.
    pub fn bounds(&self) -> (ProjectedPoint, ProjectedPoint) {
        (self.min, self.max)
    }

    /// Total usable area in m2 (outer minus exclusions).
    pub fn feasible_area(&self) -> f64 {
        self.feasible_area
    }
}

/// Vertex centroid of the geographic boundary rings, used to pick the
/// projection zone before any projected geometry exists.
pub fn geographic_centroid(boundaries: &[Vec<GeoPoint>]) -> FarmResult<GeoPoint> {
    let mut count = 0usize;
    let (mut lon, mut lat) = (0.0, 0.0);
    for ring in boundaries {
        // closed rings repeat the first vertex; counting it twice
        // would bias the mean
        let distinct = if ring.len() > 1 && ring.first() == ring.last() {
            &ring[..ring.len() - 1]
        } else {
            &ring[..]
        };
        for p in distinct {
            lon += p.lon;
            lat += p.lat;
            count += 1;
        }
    }
    if count == 0 {
        return Err(FarmError::Precondition(
            "cannot compute a centroid of an empty boundary".to_string(),
        ));
    }
    Ok(GeoPoint::new(lon / count as f64, lat / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Ring {
        Ring::new(vec![
            ProjectedPoint::new(x0, y0),
            ProjectedPoint::new(x0 + side, y0),
            ProjectedPoint::new(x0 + side, y0 + side),
            ProjectedPoint::new(x0, y0 + side),
        ])
        .unwrap()
    }

    #[test]
    fn feasibility_honours_boundary_and_exclusions() {
        let region = Region::new(vec![square(0.0, 0.0, 100.0)], vec![square(40.0, 40.0, 20.0)])
            .unwrap();
        assert!(region.is_feasible(&ProjectedPoint::new(10.0, 10.0)));
        // inside the exclusion hole
        assert!(!region.is_feasible(&ProjectedPoint::new(50.0, 50.0)));
        // outside the boundary
        assert!(!region.is_feasible(&ProjectedPoint::new(150.0, 50.0)));
    }

    #[test]
    fn feasible_area_subtracts_exclusions() {
        let region = Region::new(vec![square(0.0, 0.0, 100.0)], vec![square(40.0, 40.0, 20.0)])
            .unwrap();
        assert!((region.feasible_area() - (10_000.0 - 400.0)).abs() < 1e-9);
    }

    #[test]
    fn fully_excluded_region_is_a_domain_error() {
        let res = Region::new(vec![square(0.0, 0.0, 10.0)], vec![square(0.0, 0.0, 10.0)]);
        assert!(matches!(res, Err(FarmError::Domain(_))));
    }

    #[test]
    fn missing_boundary_is_a_precondition_error() {
        let res = Region::new(vec![], vec![]);
        assert!(matches!(res, Err(FarmError::Precondition(_))));
    }

    #[test]
    fn centroid_ignores_the_closing_vertex() {
        let closed = vec![vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(0.0, 0.0),
        ]];
        let c = geographic_centroid(&closed).unwrap();
        assert!((c.lon - 1.0).abs() < 1e-12);
        assert!((c.lat - 1.0).abs() < 1e-12);

        // open input gives the same answer
        let open = vec![closed[0][..4].to_vec()];
        let c2 = geographic_centroid(&open).unwrap();
        assert_eq!(c, c2);
    }
}
