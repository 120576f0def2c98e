//! UTM projection for a session's site.
//!
//! The zone is derived once from the site centroid; every layout
//! computation then runs in that zone's metric plane. The inverse
//! transform exists solely so results can be handed back in lon/lat
//! for display and export.

use crate::config::constants::{
    UTM_FALSE_EASTING, UTM_FALSE_NORTHING_SOUTH, UTM_SCALE_FACTOR, WGS84_FLATTENING,
    WGS84_SEMI_MAJOR_AXIS,
};
use crate::error::{FarmError, FarmResult};
use crate::geometry::point::{GeoPoint, ProjectedPoint};

#[derive(Debug, Clone, Copy)]
pub struct UtmProjection {
    zone: u8,
    northern: bool,
    central_meridian_rad: f64,
}

impl UtmProjection {
    /// Picks the UTM zone covering `centroid` (zone number from
    /// longitude, hemisphere from latitude).
    pub fn for_centroid(centroid: &GeoPoint) -> FarmResult<Self> {
        if !(-180.0..=180.0).contains(&centroid.lon) || !(-90.0..=90.0).contains(&centroid.lat) {
            return Err(FarmError::Domain(format!(
                "site centroid ({}, {}) is not a valid lon/lat pair",
                centroid.lon, centroid.lat
            )));
        }
        let zone = (((centroid.lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;
        let central_meridian = f64::from(zone as i32 - 1) * 6.0 - 180.0 + 3.0;
        Ok(Self {
            zone,
            northern: centroid.lat >= 0.0,
            central_meridian_rad: central_meridian.to_radians(),
        })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// EPSG code of the projected system (326xx north, 327xx south).
    pub fn epsg(&self) -> u32 {
        if self.northern {
            32600 + u32::from(self.zone)
        } else {
            32700 + u32::from(self.zone)
        }
    }

    /// Geographic to projected (Snyder transverse-Mercator series).
    pub fn project(&self, p: &GeoPoint) -> ProjectedPoint {
        let a = WGS84_SEMI_MAJOR_AXIS;
        let f = WGS84_FLATTENING;
        let k0 = UTM_SCALE_FACTOR;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);

        let lat = p.lat.to_radians();
        let lon = p.lon.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();

        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let t = (lat.tan()).powi(2);
        let c = ep2 * cos_lat * cos_lat;
        let aa = (lon - self.central_meridian_rad) * cos_lat;

        let m = a
            * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0) * lat
                - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2 * e2 * e2 / 1024.0)
                    * (2.0 * lat).sin()
                + (15.0 * e2 * e2 / 256.0 + 45.0 * e2 * e2 * e2 / 1024.0) * (4.0 * lat).sin()
                - (35.0 * e2 * e2 * e2 / 3072.0) * (6.0 * lat).sin());

        let x = k0
            * n
            * (aa
                + (1.0 - t + c) * aa.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * aa.powi(5) / 120.0)
            + UTM_FALSE_EASTING;
        let mut y = k0
            * (m + n
                * lat.tan()
                * (aa * aa / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * aa.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * aa.powi(6) / 720.0));
        if !self.northern {
            y += UTM_FALSE_NORTHING_SOUTH;
        }
        ProjectedPoint::new(x, y)
    }

    /// Projected back to geographic, for display only.
    pub fn unproject(&self, p: &ProjectedPoint) -> GeoPoint {
        let a = WGS84_SEMI_MAJOR_AXIS;
        let f = WGS84_FLATTENING;
        let k0 = UTM_SCALE_FACTOR;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let x = p.x - UTM_FALSE_EASTING;
        let y = if self.northern {
            p.y
        } else {
            p.y - UTM_FALSE_NORTHING_SOUTH
        };

        let m = y / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let t1 = phi1.tan().powi(2);
        let n1 = a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = x / (n1 * k0);

        let lat = phi1
            - (n1 * phi1.tan() / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);
        let lon = self.central_meridian_rad
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        GeoPoint::new(lon.to_degrees(), lat.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_selection_follows_longitude_and_hemisphere() {
        let berlin = UtmProjection::for_centroid(&GeoPoint::new(13.4, 52.5)).unwrap();
        assert_eq!(berlin.zone(), 33);
        assert_eq!(berlin.epsg(), 32633);

        let sydney = UtmProjection::for_centroid(&GeoPoint::new(151.2, -33.9)).unwrap();
        assert_eq!(sydney.zone(), 56);
        assert_eq!(sydney.epsg(), 32756);
    }

    #[test]
    fn invalid_centroid_is_rejected() {
        assert!(UtmProjection::for_centroid(&GeoPoint::new(200.0, 0.0)).is_err());
        assert!(UtmProjection::for_centroid(&GeoPoint::new(0.0, 95.0)).is_err());
    }

    #[test]
    fn round_trip_stays_within_centimetres() {
        let proj = UtmProjection::for_centroid(&GeoPoint::new(15.1, 52.24)).unwrap();
        let original = GeoPoint::new(15.07925, 52.222121);
        let projected = proj.project(&original);
        let back = proj.unproject(&projected);
        assert!((back.lon - original.lon).abs() < 1e-7);
        assert!((back.lat - original.lat).abs() < 1e-7);
    }

    #[test]
    fn known_reference_point() {
        // Tower of Pisa, zone 32N: expected UTM ~ (606420 E, 4843076 N)
        let proj = UtmProjection::for_centroid(&GeoPoint::new(10.4, 43.7)).unwrap();
        let p = proj.project(&GeoPoint::new(10.396597, 43.722952));
        assert!((p.x - 612_862.0).abs() < 2000.0);
        assert!((p.y - 4_841_958.0).abs() < 2000.0);
    }

    #[test]
    fn metric_distances_near_site_scale() {
        // One degree of longitude at 52N is roughly 68 km
        let proj = UtmProjection::for_centroid(&GeoPoint::new(15.0, 52.0)).unwrap();
        let a = proj.project(&GeoPoint::new(15.0, 52.0));
        let b = proj.project(&GeoPoint::new(16.0, 52.0));
        let d = a.distance_to(&b);
        assert!((d - 68_400.0).abs() < 1000.0, "unexpected distance {d}");
    }
}
