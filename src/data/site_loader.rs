use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FarmError, FarmResult};
use crate::geometry::point::GeoPoint;

/// Site geometry as drawn by the user: outer boundary rings and
/// exclusion rings, geographic lon/lat, closed.
#[derive(Debug, Clone)]
pub struct Site {
    pub boundaries: Vec<Vec<GeoPoint>>,
    pub exclusions: Vec<Vec<GeoPoint>>,
}

#[derive(Debug, Deserialize)]
struct SiteFile {
    boundaries: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    exclusions: Vec<Vec<[f64; 2]>>,
}

fn to_rings(rings: Vec<Vec<[f64; 2]>>) -> Vec<Vec<GeoPoint>> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|[lon, lat]| GeoPoint::new(lon, lat)).collect())
        .collect()
}

/// Loads a site from a JSON file of `[lon, lat]` vertex lists.
pub fn load_site(path: &Path) -> FarmResult<Site> {
    let reader = BufReader::new(File::open(path)?);
    let file: SiteFile = serde_json::from_reader(reader)?;
    if file.boundaries.is_empty() {
        return Err(FarmError::Precondition(format!(
            "site file {} contains no boundary polygon",
            path.display()
        )));
    }
    Ok(Site {
        boundaries: to_rings(file.boundaries),
        exclusions: to_rings(file.exclusions),
    })
}

/// Demo site near Międzyrzecz, Poland: one main boundary with two
/// smaller annexes and four exclusion zones.
pub fn default_site() -> Site {
    let boundaries = vec![
        vec![
            [15.07925, 52.222121],
            [15.054703, 52.232531],
            [15.068092, 52.238523],
            [15.059166, 52.251977],
            [15.095215, 52.25597],
            [15.130234, 52.251556],
            [15.133324, 52.244515],
            [15.124397, 52.225486],
            [15.092468, 52.21823],
            [15.07925, 52.222121],
        ],
        vec![
            [15.070152, 52.216652],
            [15.057449, 52.223383],
            [15.067062, 52.223383],
            [15.074272, 52.218335],
            [15.070152, 52.216652],
        ],
        vec![
            [15.066719, 52.257231],
            [15.090408, 52.263115],
            [15.128174, 52.262064],
            [15.136757, 52.259542],
            [15.135384, 52.257021],
            [15.122337, 52.254288],
            [15.066719, 52.257231],
        ],
    ];
    let exclusions = vec![
        vec![
            [15.101051, 52.245881],
            [15.094185, 52.237892],
            [15.103798, 52.233267],
            [15.114441, 52.235159],
            [15.120964, 52.23621],
            [15.121994, 52.243358],
            [15.101051, 52.245881],
        ],
        vec![
            [15.091782, 52.253238],
            [15.103798, 52.258912],
            [15.102081, 52.251346],
            [15.097618, 52.248193],
            [15.091782, 52.253238],
        ],
        vec![
            [15.087662, 52.223173],
            [15.057793, 52.230113],
            [15.058479, 52.233898],
            [15.075302, 52.236421],
            [15.096245, 52.238103],
            [15.098991, 52.226538],
            [15.087662, 52.223173],
        ],
        vec![
            [15.052643, 52.243358],
            [15.095901, 52.268367],
            [15.067062, 52.245461],
            [15.052643, 52.243358],
        ],
    ];
    Site {
        boundaries: to_rings(boundaries),
        exclusions: to_rings(exclusions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_site_has_expected_shape() {
        let site = default_site();
        assert_eq!(site.boundaries.len(), 3);
        assert_eq!(site.exclusions.len(), 4);
        // rings arrive closed
        assert_eq!(
            site.boundaries[0].first().unwrap(),
            site.boundaries[0].last().unwrap()
        );
    }

    #[test]
    fn site_file_round_trip() {
        let path = std::env::temp_dir().join("windfarm_test_site.json");
        let mut f = File::create(&path).unwrap();
        write!(
            f,
            r#"{{"boundaries": [[[15.0, 52.0], [15.1, 52.0], [15.1, 52.1], [15.0, 52.0]]]}}"#
        )
        .unwrap();
        let site = load_site(&path).unwrap();
        assert_eq!(site.boundaries.len(), 1);
        assert!(site.exclusions.is_empty());
        assert_eq!(site.boundaries[0][1], GeoPoint::new(15.1, 52.0));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_boundary_list_is_a_precondition_error() {
        let path = std::env::temp_dir().join("windfarm_test_empty_site.json");
        let mut f = File::create(&path).unwrap();
        write!(f, r#"{{"boundaries": []}}"#).unwrap();
        assert!(matches!(
            load_site(&path),
            Err(FarmError::Precondition(_))
        ));
        std::fs::remove_file(path).ok();
    }
}
