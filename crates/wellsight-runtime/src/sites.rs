//! Candidate drilling sites and great-circle distances.

use crate::geolocation::GeoFix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    #[default]
    PotentialSite,
}

/// A marked location on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub description: String,
    pub kind: SiteKind,
}

/// A site paired with its distance from a reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDistance {
    pub site: Site,
    /// Rounded to two decimals.
    pub distance_km: f64,
}

/// Great-circle distance between two coordinates, in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sites marked during a session, in insertion order.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    next_id: u64,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a potential drilling site. Titles are "Site N" by position.
    pub fn mark(&mut self, latitude: f64, longitude: f64) -> &Site {
        self.next_id += 1;
        let site = Site {
            id: self.next_id,
            latitude,
            longitude,
            title: format!("Site {}", self.sites.len() + 1),
            description: "Potential drilling location".to_string(),
            kind: SiteKind::PotentialSite,
        };
        debug!(id = site.id, latitude, longitude, "site marked");
        self.sites.push(site);
        &self.sites[self.sites.len() - 1]
    }

    pub fn remove(&mut self, id: u64) -> Option<Site> {
        let index = self.sites.iter().position(|s| s.id == id)?;
        Some(self.sites.remove(index))
    }

    pub fn get(&self, id: u64) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn distances_from(&self, fix: &GeoFix) -> Vec<SiteDistance> {
        self.sites
            .iter()
            .map(|site| SiteDistance {
                site: site.clone(),
                distance_km: round_2dp(haversine_km(
                    (fix.latitude, fix.longitude),
                    (site.latitude, site.longitude),
                )),
            })
            .collect()
    }
}
