//! Row models for the three data tables.
//! These are thin wrappers around SQLite rows, built from API snapshots.

use super::api::StationSnapshot;

/// Reference data for a station (`stations` table).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub street: String,
    pub house_number: String,
    pub post_code: i64,
    pub place: String,
    pub lat: f64,
    pub lng: f64,
    pub dist: f64,
}

/// Open / closed flag of a station (`status` table).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub station_id: String,
    pub is_open: bool,
}

/// A price sample (`prices` table), keyed by station and epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub station_id: String,
    pub timestamp: i64,
    pub price: f64,
}

/// Everything one snapshot contributes to a fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub station: Station,
    pub status: StatusRecord,
    pub price: PriceObservation,
}

impl From<&StationSnapshot> for Station {
    fn from(s: &StationSnapshot) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            brand: s.brand.clone(),
            street: s.street.clone(),
            house_number: s.house_number.clone(),
            post_code: s.post_code,
            place: s.place.clone(),
            lat: s.lat,
            lng: s.lng,
            dist: s.dist,
        }
    }
}

impl CycleRecord {
    /// Derive the rows of one snapshot.
    /// Returns `None` when the station reported no price: such stations are
    /// skipped entirely, including their reference row.
    pub fn from_snapshot(snapshot: &StationSnapshot, timestamp: i64) -> Option<Self> {
        let price = snapshot.price?;

        Some(Self {
            station: Station::from(snapshot),
            status: StatusRecord {
                station_id: snapshot.id.clone(),
                is_open: snapshot.is_open,
            },
            price: PriceObservation {
                station_id: snapshot.id.clone(),
                timestamp,
                price,
            },
        })
    }
}

/// Normalize a whole batch with one shared timestamp.
pub fn normalize(snapshots: &[StationSnapshot], timestamp: i64) -> Vec<CycleRecord> {
    snapshots
        .iter()
        .filter_map(|s| CycleRecord::from_snapshot(s, timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, price: Option<f64>) -> StationSnapshot {
        StationSnapshot {
            id: id.to_string(),
            name: "Shell".into(),
            brand: "Shell".into(),
            street: "Main".into(),
            house_number: "1".into(),
            post_code: 12345,
            place: "Town".into(),
            lat: 1.0,
            lng: 2.0,
            dist: 0.5,
            price,
            is_open: true,
        }
    }

    #[test]
    fn null_price_snapshot_yields_nothing() {
        assert!(CycleRecord::from_snapshot(&snapshot("A1", None), 1000).is_none());
    }

    #[test]
    fn batch_shares_one_timestamp() {
        let batch = vec![
            snapshot("A1", Some(1.599)),
            snapshot("B2", None),
            snapshot("C3", Some(1.729)),
        ];

        let records = normalize(&batch, 1000);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.price.timestamp == 1000));
        assert_eq!(records[0].station.id, "A1");
        assert_eq!(records[1].status.station_id, "C3");
    }
}
