use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::station::{CycleRecord, PriceObservation, Station, StatusRecord};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Rows actually written by one fetch cycle. Conflicting rows are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub stations: usize,
    pub statuses: usize,
    pub prices: usize,
}

/// Insert a station unless one with the same id exists. Returns true if written.
pub fn insert_station_if_absent(conn: &Connection, st: &Station) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO stations
            (id, name, brand, street, place, lat, lng, dist, houseNumber, postCode)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;

    let n = stmt.execute(params![
        st.id,
        st.name,
        st.brand,
        st.street,
        st.place,
        st.lat,
        st.lng,
        st.dist,
        st.house_number,
        st.post_code,
    ])?;
    Ok(n == 1)
}

/// Insert the open flag of a station unless it is already recorded.
pub fn insert_status_if_absent(conn: &Connection, status: &StatusRecord) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("INSERT OR IGNORE INTO status (stationId, isOpen) VALUES (?1, ?2)")?;

    let n = stmt.execute(params![status.station_id, status.is_open])?;
    Ok(n == 1)
}

/// Insert a price sample unless (station, timestamp) is already present.
pub fn insert_price_if_absent(conn: &Connection, price: &PriceObservation) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO prices (stationId, timestamp, price) VALUES (?1, ?2, ?3)",
    )?;

    let n = stmt.execute(params![price.station_id, price.timestamp, price.price])?;
    Ok(n == 1)
}

/// Persist one fetch cycle atomically.
/// The transaction is committed only after every record went through; on any
/// error it is dropped, which rolls the whole cycle back.
pub fn persist_cycle(pool: &mut DbPool, records: &[CycleRecord]) -> AppResult<CycleSummary> {
    let tx = pool.transaction()?;
    let mut summary = CycleSummary::default();

    for rec in records {
        // Station first: status and price reference it.
        if insert_station_if_absent(&tx, &rec.station)? {
            summary.stations += 1;
        }
        if insert_status_if_absent(&tx, &rec.status)? {
            summary.statuses += 1;
        }
        if insert_price_if_absent(&tx, &rec.price)? {
            summary.prices += 1;
        }
    }

    tx.commit()?;
    Ok(summary)
}

fn map_station(row: &Row) -> Result<Station> {
    Ok(Station {
        id: row.get("id")?,
        name: row.get("name")?,
        brand: row.get("brand")?,
        street: row.get("street")?,
        house_number: row.get("houseNumber")?,
        post_code: row.get("postCode")?,
        place: row.get("place")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        dist: row.get("dist")?,
    })
}

pub fn load_station(conn: &Connection, id: &str) -> AppResult<Option<Station>> {
    let station = conn
        .query_row("SELECT * FROM stations WHERE id = ?1", [id], map_station)
        .optional()?;
    Ok(station)
}

pub fn load_status(conn: &Connection, station_id: &str) -> AppResult<Option<StatusRecord>> {
    let status = conn
        .query_row(
            "SELECT stationId, isOpen FROM status WHERE stationId = ?1",
            [station_id],
            |row| {
                Ok(StatusRecord {
                    station_id: row.get(0)?,
                    is_open: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(status)
}

pub fn load_prices(conn: &Connection, station_id: &str) -> AppResult<Vec<PriceObservation>> {
    let mut stmt = conn.prepare(
        "SELECT stationId, timestamp, price FROM prices
         WHERE stationId = ?1
         ORDER BY timestamp ASC",
    )?;

    let rows = stmt.query_map([station_id], |row| {
        Ok(PriceObservation {
            station_id: row.get(0)?,
            timestamp: row.get(1)?,
            price: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Row counts of the three data tables, in (stations, status, prices) order.
pub fn count_rows(conn: &Connection) -> AppResult<(i64, i64, i64)> {
    let count = |table: &str| -> Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
    };

    Ok((count("stations")?, count("status")?, count("prices")?))
}

/// First and last price timestamp, if any price was stored.
pub fn price_time_range(conn: &Connection) -> AppResult<Option<(i64, i64)>> {
    let range: (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM prices",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(match range {
        (Some(first), Some(last)) => Some((first, last)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        ensure_schema(&pool.conn).unwrap();
        pool
    }

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: id.into(),
            name: name.into(),
            brand: "Shell".into(),
            street: "Main".into(),
            house_number: "1".into(),
            post_code: 12345,
            place: "Town".into(),
            lat: 1.0,
            lng: 2.0,
            dist: 0.5,
        }
    }

    #[test]
    fn station_insert_is_first_write_wins() {
        let pool = pool();

        assert!(insert_station_if_absent(&pool.conn, &station("A1", "Shell")).unwrap());
        assert!(!insert_station_if_absent(&pool.conn, &station("A1", "Renamed")).unwrap());

        let (stations, _, _) = count_rows(&pool.conn).unwrap();
        assert_eq!(stations, 1);
        assert_eq!(load_station(&pool.conn, "A1").unwrap().unwrap().name, "Shell");
    }

    #[test]
    fn status_is_never_refreshed() {
        let pool = pool();
        insert_station_if_absent(&pool.conn, &station("A1", "Shell")).unwrap();

        let open = StatusRecord {
            station_id: "A1".into(),
            is_open: true,
        };
        let closed = StatusRecord {
            is_open: false,
            ..open.clone()
        };

        assert!(insert_status_if_absent(&pool.conn, &open).unwrap());
        assert!(!insert_status_if_absent(&pool.conn, &closed).unwrap());
        assert_eq!(load_status(&pool.conn, "A1").unwrap(), Some(open));
    }

    #[test]
    fn duplicate_price_is_a_no_op() {
        let pool = pool();
        insert_station_if_absent(&pool.conn, &station("A1", "Shell")).unwrap();

        let p = PriceObservation {
            station_id: "A1".into(),
            timestamp: 1000,
            price: 1.599,
        };
        assert!(insert_price_if_absent(&pool.conn, &p).unwrap());
        let later = PriceObservation {
            price: 1.7,
            ..p.clone()
        };
        assert!(!insert_price_if_absent(&pool.conn, &later).unwrap());

        assert_eq!(load_prices(&pool.conn, "A1").unwrap(), vec![p]);
    }

    #[test]
    fn price_for_unknown_station_violates_foreign_key() {
        let pool = pool();
        let p = PriceObservation {
            station_id: "nope".into(),
            timestamp: 1000,
            price: 1.0,
        };
        assert!(insert_price_if_absent(&pool.conn, &p).is_err());
    }

    #[test]
    fn empty_database_has_no_time_range() {
        let pool = pool();
        assert_eq!(price_time_range(&pool.conn).unwrap(), None);
    }
}
