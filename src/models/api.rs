//! Wire types for the Tankerkoenig `list.php` endpoint.
//! Field names follow the JSON document, not Rust conventions.

use serde::{Deserialize, Serialize};

/// Top-level body of a `list.php` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub ok: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stations: Option<Vec<StationSnapshot>>,
}

/// One station as seen in a single response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
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
    pub price: Option<f64>,
    pub is_open: bool,
}

impl ListResponse {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_response_with_null_price() {
        let body = r#"{
            "ok": true,
            "license": "CC BY 4.0 -  https://creativecommons.tankerkoenig.de",
            "data": "MTS-K",
            "status": "ok",
            "stations": [
                {"id": "A1", "name": "Shell", "brand": "Shell", "street": "Main",
                 "houseNumber": "1", "postCode": 12345, "place": "Town",
                 "lat": 1.0, "lng": 2.0, "dist": 0.5, "price": 1.599, "isOpen": true},
                {"id": "B2", "name": "Aral", "brand": "ARAL", "street": "Side",
                 "houseNumber": "", "postCode": 12345, "place": "Town",
                 "lat": 1.1, "lng": 2.1, "dist": 0.9, "price": null, "isOpen": false}
            ]
        }"#;

        let resp = ListResponse::from_json(body).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.message, None);

        let stations = resp.stations.unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].house_number, "1");
        assert_eq!(stations[0].price, Some(1.599));
        assert_eq!(stations[1].price, None);
        assert!(!stations[1].is_open);
    }

    #[test]
    fn parses_error_response_without_stations() {
        let body = r#"{"ok": false, "status": "error", "message": "apikey nicht angegeben"}"#;
        let resp = ListResponse::from_json(body).unwrap();

        assert!(!resp.ok);
        assert_eq!(resp.message.as_deref(), Some("apikey nicht angegeben"));
        assert!(resp.stations.is_none());
    }

    #[test]
    fn rejects_station_without_id() {
        let body = r#"{"ok": true, "status": "ok", "stations": [{"name": "x"}]}"#;
        assert!(ListResponse::from_json(body).is_err());
    }
}
