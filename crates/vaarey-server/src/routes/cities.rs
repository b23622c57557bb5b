//! City catalog endpoint backing the dashboard's search menu.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use vaarey_weather::{cities, City};

#[derive(Debug, Deserialize)]
pub struct CitiesParams {
    /// Optional case-insensitive name prefix.
    pub q: Option<String>,
}

pub async fn list(Query(params): Query<CitiesParams>) -> Json<Vec<&'static City>> {
    let prefix = params.q.unwrap_or_default();
    Json(cities::search(&prefix))
}
