//! Geographic reference data, read from the address provider and never stored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub population: i64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub area_code: Vec<i32>,
    #[serde(default)]
    pub is_metropolitan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub population: i64,
    #[serde(default)]
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub population: i64,
}
