//! Wire shapes for the backend endpoints the browser layers talk to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AquariumResult;

pub const FISHES_ME_PATH: &str = "/fishes/me";
pub const PIXELS_PATH: &str = "/pixels";
pub const PAINT_PATH: &str = "/pixels:paint";

pub fn fishes_page_url(endpoint: &str, page: u32) -> String {
    format!("{endpoint}?page={page}")
}

/// Fish record as stored server-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishRecord {
    pub seed: String,
    #[serde(default)]
    pub spawned_at: Option<String>,
}

/// `GET /fishes?page=N`. The server has shipped several shapes over time, all
/// accepted here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FishPage {
    Wrapped { seeds: Vec<String> },
    Seeds(Vec<String>),
    Records(Vec<FishRecord>),
}

impl FishPage {
    pub fn parse(body: &str) -> AquariumResult<Vec<String>> {
        let page: FishPage = serde_json::from_str(body)?;
        Ok(page.into_seeds())
    }

    pub fn into_seeds(self) -> Vec<String> {
        match self {
            FishPage::Wrapped { seeds } | FishPage::Seeds(seeds) => seeds,
            FishPage::Records(records) => records.into_iter().map(|r| r.seed).collect(),
        }
    }
}

/// `GET /fishes/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyFish {
    pub seed: String,
}

/// `GET /pixels`: parallel arrays plus the color id table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelState {
    #[serde(default)]
    pub allowed_colors: BTreeMap<String, u32>,
    #[serde(default)]
    pub colors: Vec<u32>,
    #[serde(default)]
    pub x: Vec<i64>,
    #[serde(default)]
    pub y: Vec<i64>,
}

impl PixelState {
    /// `(x, y, color name)` for every pixel whose id is in the table. Extra
    /// entries in longer arrays are ignored.
    pub fn painted(&self) -> impl Iterator<Item = (i64, i64, &str)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.colors)
            .filter_map(move |((x, y), id)| {
                self.allowed_colors
                    .iter()
                    .find(|(_, v)| *v == id)
                    .map(|(name, _)| (*x, *y, name.as_str()))
            })
    }
}

/// `POST /pixels:paint` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintRequest {
    pub x: u32,
    pub y: u32,
    pub color: String,
}
