use serde::{Deserialize, Serialize};

use super::object::MapObject;
use super::ObjectId;

/// Classification of a road, serialized with the short tags used in map files.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadType {
    /// Small tracks.
    #[serde(rename = "track")]
    Track,
    /// Only wide enough for one vehicle.
    #[serde(rename = "lane")]
    Lane,
    /// Single-vehicle lane with passing places.
    #[serde(rename = "passlane")]
    PassLane,
    #[serde(rename = "culdesac")]
    CulDeSac,
    /// Joins onto itself, usually with one or two ways in.
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "road")]
    Road,
    /// B roads, such as B1.
    #[serde(rename = "b")]
    B,
    /// A roads, such as A1.
    #[serde(rename = "a")]
    A,
    /// A roads with motorway restrictions, such as A1 (M).
    #[serde(rename = "am")]
    AM,
    /// Motorways, such as M1.
    #[serde(rename = "motor")]
    Motorway,
}

impl RoadType {
    pub fn tag(&self) -> &'static str {
        match self {
            RoadType::Track => "track",
            RoadType::Lane => "lane",
            RoadType::PassLane => "passlane",
            RoadType::CulDeSac => "culdesac",
            RoadType::Circle => "circle",
            RoadType::Road => "road",
            RoadType::B => "b",
            RoadType::A => "a",
            RoadType::AM => "am",
            RoadType::Motorway => "motor",
        }
    }
}

/// A road as stored in the map: `[connections, type]`.
///
/// Connections are object ids in the order they appear along the road,
/// starting from either end.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord(pub Vec<ObjectId>, pub RoadType);

impl RoadRecord {
    pub fn connections(&self) -> &[ObjectId] {
        &self.0
    }

    pub fn road_type(&self) -> RoadType {
        self.1
    }
}

/// A road with its connections resolved into the objects they point at.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadView<'a> {
    pub name: &'a str,
    pub road_type: RoadType,
    pub objects: Vec<&'a MapObject>,
}
