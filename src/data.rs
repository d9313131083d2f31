use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result};

use self::object::{MapObject, ObjectKind};
use self::road::{RoadRecord, RoadType, RoadView};

pub mod object;
pub mod road;

/// Objects are identified by their position in the map's object list.
pub type ObjectId = usize;

/// Roads and objects of a whole map, without any notion of where it is stored.
///
/// Serialized as the two-element list `[roads, objects]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapData {
    pub roads: BTreeMap<String, RoadRecord>,
    pub objects: Vec<MapObject>,
}

impl MapData {
    pub fn new() -> MapData {
        MapData::default()
    }

    /// Inserts a road, replacing any road of the same name.
    pub fn add_road(
        &mut self,
        name: &str,
        road_type: RoadType,
        connections: Vec<ObjectId>,
    ) -> Result<()> {
        if let Some(missing) = connections.iter().find(|&&id| id >= self.objects.len()) {
            return Err(Error::not_found(format!(
                "road {} connects to object {}, which does not exist",
                name, missing
            )));
        }
        self.roads.insert(name.to_string(), RoadRecord(connections, road_type));
        Ok(())
    }

    /// Appends an object and returns its id.
    pub fn add_object(&mut self, roads: Vec<String>, kind: ObjectKind) -> Result<ObjectId> {
        let object = MapObject::new(roads, kind)?;
        self.objects.push(object);
        Ok(self.objects.len() - 1)
    }

    pub fn road(&self, name: &str) -> Result<RoadView<'_>> {
        let (name, record) = self
            .roads
            .get_key_value(name)
            .ok_or_else(|| Error::not_found(format!("no road named {}", name)))?;
        let objects = record
            .connections()
            .iter()
            .map(|&id| self.object(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(RoadView {
            name: name.as_str(),
            road_type: record.road_type(),
            objects,
        })
    }

    pub fn object(&self, id: ObjectId) -> Result<&MapObject> {
        self.objects
            .get(id)
            .ok_or_else(|| Error::not_found(format!("no object with id {}", id)))
    }

    /// Checks that every road connection points at an object and every
    /// object has a road count that fits its kind.
    pub fn validate(&self) -> Result<()> {
        for (name, record) in &self.roads {
            for &id in record.connections() {
                if id >= self.objects.len() {
                    return Err(Error::parse(format!(
                        "road {} connects to object {}, but there are only {} objects",
                        name,
                        id,
                        self.objects.len()
                    )));
                }
            }
        }
        for (id, object) in self.objects.iter().enumerate() {
            object
                .check_arity()
                .map_err(|err| Error::parse(format!("object {}: {}", id, err.message)))?;
        }
        Ok(())
    }

    /// Road names used by objects that no road entry defines.
    pub fn dangling_road_names(&self) -> Vec<(ObjectId, &str)> {
        self.objects
            .iter()
            .enumerate()
            .flat_map(|(id, object)| object.roads.iter().map(move |road| (id, road.as_str())))
            .filter(|(_, road)| !self.roads.contains_key(*road))
            .collect()
    }
}

impl Serialize for MapData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.roads, &self.objects).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (roads, objects) =
            <(BTreeMap<String, RoadRecord>, Vec<MapObject>)>::deserialize(deserializer)?;
        Ok(MapData { roads, objects })
    }
}
