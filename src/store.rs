use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::MapConfig;
use crate::data::object::{MapObject, ObjectKind};
use crate::data::road::{RoadType, RoadView};
use crate::data::{MapData, ObjectId};
use crate::errors::{Error, Result};
use crate::instruction::Instruction;
use crate::legacy;

pub const FORMAT_VERSION: u32 = 1;

/// When a `NavMap` writes itself back to its file.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SavePolicy {
    /// After every successful mutation.
    #[default]
    OnChange,
    /// Only when `NavMap::save` is called.
    Manual,
}

#[derive(Serialize)]
struct VersionedMapRef<'a> {
    version: u32,
    map: &'a MapData,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

#[derive(Deserialize)]
struct VersionedMap {
    map: MapData,
}

/// Renders the map as the text stored on disk.
pub fn to_literal(data: &MapData) -> Result<String> {
    Ok(serde_json::to_string(&VersionedMapRef {
        version: FORMAT_VERSION,
        map: data,
    })?)
}

/// Parses and validates the text stored on disk.
///
/// `{"version": .., "map": ..}` is the current format. A bare
/// `[roads, objects]` list predates the version envelope and may use the
/// Python literal syntax of the first version of the tool.
pub fn from_literal(text: &str) -> Result<MapData> {
    let data = match text.trim_start().chars().next() {
        Some('{') => {
            let header: VersionHeader = serde_json::from_str(text)?;
            if header.version != FORMAT_VERSION {
                return Err(Error::parse(format!(
                    "unsupported map format version {}",
                    header.version
                )));
            }
            serde_json::from_str::<VersionedMap>(text)?.map
        }
        Some('[') => serde_json::from_str(&legacy::python_literal_to_json(text)?)?,
        _ => return Err(Error::parse("map literal must be a {...} envelope or a [...] list")),
    };
    data.validate()?;
    Ok(data)
}

pub fn load(path: &Path) -> Result<MapData> {
    let text = fs::read_to_string(path)?;
    let data = from_literal(&text)?;
    for (id, road) in data.dangling_road_names() {
        warn!(object = id, road = road; "Object refers to a road the map does not define");
    }
    Ok(data)
}

pub fn save(path: &Path, data: &MapData) -> Result<()> {
    let literal = to_literal(data)?;
    replace_file(path, |output_file| output_file.write_all(literal.as_bytes()))
}

/// Writes a sibling temporary file and renames it over `path`. If `write`
/// fails the file at `path` is untouched.
fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// A map bound to the file it is loaded from and saved to.
#[derive(Debug)]
pub struct NavMap {
    path: PathBuf,
    data: MapData,
    policy: SavePolicy,
}

impl NavMap {
    /// Opens the map at `path`, saving after every change. A missing file
    /// gives an empty map; the file is created on the first save.
    pub fn open(path: impl AsRef<Path>) -> Result<NavMap> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.display().to_string();
        let data = if path.try_exists()? {
            load(&path)?
        } else {
            info!(path = path_str.as_str(); "No map file yet, starting empty");
            MapData::new()
        };
        info!(
            path = path_str.as_str(), roads = data.roads.len(), objects = data.objects.len();
            "Opened map"
        );
        Ok(NavMap {
            path,
            data,
            policy: SavePolicy::OnChange,
        })
    }

    pub fn from_config(config: &MapConfig) -> Result<NavMap> {
        let mut map = NavMap::open(&config.map_path)?;
        map.set_policy(config.save_policy);
        Ok(map)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &MapData {
        &self.data
    }

    pub fn set_policy(&mut self, policy: SavePolicy) {
        self.policy = policy;
    }

    pub fn add_road(
        &mut self,
        name: &str,
        road_type: RoadType,
        connections: Vec<ObjectId>,
    ) -> Result<()> {
        let previous = self.data.roads.get(name).cloned();
        self.data.add_road(name, road_type, connections)?;
        if let Err(err) = self.changed() {
            match previous {
                Some(record) => self.data.roads.insert(name.to_string(), record),
                None => self.data.roads.remove(name),
            };
            return Err(err);
        }
        debug!(road = name, road_type = road_type.tag(); "Added road");
        Ok(())
    }

    pub fn add_object(&mut self, roads: Vec<String>, kind: ObjectKind) -> Result<ObjectId> {
        let tag = kind.tag().to_string();
        let id = self.data.add_object(roads, kind)?;
        if let Err(err) = self.changed() {
            self.data.objects.pop();
            return Err(err);
        }
        debug!(object = id, object_type = tag.as_str(); "Added object");
        Ok(id)
    }

    pub fn road(&self, name: &str) -> Result<RoadView<'_>> {
        self.data.road(name)
    }

    pub fn object(&self, id: ObjectId) -> Result<&MapObject> {
        self.data.object(id)
    }

    pub fn instruction(&self, id: ObjectId, in_road: &str, out_road: &str) -> Result<Instruction> {
        self.object(id)?.instruction(in_road, out_road)
    }

    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.data)?;
        let path_str = self.path.display().to_string();
        info!(path = path_str.as_str(); "Saved map");
        Ok(())
    }

    fn changed(&self) -> Result<()> {
        match self.policy {
            SavePolicy::OnChange => self.save(),
            SavePolicy::Manual => Ok(()),
        }
    }
}
