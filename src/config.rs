use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;
use crate::store::SavePolicy;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapConfig {
    pub map_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub save_policy: SavePolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: impl AsRef<Path>) -> Result<MapConfig> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn only_map_path_is_required() {
        let config: MapConfig = serde_json::from_str(r#"{"map_path": "town.json"}"#).unwrap();
        assert_eq!(config.map_path, "town.json");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.save_policy, SavePolicy::OnChange);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("navamap.json");
        fs::write(
            &path,
            r#"{"map_path": "town.json", "log_level": "debug", "save_policy": "manual"}"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.save_policy, SavePolicy::Manual);
    }

    #[test]
    fn missing_or_bad_config_is_reported() {
        let dir = tempdir().unwrap();
        assert_eq!(load_config(dir.path().join("absent.json")).unwrap_err().kind, ErrorKind::Io);

        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"save_policy": "sometimes"}"#).unwrap();
        assert_eq!(load_config(&path).unwrap_err().kind, ErrorKind::Parse);
    }
}
