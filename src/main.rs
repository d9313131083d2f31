use log::{error, info};

use navamap::config::load_config;
use navamap::errors::Result;
use navamap::logging::setup_logging;
use navamap::NavMap;

const CONFIG_PATH: &str = "config/navamap.json";

fn run() -> Result<()> {
    let config = load_config(CONFIG_PATH)?;
    setup_logging(&config.log_level);

    let map = NavMap::from_config(&config)?;
    let path = map.path().display().to_string();
    info!(
        path = path.as_str(), roads = map.data().roads.len(), objects = map.data().objects.len();
        "Map ready"
    );
    Ok(())
}

fn main() -> Result<()> {
    if let Err(err) = run() {
        setup_logging("info");
        error!(err = err.message.as_str(); "Could not open map");
        return Err(err);
    }
    Ok(())
}
