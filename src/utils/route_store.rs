// Route persistence as an ordered JSON array of stops

use crate::error::Result;
use crate::models::Stop;
use std::fs;
use std::path::Path;

pub fn load_route<P: AsRef<Path>>(path: P) -> Result<Vec<Stop>> {
    let json_str = fs::read_to_string(path.as_ref())?;
    let stops: Vec<Stop> = serde_json::from_str(&json_str)?;
    log::info!("loaded {} stops from {}", stops.len(), path.as_ref().display());
    Ok(stops)
}

pub fn save_route<P: AsRef<Path>>(path: P, stops: &[Stop]) -> Result<()> {
    let json_str = serde_json::to_string_pretty(stops)?;
    fs::write(path.as_ref(), json_str)?;
    log::info!("saved {} stops to {}", stops.len(), path.as_ref().display());
    Ok(())
}
