//! Reading farm descriptions and solver configuration from disk

use std::path::Path;

use anyhow::{Context, Result};

use lemin_core::{parse_farm, Farm, SolverConfig};

/// Read and parse a farm file, returning the raw text alongside the farm
pub fn load_farm(path: &Path) -> Result<(String, Farm)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading file {}", path.display()))?;
    let farm = parse_farm(&text).context("invalid data format")?;

    tracing::debug!(
        rooms = farm.room_count(),
        tunnels = farm.tunnel_count(),
        ants = farm.ants(),
        "farm loaded"
    );
    Ok((text, farm))
}

/// Load a JSON solver configuration; missing fields take their defaults
pub fn load_config(path: &Path) -> Result<SolverConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid solver config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemin_core::RouteStrategy;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lemin-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_farm() {
        let path = temp_file("farm.txt", "1\n##start\ns 0 0\n##end\ne 1 1\ns-e\n");
        let (text, farm) = load_farm(&path).unwrap();
        assert!(text.starts_with("1\n"));
        assert_eq!(farm.ants(), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_farm_reports_parse_error() {
        let path = temp_file("bad.txt", "zero\n");
        let err = load_farm(&path).unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid data format"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_config() {
        let path = temp_file("config.json", r#"{"strategy": "dfs", "time_limit_ms": 500}"#);
        let config = load_config(&path).unwrap();
        assert_eq!(config.strategy, RouteStrategy::Dfs);
        assert_eq!(config.time_limit_ms, Some(500));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(load_farm(Path::new("/definitely/not/here.txt")).is_err());
    }
}
