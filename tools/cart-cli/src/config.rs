//! CLI configuration files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cart_store::config::CartConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Load config from a file. `.json` files are parsed as JSON, anything else as TOML.
pub fn load(path: &Path) -> Result<CartConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Find the nearest config file from `start` upwards.
pub fn find(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    let defaults = CartConfig::default();
    format!(
        r#"# Storefront cart configuration

[storage]
key = "{key}"
dir = "{dir}"

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
connect_timeout_ms = {connect_timeout_ms}

[stock]
# "reserve" holds cart units against the remote stock,
# "check" only compares the cart amount against it.
mode = "{mode}"
"#,
        key = defaults.storage.key,
        dir = defaults.storage.dir.display(),
        base_url = defaults.api.base_url,
        timeout_ms = defaults.api.timeout_ms,
        connect_timeout_ms = defaults.api.connect_timeout_ms,
        mode = defaults.stock.mode.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_store::config::StockMode;

    #[test]
    fn test_default_config_parses_back() {
        let config: CartConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("cart.json");
        std::fs::write(&json, r#"{"stock": {"mode": "check"}}"#).unwrap();
        assert_eq!(load(&json).unwrap().stock.mode, StockMode::Check);

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "[api]\nbase_url = \"http://api:3333\"\n").unwrap();
        let config = load(&toml_path).unwrap();
        assert_eq!(config.api.base_url, "http://api:3333");
        assert_eq!(config.stock.mode, StockMode::Reserve);
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".cart.toml"), "").unwrap();

        assert_eq!(find(&nested), Some(dir.path().join(".cart.toml")));
    }

    #[test]
    fn test_load_reports_path() {
        let err = load(Path::new("/nonexistent/cart.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/cart.toml"));
    }
}
