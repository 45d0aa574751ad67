use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "studyhub=info";
const LOG_FILE_NAME: &str = "studyhub.log";

const CATALOG_VAR: &str = "STUDYHUB_CATALOG";
const ASSETS_VAR: &str = "STUDYHUB_ASSETS";
const LOG_VAR: &str = "STUDYHUB_LOG";
const LOG_FILE_VAR: &str = "STUDYHUB_LOG_FILE";
const NO_MOUSE_VAR: &str = "STUDYHUB_NO_MOUSE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    pub catalog_path: Option<PathBuf>,
    pub asset_dir: PathBuf,
    pub log_filter: String,
    pub log_file: PathBuf,
    pub mouse_capture: bool,
}

impl LaunchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            catalog_path: non_empty(CATALOG_VAR).map(PathBuf::from),
            asset_dir: non_empty(ASSETS_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_filter: non_empty(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_file: non_empty(LOG_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join(LOG_FILE_NAME)),
            mouse_capture: !non_empty(NO_MOUSE_VAR)
                .as_deref()
                .and_then(parse_bool_like)
                .unwrap_or(false),
        }
    }
}

fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
