use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("root panel `{0}` is not defined")]
    MissingRoot(PanelId),
    #[error("panel `{0}` is defined more than once")]
    DuplicatePanel(PanelId),
    #[error("panel `{panel}` has more than one entry labelled `{label}`")]
    DuplicateLabel { panel: PanelId, label: String },
    #[error("panel `{from}` refers to undefined panel `{target}`")]
    UnknownPanel { from: PanelId, target: PanelId },
    #[error("root panel `{0}` cannot have navigation links")]
    RootNavigation(PanelId),
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    #[cfg(test)]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("expected a #RRGGBB color, got `{value}`"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum EntryAction {
    #[serde(rename = "link")]
    ExternalLink { url: String },
    #[serde(rename = "panel")]
    OpenPanel { panel: PanelId },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    pub label: String,
    #[serde(default)]
    pub accent: Option<Rgb>,
    pub action: EntryAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLinks {
    pub previous: PanelId,
    pub next: PanelId,
}

/// A local image drawn beside a panel's grid. `path` is resolved against the
/// configured asset directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Illustration {
    pub path: PathBuf,
    #[serde(default)]
    pub caption: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelSpec {
    pub id: PanelId,
    pub title: String,
    pub accent: Rgb,
    #[serde(default)]
    pub nav: Option<NavLinks>,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
    #[serde(default)]
    pub illustrations: Vec<Illustration>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    root: PanelId,
    panels: Vec<PanelSpec>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn root(&self) -> &PanelId {
        &self.root
    }

    pub fn panel(&self, id: &PanelId) -> Option<&PanelSpec> {
        self.panels.iter().find(|panel| &panel.id == id)
    }

    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for panel in &self.panels {
            if !ids.insert(&panel.id) {
                return Err(CatalogError::DuplicatePanel(panel.id.clone()));
            }
        }
        let root = self
            .panel(&self.root)
            .ok_or_else(|| CatalogError::MissingRoot(self.root.clone()))?;
        if root.nav.is_some() {
            return Err(CatalogError::RootNavigation(root.id.clone()));
        }

        for panel in &self.panels {
            let mut labels = HashSet::new();
            for entry in &panel.entries {
                if !labels.insert(entry.label.as_str()) {
                    return Err(CatalogError::DuplicateLabel {
                        panel: panel.id.clone(),
                        label: entry.label.clone(),
                    });
                }
            }

            let entry_targets = panel.entries.iter().filter_map(|entry| match &entry.action {
                EntryAction::OpenPanel { panel } => Some(panel),
                EntryAction::ExternalLink { .. } => None,
            });
            let nav_targets = panel
                .nav
                .iter()
                .flat_map(|nav| [&nav.previous, &nav.next]);
            for target in entry_targets.chain(nav_targets) {
                if !ids.contains(target) {
                    return Err(CatalogError::UnknownPanel {
                        from: panel.id.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
