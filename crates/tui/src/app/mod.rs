pub(crate) mod handlers;
pub(crate) mod state;
pub(crate) mod view;

use crate::app::state::{
    Activation, CategoryPanel, HitMap, StatusKind, StatusMessage, WindowId, WindowManager,
};
use crate::app::view::IllustrationCache;
use crate::catalog::{Catalog, CatalogError, PanelId};
use crate::clipboard::ClipboardSink;
use crate::links::LinkOpener;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

pub struct AppState {
    pub catalog: Catalog,
    pub windows: WindowManager,
    pub status: Option<StatusMessage>,
    pub hit_map: HitMap,
    pub illustrations: IllustrationCache,
    pub should_quit: bool,
    links: Box<dyn LinkOpener>,
    clipboard: Box<dyn ClipboardSink>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        links: Box<dyn LinkOpener>,
        clipboard: Box<dyn ClipboardSink>,
        asset_dir: PathBuf,
    ) -> Result<Self, CatalogError> {
        let root_spec = catalog
            .panel(catalog.root())
            .ok_or_else(|| CatalogError::MissingRoot(catalog.root().clone()))?;
        let root = CategoryPanel::from_spec(root_spec);
        Ok(Self {
            windows: WindowManager::new(root),
            catalog,
            status: None,
            hit_map: HitMap::default(),
            illustrations: IllustrationCache::new(asset_dir),
            should_quit: false,
            links,
            clipboard,
        })
    }

    pub fn focused_panel(&self) -> &CategoryPanel {
        self.windows.focused()
    }

    pub fn focused_panel_mut(&mut self) -> &mut CategoryPanel {
        self.windows.focused_mut()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    pub fn open_panel(&mut self, id: &PanelId) -> Option<WindowId> {
        let Some(spec) = self.catalog.panel(id) else {
            warn!(panel = %id, "requested panel is not in the catalog");
            self.set_status(StatusKind::Error, format!("Unknown panel: {id}"));
            return None;
        };
        let panel = CategoryPanel::from_spec(spec);
        Some(self.windows.display(panel))
    }

    pub fn activate_entry(&mut self, window: WindowId, index: usize) {
        let activation = match self.windows.get(window) {
            Some(panel) => panel.on_entry_activated(index, self.links.as_ref()),
            None => None,
        };
        match activation {
            Some(Activation::Link(url)) => {
                self.set_status(StatusKind::Info, format!("Opening {url}"));
            }
            Some(Activation::Panel(target)) => {
                self.status = None;
                self.open_panel(&target);
            }
            None => {}
        }
    }

    pub fn activate_selected(&mut self) {
        let window = self.windows.focused_id();
        if let Some(index) = self.windows.focused().selected() {
            self.activate_entry(window, index);
        }
    }

    pub fn navigate(&mut self, direction: NavDirection) {
        let window = self.windows.focused_id();
        let Some(nav) = self.windows.focused().nav.clone() else {
            return;
        };
        let target = match direction {
            NavDirection::Previous => nav.previous,
            NavDirection::Next => nav.next,
        };
        self.windows.close(window);
        self.status = None;
        self.open_panel(&target);
    }

    pub fn close_focused(&mut self) {
        let window = self.windows.focused_id();
        if window.is_root() {
            self.shutdown();
        } else {
            self.windows.close(window);
            self.status = None;
        }
    }

    pub fn shutdown(&mut self) {
        let closed = self.windows.close_all();
        info!(closed, "root panel closed, shutting down");
        self.should_quit = true;
    }

    pub fn copy_selected_link(&mut self) {
        let url = self
            .focused_panel()
            .selected_entry()
            .and_then(|entry| entry.link_url())
            .map(str::to_string);
        let Some(url) = url else {
            self.set_status(StatusKind::Info, "Selected entry is not a link");
            return;
        };
        match self.clipboard.copy(&url) {
            Ok(()) => self.set_status(StatusKind::Info, format!("Copied {url}")),
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                self.set_status(StatusKind::Error, error.to_string());
            }
        }
    }
}
