use crate::app::state::CategoryPanel;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

pub const ROOT_WINDOW: WindowId = WindowId(0);

impl WindowId {
    pub fn is_root(self) -> bool {
        self == ROOT_WINDOW
    }
}

/// Owns every live panel. The root panel lives for the whole process; every
/// other panel sits in the open-panel registry until it is closed on its own
/// or swept by `close_all` when the root shuts down.
pub struct WindowManager {
    root: CategoryPanel,
    registry: BTreeMap<WindowId, CategoryPanel>,
    // Most recently focused last. The root is always at the bottom.
    focus_stack: Vec<WindowId>,
    next_id: u64,
}

impl WindowManager {
    pub fn new(root: CategoryPanel) -> Self {
        Self {
            root,
            registry: BTreeMap::new(),
            focus_stack: vec![ROOT_WINDOW],
            next_id: 1,
        }
    }

    pub fn register_for_lifecycle(&mut self, panel: CategoryPanel) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.registry.insert(id, panel);
        id
    }

    pub fn display(&mut self, panel: CategoryPanel) -> WindowId {
        let title = panel.title().to_string();
        let id = self.register_for_lifecycle(panel);
        self.focus(id);
        info!(window = id.0, %title, open = self.open_count(), "displayed panel");
        id
    }

    pub fn focus(&mut self, id: WindowId) -> bool {
        if !id.is_root() && !self.registry.contains_key(&id) {
            return false;
        }
        self.focus_stack.retain(|existing| *existing != id);
        self.focus_stack.push(id);
        true
    }

    pub fn focused_id(&self) -> WindowId {
        self.focus_stack.last().copied().unwrap_or(ROOT_WINDOW)
    }

    pub fn focused(&self) -> &CategoryPanel {
        let id = self.focused_id();
        self.get(id).unwrap_or(&self.root)
    }

    pub fn focused_mut(&mut self) -> &mut CategoryPanel {
        let id = self.focused_id();
        match self.registry.get_mut(&id) {
            Some(panel) => panel,
            None => &mut self.root,
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&CategoryPanel> {
        if id.is_root() {
            Some(&self.root)
        } else {
            self.registry.get(&id)
        }
    }

    pub fn close(&mut self, id: WindowId) -> bool {
        if id.is_root() {
            return false;
        }
        let Some(panel) = self.registry.remove(&id) else {
            return false;
        };
        self.focus_stack.retain(|existing| *existing != id);
        info!(window = id.0, title = %panel.title(), open = self.open_count(), "closed panel");
        true
    }

    pub fn close_all(&mut self) -> usize {
        let closed = self.open_count();
        self.registry.clear();
        self.focus_stack = vec![ROOT_WINDOW];
        info!(closed, "closed all registered panels");
        closed
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let ids: Vec<WindowId> = self.windows().map(|(id, _)| id).collect();
        let Some(position) = ids.iter().position(|id| *id == self.focused_id()) else {
            return;
        };
        let next = if forward {
            (position + 1) % ids.len()
        } else {
            (position + ids.len() - 1) % ids.len()
        };
        self.focus(ids[next]);
    }

    pub fn open_count(&self) -> usize {
        self.registry.len()
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &CategoryPanel)> {
        std::iter::once((ROOT_WINDOW, &self.root))
            .chain(self.registry.iter().map(|(id, panel)| (*id, panel)))
    }
}
