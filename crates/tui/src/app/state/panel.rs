use crate::app::state::InputState;
use crate::catalog::{EntryAction, Illustration, NavLinks, PanelId, PanelSpec, Rgb};
use crate::links::LinkOpener;
use tracing::debug;

pub const GRID_COLUMNS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryEntry {
    pub label: String,
    pub action: EntryAction,
    pub accent: Rgb,
}

impl CategoryEntry {
    pub fn link_url(&self) -> Option<&str> {
        match &self.action {
            EntryAction::ExternalLink { url } => Some(url),
            EntryAction::OpenPanel { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

pub fn grid_cell(index: usize) -> GridCell {
    GridCell {
        row: index / GRID_COLUMNS,
        col: index % GRID_COLUMNS,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelFocus {
    Grid,
    Filter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    Link(String),
    Panel(PanelId),
}

#[derive(Clone, Debug)]
pub struct PanelStyle {
    pub title: String,
    pub accent: Rgb,
}

pub struct CategoryPanel {
    pub id: PanelId,
    pub style: PanelStyle,
    pub nav: Option<NavLinks>,
    pub illustrations: Vec<Illustration>,
    entries: Vec<CategoryEntry>,
    visible: Vec<bool>,
    sort_ascending: bool,
    filter: InputState,
    focus: PanelFocus,
    selected: Option<usize>,
}

impl CategoryPanel {
    pub fn new(id: PanelId, style: PanelStyle, entries: Vec<CategoryEntry>) -> Self {
        let visible = vec![true; entries.len()];
        let selected = (!entries.is_empty()).then_some(0);
        Self {
            id,
            style,
            nav: None,
            illustrations: Vec::new(),
            entries,
            visible,
            sort_ascending: true,
            filter: InputState::default(),
            focus: PanelFocus::Grid,
            selected,
        }
    }

    pub fn from_spec(spec: &PanelSpec) -> Self {
        let entries = spec
            .entries
            .iter()
            .map(|entry| CategoryEntry {
                label: entry.label.clone(),
                action: entry.action.clone(),
                accent: entry.accent.unwrap_or(spec.accent),
            })
            .collect();
        let style = PanelStyle {
            title: spec.title.clone(),
            accent: spec.accent,
        };
        let mut panel = Self::new(spec.id.clone(), style, entries);
        panel.nav = spec.nav.clone();
        panel.illustrations = spec.illustrations.clone();
        panel
    }

    pub fn title(&self) -> &str {
        &self.style.title
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &CategoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_visible(*index))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    pub fn sort_label(&self) -> &'static str {
        if self.sort_ascending() {
            "A - Z"
        } else {
            "Z - A"
        }
    }

    pub fn filter(&self) -> &InputState {
        &self.filter
    }

    pub fn filter_text(&self) -> String {
        self.filter.current()
    }

    pub fn focus(&self) -> PanelFocus {
        self.focus
    }

    pub fn focus_filter(&mut self) {
        self.focus = PanelFocus::Filter;
    }

    pub fn focus_grid(&mut self) {
        self.focus = PanelFocus::Grid;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&CategoryEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    pub fn select(&mut self, index: usize) {
        if self.is_visible(index) {
            self.selected = Some(index);
        }
    }

    pub fn row_count(&self) -> usize {
        self.entries.len().div_ceil(GRID_COLUMNS)
    }

    pub fn on_filter_changed(&mut self, text: &str) {
        self.filter.set_from(text);
        self.refilter();
    }

    pub fn edit_filter(&mut self, edit: impl FnOnce(&mut InputState)) {
        let before = self.filter.current();
        edit(&mut self.filter);
        if self.filter.current() != before {
            self.refilter();
        }
    }

    pub fn clear_filter(&mut self) {
        self.on_filter_changed("");
    }

    pub fn on_sort_toggle(&mut self) {
        self.sort_ascending = !self.sort_ascending;
        let ascending = self.sort_ascending;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // `sort_by` is stable, so equal labels keep their relative order in both directions.
        order.sort_by(|a, b| {
            let (left, right) = (&self.entries[*a].label, &self.entries[*b].label);
            if ascending {
                left.cmp(right)
            } else {
                right.cmp(left)
            }
        });

        let selected_before = self.selected;
        let mut entries = Vec::with_capacity(order.len());
        let mut visible = Vec::with_capacity(order.len());
        let mut selected = None;
        for (new_index, old_index) in order.iter().enumerate() {
            entries.push(self.entries[*old_index].clone());
            visible.push(self.visible[*old_index]);
            if selected_before == Some(*old_index) {
                selected = Some(new_index);
            }
        }
        self.entries = entries;
        self.visible = visible;
        self.selected = selected;
        debug!(panel = %self.id, ascending, "sorted entries");
    }

    pub fn on_entry_activated(&self, index: usize, links: &dyn LinkOpener) -> Option<Activation> {
        let entry = self.entries.get(index)?;
        match &entry.action {
            EntryAction::ExternalLink { url } => {
                debug!(panel = %self.id, label = %entry.label, url = %url, "activating link");
                links.open(url);
                Some(Activation::Link(url.clone()))
            }
            EntryAction::OpenPanel { panel } => {
                debug!(panel = %self.id, label = %entry.label, target = %panel, "activating panel");
                Some(Activation::Panel(panel.clone()))
            }
        }
    }

    pub fn on_any_key(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.focus = PanelFocus::Filter;
        self.edit_filter(|input| input.insert_char(ch));
        true
    }

    pub fn move_selection(&mut self, direction: MoveDirection) {
        let Some(current) = self.selected else {
            self.selected = self.first_visible();
            return;
        };
        let here = grid_cell(current);
        let candidates = self.visible_entries().map(|(index, _)| index);
        let next = match direction {
            MoveDirection::Left => candidates.filter(|index| *index < current).last(),
            MoveDirection::Right => candidates.filter(|index| *index > current).next(),
            MoveDirection::Up => candidates
                .filter(|index| grid_cell(*index).row < here.row)
                .min_by_key(|index| {
                    let cell = grid_cell(*index);
                    (here.row - cell.row, cell.col.abs_diff(here.col))
                }),
            MoveDirection::Down => candidates
                .filter(|index| grid_cell(*index).row > here.row)
                .min_by_key(|index| {
                    let cell = grid_cell(*index);
                    (cell.row - here.row, cell.col.abs_diff(here.col))
                }),
        };
        if let Some(next) = next {
            self.selected = Some(next);
        }
    }

    fn first_visible(&self) -> Option<usize> {
        self.visible_entries().map(|(index, _)| index).next()
    }

    fn refilter(&mut self) {
        let query = self.filter_text().to_lowercase();
        self.visible = self
            .entries
            .iter()
            .map(|entry| entry.label.to_lowercase().contains(&query))
            .collect();
        if !self.selected.is_some_and(|index| self.is_visible(index)) {
            self.selected = self.first_visible();
        }
        debug!(
            panel = %self.id,
            query = %query,
            visible = self.visible_count(),
            "filtered entries"
        );
    }
}
