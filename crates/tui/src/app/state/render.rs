use crate::app::state::WindowId;
use ratatui::layout::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Entry(usize),
    SortToggle,
    Filter,
    NavPrevious,
    NavNext,
    Window(WindowId),
}

/// Clickable regions recorded by the last draw. Later regions win when they
/// overlap.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(_, target)| *target)
    }

    #[cfg(test)]
    pub fn area_of(&self, target: HitTarget) -> Option<Rect> {
        self.regions
            .iter()
            .rev()
            .find(|(_, candidate)| *candidate == target)
            .map(|(area, _)| *area)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::{HitMap, HitTarget};
    use ratatui::layout::Rect;

    #[test]
    fn hit_prefers_latest_region_and_respects_bounds() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 10, 5), HitTarget::Filter);
        map.push(Rect::new(2, 1, 3, 2), HitTarget::Entry(4));
        map.push(Rect::new(20, 20, 0, 3), HitTarget::SortToggle);

        assert_eq!(map.hit(3, 2), Some(HitTarget::Entry(4)));
        assert_eq!(map.hit(0, 0), Some(HitTarget::Filter));
        assert_eq!(map.hit(10, 0), None);
        assert_eq!(map.hit(20, 20), None);
        assert_eq!(map.area_of(HitTarget::Entry(4)), Some(Rect::new(2, 1, 3, 2)));

        map.clear();
        assert_eq!(map.hit(3, 2), None);
    }
}
