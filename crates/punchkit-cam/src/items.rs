//! Recognized punch items and their visiting order.

use punchkit_core::Frame;

use crate::pattern::PunchPattern;

/// One punch location: candidate frames sharing an origin but differing
/// in tangent rotation about the normal, plus the frame the rotation
/// resolver settled on (`None` = unreachable, excluded from emission).
#[derive(Debug, Clone, PartialEq)]
pub struct PunchItem {
    /// Candidate approach poses; never empty for a recognized item.
    pub candidates: Vec<Frame>,
    /// Set by the rotation resolver.
    pub resolved: Option<Frame>,
}

impl PunchItem {
    pub fn new(candidates: Vec<Frame>) -> Self {
        Self {
            candidates,
            resolved: None,
        }
    }

    /// Representative candidate used for routing and the position check.
    pub fn first_candidate(&self) -> &Frame {
        &self.candidates[0]
    }
}

/// All punch items of one planning run, with the shared pattern and the
/// visiting-order permutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchItems {
    pub pattern: PunchPattern,
    items: Vec<PunchItem>,
    visit_order: Vec<usize>,
}

impl PunchItems {
    pub fn new(pattern: PunchPattern) -> Self {
        Self {
            pattern,
            items: Vec::new(),
            visit_order: Vec::new(),
        }
    }

    /// Appends a recognized item, keeping `visit_order` the identity.
    pub fn push(&mut self, item: PunchItem) {
        self.visit_order.push(self.items.len());
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PunchItem] {
        &self.items
    }

    /// Visiting order; always a bijection on `[0, len)`.
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// Resets the visiting order to the identity permutation.
    pub fn reset_order(&mut self) {
        self.visit_order = (0..self.items.len()).collect();
    }

    /// Installs a new visiting order. Returns `false` (leaving the
    /// current order untouched) unless `order` is a permutation of
    /// `[0, len)`.
    pub fn set_visit_order(&mut self, order: Vec<usize>) -> bool {
        if order.len() != self.items.len() {
            return false;
        }
        let mut seen = vec![false; order.len()];
        for &idx in &order {
            if idx >= seen.len() || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        self.visit_order = order;
        true
    }

    /// Original item index at visiting position `pos`.
    pub fn ordered_index(&self, pos: usize) -> usize {
        self.visit_order[pos]
    }

    /// Item at visiting position `pos`.
    pub fn ordered_item(&self, pos: usize) -> &PunchItem {
        &self.items[self.visit_order[pos]]
    }

    /// Mutable item at visiting position `pos`.
    pub fn ordered_item_mut(&mut self, pos: usize) -> &mut PunchItem {
        &mut self.items[self.visit_order[pos]]
    }

    /// First resolved frame in visiting order; the emitter's relative
    /// levels are measured from its Z.
    pub fn first_resolved_frame(&self) -> Option<&Frame> {
        self.visit_order
            .iter()
            .find_map(|&idx| self.items[idx].resolved.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use punchkit_core::Frame;

    fn item_at(x: f64) -> PunchItem {
        PunchItem::new(vec![Frame::from_origin(Point3::new(x, 0.0, 0.0))])
    }

    fn three_items() -> PunchItems {
        let mut items = PunchItems::new(PunchPattern::round());
        for x in [0.0, 1.0, 2.0] {
            items.push(item_at(x));
        }
        items
    }

    #[test]
    fn push_keeps_identity_order() {
        let items = three_items();
        assert_eq!(items.visit_order(), &[0, 1, 2]);
    }

    #[test]
    fn set_visit_order_rejects_non_permutations() {
        let mut items = three_items();
        assert!(!items.set_visit_order(vec![0, 1]));
        assert!(!items.set_visit_order(vec![0, 1, 1]));
        assert!(!items.set_visit_order(vec![0, 1, 3]));
        assert_eq!(items.visit_order(), &[0, 1, 2]);
        assert!(items.set_visit_order(vec![2, 0, 1]));
        assert_eq!(items.ordered_index(0), 2);
        assert_eq!(items.ordered_item(0).first_candidate().origin.x, 2.0);
    }

    #[test]
    fn first_resolved_frame_follows_visit_order() {
        let mut items = three_items();
        items.set_visit_order(vec![2, 0, 1]);
        assert!(items.first_resolved_frame().is_none());
        let frame = *items.ordered_item(1).first_candidate();
        items.ordered_item_mut(1).resolved = Some(frame);
        assert_eq!(items.first_resolved_frame().unwrap().origin.x, 0.0);
    }
}
