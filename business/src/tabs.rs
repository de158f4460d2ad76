//! Tab container state: a fixed number of panels and the active one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabsState {
    active: usize,
    len: usize,
}

impl TabsState {
    /// The first tab starts active.
    pub fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    /// Switches to `index`. Out of range indices are ignored.
    ///
    /// Returns whether the active tab changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active_panel<'p, T>(&self, panels: &'p [T]) -> Option<&'p T> {
        panels.get(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_tab() {
        let tabs = TabsState::new(2);
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.active_panel(&["all", "pending"]), Some(&"all"));
    }

    #[test]
    fn select_switches_and_reports_change() {
        let mut tabs = TabsState::new(2);

        assert!(tabs.select(1));
        assert!(tabs.is_active(1));
        assert!(!tabs.select(1), "reselecting the active tab is not a change");
        assert_eq!(tabs.active_panel(&["all", "pending"]), Some(&"pending"));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut tabs = TabsState::new(2);

        assert!(!tabs.select(2));
        assert_eq!(tabs.active(), 0);

        let mut empty = TabsState::new(0);
        assert!(empty.is_empty());
        assert!(!empty.select(0));
        assert_eq!(empty.active_panel::<&str>(&[]), None);
    }
}
