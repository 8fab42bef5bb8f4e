use crate::item::ItemId;

/// What the detail half of the two-pane screen is showing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DetailPane {
    #[default]
    Hidden,
    ViewItem(ItemId),
    EditItem(ItemId),
}

/// Outcome of a device back press. `NotIntercepted` leaves the press to
/// the platform default (exiting the screen).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackPress {
    Intercepted,
    NotIntercepted,
}

/// State machine for the detail pane and its back stack. Rendering is a
/// pure function of `current()`; nothing else mutates the history.
#[derive(Clone, Debug, Default)]
pub struct PaneNavigator {
    current: DetailPane,
    history: Vec<DetailPane>,
}

impl PaneNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DetailPane {
        self.current
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn open(&mut self, id: ItemId) {
        self.history.push(self.current);
        self.current = DetailPane::ViewItem(id);
    }

    /// Editing is a sub-mode of viewing and leaves no history frame of its
    /// own; leaving it lands back on the item, not further up the stack.
    pub fn edit(&mut self, id: ItemId) {
        self.current = DetailPane::EditItem(id);
    }

    /// A successful save returns to viewing the saved item, again without
    /// growing the history.
    pub fn finish_edit(&mut self, id: ItemId) {
        self.current = DetailPane::ViewItem(id);
    }

    /// Pop the history; an empty history resolves to `Hidden`.
    pub fn back(&mut self) {
        self.current = self.history.pop().unwrap_or_default();
    }

    pub fn back_pressed(&mut self) -> BackPress {
        match self.current {
            DetailPane::EditItem(id) => {
                self.current = DetailPane::ViewItem(id);
                BackPress::Intercepted
            }
            DetailPane::ViewItem(_) => {
                self.back();
                BackPress::Intercepted
            }
            DetailPane::Hidden => BackPress::NotIntercepted,
        }
    }
}
