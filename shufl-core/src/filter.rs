use crate::store::Filter;

/// Raw filter inputs as the user typed them. Parsing happens on demand so
/// the text field can round-trip unmodified.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterCriteria {
    pub selected_genre: Option<String>,
    pub player_count_text: String,
}

impl FilterCriteria {
    /// Selecting the already-selected genre clears the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        if self.selected_genre.as_deref() == Some(genre) {
            self.selected_genre = None;
        } else {
            self.selected_genre = Some(genre.to_owned());
        }
    }

    pub fn set_player_count_text(&mut self, text: impl Into<String>) {
        self.player_count_text = text.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Blank or unparsable text means "no player-count constraint".
    pub fn parsed_player_count(&self) -> Option<u32> {
        self.player_count_text.trim().parse().ok()
    }

    pub fn is_active(&self) -> bool {
        self.selected_genre.is_some() || !self.player_count_text.trim().is_empty()
    }

    pub fn filter(&self) -> Filter {
        Filter {
            genre: self.selected_genre.clone(),
            player_count: self.parsed_player_count(),
        }
    }
}
