use crate::view::{ChoiceItem, ChoiceSurface};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Number of rows shown at once.
    pub rows: usize,
    /// Column width rows are cut to.
    pub width: usize,
    pub placeholder: String,
    /// Also match the query against the url/id sub text.
    pub search_sub_text: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            width: 40,
            placeholder: "Search meetings".into(),
            search_sub_text: true,
        }
    }
}

/// Searchable list of meetings. Holds no registry state of its own beyond the
/// last published choices and the transient query and selection.
pub struct Picker {
    matcher: SkimMatcherV2,
    config: PickerConfig,
    choices: Vec<ChoiceItem>,
    query: String,
    selected: usize,
    visible: bool,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
            config,
            choices: Vec::new(),
            query: String::new(),
            selected: 0,
            visible: false,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.selected = 0;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn score(&self, choice: &ChoiceItem) -> Option<i64> {
        let text = self.matcher.fuzzy_match(&choice.text, &self.query);
        let sub = if self.config.search_sub_text {
            self.matcher.fuzzy_match(choice.target(), &self.query)
        } else {
            None
        };
        text.max(sub)
    }

    /// Choices matching the query, best first, cut to the configured row
    /// count. Ties keep registry order.
    pub fn visible_choices(&self) -> Vec<&ChoiceItem> {
        if self.query.is_empty() {
            return self.choices.iter().take(self.config.rows).collect();
        }
        let mut scored: Vec<(i64, &ChoiceItem)> = self
            .choices
            .iter()
            .filter_map(|c| self.score(c).map(|s| (s, c)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(self.config.rows)
            .map(|(_, c)| c)
            .collect()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_choices().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Pick the visible row at `index` and close the picker.
    pub fn choose(&mut self, index: usize) -> Option<ChoiceItem> {
        let chosen = self.visible_choices().get(index).map(|c| (*c).clone());
        self.dismiss();
        chosen
    }

    pub fn choose_selected(&mut self) -> Option<ChoiceItem> {
        self.choose(self.selected)
    }

    /// Close the picker and forget the query and selection.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.query.clear();
        self.selected = 0;
    }

    /// `text` cut to the configured width, ending in an ellipsis when cut.
    pub fn fit(&self, text: &str) -> String {
        let width = self.config.width.max(1);
        if text.chars().count() <= width {
            return text.to_string();
        }
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

impl ChoiceSurface for Picker {
    fn set_choices(&mut self, choices: Vec<ChoiceItem>) {
        self.choices = choices;
        let len = self.visible_choices().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
