use crate::entry::Entry;

/// One row of the persistent menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Meeting {
        label: String,
        tooltip: Option<String>,
        entry: Entry,
    },
    Divider,
    /// Disabled, de-emphasised heading shown right after a divider.
    SectionLabel(String),
}

impl MenuItem {
    pub fn is_selectable(&self) -> bool {
        matches!(self, MenuItem::Meeting { .. })
    }

    pub fn entry(&self) -> Option<&Entry> {
        match self {
            MenuItem::Meeting { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

/// One row offered by the searchable picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub text: String,
    /// Raw url/id, present only when it differs from `text`.
    pub sub_text: Option<String>,
    pub entry: Entry,
}

impl ChoiceItem {
    /// Raw url/id of the entry, whether or not it is shown as sub text.
    pub fn target(&self) -> &str {
        self.entry.target().unwrap_or_default()
    }
}

/// Receives a freshly built menu, replacing whatever it showed before.
pub trait MenuSurface {
    fn set_items(&mut self, items: Vec<MenuItem>);
}

/// Receives a freshly built choice list, replacing whatever it offered before.
pub trait ChoiceSurface {
    fn set_choices(&mut self, choices: Vec<ChoiceItem>);
}

fn differing_target(entry: &Entry) -> Option<String> {
    entry
        .target()
        .filter(|t| *t != entry.display_label())
        .map(str::to_string)
}

/// Both display structures derived from one registry snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub menu: Vec<MenuItem>,
    pub choices: Vec<ChoiceItem>,
}

impl Projection {
    pub fn build(entries: &[Entry]) -> Self {
        let mut menu = Vec::with_capacity(entries.len());
        let mut choices = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.is_separator() {
                menu.push(MenuItem::Divider);
                if let Some(section) = entry.section() {
                    menu.push(MenuItem::SectionLabel(section.to_string()));
                }
                continue;
            }
            let label = entry.display_label().to_string();
            let sub = differing_target(entry);
            menu.push(MenuItem::Meeting {
                label: label.clone(),
                tooltip: sub.clone(),
                entry: entry.clone(),
            });
            choices.push(ChoiceItem {
                text: label,
                sub_text: sub,
                entry: entry.clone(),
            });
        }
        Self { menu, choices }
    }

    /// Hand both structures to their hosts in one go.
    pub fn publish(&self, menu: &mut dyn MenuSurface, picker: &mut dyn ChoiceSurface) {
        menu.set_items(self.menu.clone());
        picker.set_choices(self.choices.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_url_separator_id() {
        let entries = vec![
            Entry::url(None, "https://zoom.us/j/111"),
            Entry::separator(None),
            Entry::id(None, "222", Some("p")),
        ];
        let p = Projection::build(&entries);
        assert_eq!(p.choices.len(), 2);
        assert_eq!(p.menu.len(), 3);
        assert!(!p.menu.iter().any(|m| matches!(m, MenuItem::SectionLabel(_))));
        assert_eq!(p.choices[0].entry, entries[0]);
        assert_eq!(p.choices[1].entry, entries[2]);
    }

    #[test]
    fn section_label_follows_divider() {
        let entries = vec![Entry::separator(Some("Work")), Entry::id(Some("Sync"), "1", None)];
        let p = Projection::build(&entries);
        assert_eq!(p.menu[0], MenuItem::Divider);
        assert_eq!(p.menu[1], MenuItem::SectionLabel("Work".into()));
        assert!(p.menu[2].is_selectable());
        assert!(!p.menu[1].is_selectable());
    }

    #[test]
    fn sub_text_only_when_label_differs() {
        let entries = vec![Entry::id(Some("Sync"), "1", None), Entry::id(None, "2", None)];
        let p = Projection::build(&entries);
        assert_eq!(p.choices[0].sub_text.as_deref(), Some("1"));
        assert_eq!(p.choices[1].sub_text, None);
        assert_eq!(p.choices[1].target(), "2");
        match &p.menu[0] {
            MenuItem::Meeting { tooltip, .. } => assert_eq!(tooltip.as_deref(), Some("1")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn identical_titles_keep_own_entries() {
        let entries = vec![Entry::id(Some("Sync"), "1", None), Entry::id(Some("Sync"), "2", None)];
        let p = Projection::build(&entries);
        assert_eq!(p.menu[0].entry(), Some(&entries[0]));
        assert_eq!(p.menu[1].entry(), Some(&entries[1]));
    }
}
