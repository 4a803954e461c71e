use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};

use crate::model::{Element, ModelId, ModelStore};
use crate::queries::{Query, QueryGroup, Rule};
use crate::view::Visibility;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterField {
    Category,
    Property,
}

/// Status line contents, kept separate from the filter inputs so an
/// alert survives until the next update.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Info(String),
    Alert(String),
}

pub struct App {
    pub store: ModelStore,
    pub group: QueryGroup,
    pub visibility: Visibility,
    pub focus: FilterField,
    pub category_input: String,
    pub property_input: String,
    pub status: Status,
    pub selected_row: usize,
    pub scroll_offset: usize,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            group: QueryGroup::new(),
            visibility: Visibility::new(),
            focus: FilterField::Category,
            category_input: String::new(),
            property_input: String::new(),
            status: Status::Idle,
            selected_row: 0,
            scroll_offset: 0,
            should_quit: false,
        }
    }

    /// Seed the filter fields (from CLI flags) without evaluating.
    #[must_use]
    pub fn with_filters(mut self, category: Option<String>, property: Option<String>) -> Self {
        self.category_input = category.unwrap_or_default();
        self.property_input = property.unwrap_or_default();
        self
    }

    /// Replace the group with a pre-built startup query. Carries every
    /// CLI rule, including ones the two filter fields cannot show.
    #[must_use]
    pub fn with_startup_query(mut self, query: Query) -> Self {
        self.group.clear();
        self.group.add_query(query);
        self
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::finder::draw_finder(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    // Plain letters always edit the focused filter field; quit and
    // reset live on Esc and Ctrl+R so typing "r" or "q" into a
    // pattern stays possible.
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Enter => self.run_update(),
            KeyCode::Up => self.previous_row(),
            KeyCode::Down => self.next_row(),
            KeyCode::Backspace => {
                self.focused_input_mut().pop();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reset_visibility();
            }
            KeyCode::Char(c) => self.focused_input_mut().push(c),
            _ => {}
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FilterField::Category => FilterField::Property,
            FilterField::Property => FilterField::Category,
        };
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            FilterField::Category => &mut self.category_input,
            FilterField::Property => &mut self.property_input,
        }
    }

    /// Rebuild the query from the filter fields, then re-evaluate.
    /// Runs synchronously inside the event loop, so updates cannot
    /// interleave.
    pub fn run_update(&mut self) {
        let query = match build_finder_query(&self.category_input, &self.property_input) {
            Ok(q) => q,
            Err(err) => {
                self.status = Status::Alert(err.to_string());
                return;
            }
        };

        self.group.clear();
        self.group.add_query(query);
        self.apply_group();
    }

    /// Evaluate the current group and isolate the matches. Zero
    /// matches raises an alert and leaves visibility untouched.
    pub fn apply_group(&mut self) {
        let result = self.group.update(&self.store);
        if result.is_empty() {
            self.status = Status::Alert("No items found for the current filters".to_string());
            return;
        }

        let matched: usize = result.values().map(std::collections::BTreeSet::len).sum();
        self.visibility.isolate(&self.store, &result);
        self.selected_row = 0;
        self.scroll_offset = 0;
        self.status = Status::Info(format!("Isolated {matched} elements"));
    }

    pub fn reset_visibility(&mut self) {
        self.visibility.reset();
        self.selected_row = 0;
        self.scroll_offset = 0;
        self.status = Status::Info("Showing all elements".to_string());
    }

    fn previous_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            if self.selected_row < self.scroll_offset {
                self.scroll_offset = self.selected_row;
            }
        }
    }

    fn next_row(&mut self) {
        let max = self.visible_elements().len().saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    /// Elements currently shown, ordered by model handle then id.
    #[must_use]
    pub fn visible_elements(&self) -> Vec<(ModelId, &Element)> {
        let mut rows: Vec<(ModelId, &Element)> = self
            .store
            .iter()
            .flat_map(|(model_id, model)| {
                model
                    .elements
                    .values()
                    .filter(move |e| self.visibility.is_visible(model_id, e.id))
                    .map(move |e| (model_id, e))
            })
            .collect();

        rows.sort_by_key(|(model_id, e)| (*model_id, e.id));
        rows
    }

    #[must_use]
    pub fn total_elements(&self) -> usize {
        self.store.iter().map(|(_, m)| m.element_count()).sum()
    }
}

/// Build the single finder query from the two filter fields. Empty
/// fields contribute no rule; two rules combine with AND.
pub fn build_finder_query(
    category: &str,
    property: &str,
) -> Result<Query, crate::error::QueryError> {
    let mut query = Query::new("finder", true);

    if !category.trim().is_empty() {
        query.add_rule(Rule::category(category.trim())?);
    }
    if !property.trim().is_empty() {
        query.add_rule(Rule::property_filter(property)?);
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IfcModel;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_store() -> ModelStore {
        let mut model = IfcModel::new("Test".into(), "IFC4".into(), "test.ifc".into());

        for (id, category) in [(1, "IFCWALL"), (2, "IFCDOOR"), (3, "IFCSLAB")] {
            model.elements.insert(
                id,
                Element {
                    id,
                    global_id: format!("0guid{id:017}"),
                    name: format!("{category} {id}"),
                    category: category.to_string(),
                    storey_id: None,
                    properties: HashMap::new(),
                },
            );
        }

        let mut store = ModelStore::new();
        store.insert(model);
        store
    }

    #[test]
    fn plain_letters_edit_the_focused_field_instead_of_quitting() {
        let mut app = App::new(sample_store());

        app.handle_key(key(KeyCode::Char('q')));
        app.handle_key(key(KeyCode::Char('r')));

        assert!(!app.should_quit);
        assert_eq!(app.category_input, "qr");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.category_input, "q");
    }

    #[test]
    fn esc_quits_and_tab_switches_the_focused_field() {
        let mut app = App::new(sample_store());

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.focus, FilterField::Property);
        assert_eq!(app.property_input, "x");
        assert_eq!(app.category_input, "");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_r_resets_visibility() {
        let mut app = App::new(sample_store());
        app.category_input = "wall".to_string();
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.visibility.is_unfiltered());

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(app.visibility.is_unfiltered());
    }

    #[test]
    fn startup_query_keeps_every_cli_rule() {
        let query = Query::new("cli", false)
            .with_rule(Rule::category("^IFCWALL$").unwrap())
            .with_rule(Rule::category("^IFCDOOR$").unwrap());

        let mut app = App::new(sample_store()).with_startup_query(query);
        app.apply_group();

        // Both rules survive: wall and door isolated, slab hidden
        assert!(app.visibility.is_visible(0, 1));
        assert!(app.visibility.is_visible(0, 2));
        assert!(!app.visibility.is_visible(0, 3));
    }

    #[test]
    fn zero_match_update_alerts_and_keeps_visibility() {
        let mut app = App::new(sample_store());
        app.category_input = "roof".to_string();
        app.handle_key(key(KeyCode::Enter));

        assert!(matches!(app.status, Status::Alert(_)));
        assert!(app.visibility.is_unfiltered());
    }

    #[test]
    fn empty_fields_build_an_empty_query() {
        let query = build_finder_query("", "  ").unwrap();
        assert!(query.rules().is_empty());
    }

    #[test]
    fn invalid_category_pattern_is_rejected() {
        assert!(build_finder_query("wall[", "").is_err());
    }
}
