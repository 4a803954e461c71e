use super::Rule;
use crate::model::Element;

/// A named, ordered collection of rules.
///
/// With `inclusive` set an element must satisfy every rule (AND);
/// cleared, any single rule suffices (OR). A query with no rules
/// matches nothing, so a cleared filter isolates nothing instead of
/// everything.
#[derive(Debug, Clone)]
pub struct Query {
    pub name: String,
    pub inclusive: bool,
    rules: Vec<Rule>,
}

impl Query {
    #[must_use]
    pub fn new(name: impl Into<String>, inclusive: bool) -> Self {
        Self {
            name: name.into(),
            inclusive,
            rules: Vec::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        if self.inclusive {
            self.rules.iter().all(|r| r.matches(element))
        } else {
            self.rules.iter().any(|r| r.matches(element))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn wall_with_rating(rating: &str) -> Element {
        Element {
            id: 7,
            global_id: "0aaaaaaaaaaaaaaaaaaaa7".to_string(),
            name: "Wall".to_string(),
            category: "IFCWALL".to_string(),
            storey_id: None,
            properties: HashMap::from([("FireRating".to_string(), rating.to_string())]),
        }
    }

    #[test]
    fn inclusive_requires_every_rule() {
        let query = Query::new("fire walls", true)
            .with_rule(Rule::category("wall").unwrap())
            .with_rule(Rule::property("FireRating", "F60").unwrap());

        assert!(query.matches(&wall_with_rating("F60")));
        assert!(!query.matches(&wall_with_rating("F30")));
    }

    #[test]
    fn non_inclusive_accepts_any_rule() {
        let query = Query::new("walls or rated", false)
            .with_rule(Rule::category("door").unwrap())
            .with_rule(Rule::property("FireRating", "F30").unwrap());

        assert!(query.matches(&wall_with_rating("F30")));
        assert!(!query.matches(&wall_with_rating("F60")));
    }

    #[test]
    fn empty_rule_list_matches_nothing() {
        for inclusive in [true, false] {
            let query = Query::new("empty", inclusive);
            assert!(!query.matches(&wall_with_rating("F60")));
        }
    }

    #[test]
    fn clear_rules_resets_to_match_nothing() {
        let mut query = Query::new("walls", true).with_rule(Rule::category("wall").unwrap());
        assert!(query.matches(&wall_with_rating("F60")));

        query.clear_rules();
        assert!(!query.matches(&wall_with_rating("F60")));
    }
}
