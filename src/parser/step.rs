//! Line-oriented STEP (ISO 10303-21) reader.
//!
//! Parses the DATA section of an IFC physical file into typed entity
//! records. Only the subset of STEP needed for attribute queries is
//! handled; entity lines that do not parse are skipped.

use std::collections::HashMap;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    Null,
    Derived,
}

impl StepValue {
    /// The contained string, if this value is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            StepValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The referenced entity id, if this value is a reference.
    #[must_use]
    pub fn as_reference(&self) -> Option<u64> {
        match self {
            StepValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Entity ids of every reference in a list value.
    #[must_use]
    pub fn reference_list(&self) -> Vec<u64> {
        match self {
            StepValue::List(items) => items.iter().filter_map(StepValue::as_reference).collect(),
            _ => Vec::new(),
        }
    }

    /// Render the value the way it is shown to the user and matched by
    /// property rules.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            StepValue::String(s) => s.clone(),
            StepValue::Real(f) => format!("{f:.2}"),
            StepValue::Integer(i) => i.to_string(),
            StepValue::Boolean(b) => if *b { "Yes" } else { "No" }.to_string(),
            StepValue::Enum(e) => e.clone(),
            StepValue::Reference(id) => format!("#{id}"),
            StepValue::List(list) => list
                .iter()
                .map(StepValue::display)
                .collect::<Vec<_>>()
                .join(", "),
            StepValue::Null => "-".to_string(),
            StepValue::Derived => "*".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

impl StepEntity {
    /// GlobalId attribute of rooted IFC entities (always index 0).
    #[must_use]
    pub fn global_id(&self) -> Option<&str> {
        self.values.first().and_then(StepValue::as_string)
    }

    /// Name attribute of rooted IFC entities (always index 2).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.values.get(2).and_then(StepValue::as_string)
    }
}

#[derive(Debug, Default)]
pub struct StepFile {
    pub entities: HashMap<u64, StepEntity>,
    pub schema: String,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut file = StepFile::default();
        let mut in_data = false;
        let mut saw_data = false;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with("FILE_SCHEMA") {
                if let Some(start) = line.find("('") {
                    if let Some(end) = line[start + 2..].find('\'') {
                        file.schema = line[start + 2..start + 2 + end].to_string();
                    }
                }
                continue;
            }

            match line {
                "DATA;" => {
                    in_data = true;
                    saw_data = true;
                    continue;
                }
                "ENDSEC;" => {
                    in_data = false;
                    continue;
                }
                _ => {}
            }

            if in_data && line.starts_with('#') {
                if let Some(entity) = parse_entity_line(line) {
                    file.entities.insert(entity.id, entity);
                }
            }
        }

        if !saw_data {
            return Err(ParseError::InvalidStep {
                message: "no DATA section found".to_string(),
            });
        }

        Ok(file)
    }

    #[must_use]
    pub fn entity(&self, id: u64) -> Option<&StepEntity> {
        self.entities.get(&id)
    }

    /// All entities of the given STEP type, in arbitrary order.
    pub fn entities_of_type<'a>(
        &'a self,
        entity_type: &'a str,
    ) -> impl Iterator<Item = &'a StepEntity> {
        self.entities
            .values()
            .filter(move |e| e.entity_type == entity_type)
    }
}

// Format: #123=IFCWALL('guid',#ref,'name',...);
fn parse_entity_line(line: &str) -> Option<StepEntity> {
    let line = line.trim_end_matches(';');

    let eq_pos = line.find('=')?;
    let id: u64 = line[1..eq_pos].trim().parse().ok()?;

    let rest = line[eq_pos + 1..].trim();
    let paren_pos = rest.find('(')?;
    if !rest.ends_with(')') {
        return None;
    }
    let entity_type = rest[..paren_pos].trim().to_string();
    let values = parse_values(&rest[paren_pos + 1..rest.len() - 1]);

    Some(StepEntity {
        id,
        entity_type,
        values,
    })
}

// Split a top-level attribute list on commas, respecting strings and
// nested parentheses.
fn parse_values(s: &str) -> Vec<StepValue> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut paren_depth = 0;

    for ch in s.chars() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '(' if !in_string => {
                paren_depth += 1;
                current.push(ch);
            }
            ')' if !in_string => {
                paren_depth -= 1;
                current.push(ch);
            }
            ',' if !in_string && paren_depth == 0 => {
                values.push(parse_single_value(current.trim()));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        values.push(parse_single_value(current.trim()));
    }

    values
}

fn parse_single_value(s: &str) -> StepValue {
    let s = s.trim();

    if s == "$" {
        return StepValue::Null;
    }
    if s == "*" {
        return StepValue::Derived;
    }
    if let Some(stripped) = s.strip_prefix('#') {
        if let Ok(id) = stripped.parse::<u64>() {
            return StepValue::Reference(id);
        }
    }
    if s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2 {
        return StepValue::String(decode_step_string(&s[1..s.len() - 1]));
    }
    if s.starts_with('.') && s.ends_with('.') && s.len() >= 2 {
        return match &s[1..s.len() - 1] {
            "T" => StepValue::Boolean(true),
            "F" => StepValue::Boolean(false),
            inner => StepValue::Enum(inner.to_string()),
        };
    }
    if s.starts_with('(') && s.ends_with(')') {
        return StepValue::List(parse_values(&s[1..s.len() - 1]));
    }
    if let Ok(i) = s.parse::<i64>() {
        return StepValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return StepValue::Real(f);
    }
    // Typed wrapper like IFCBOOLEAN(.T.) or IFCLABEL('x')
    if let Some(paren_pos) = s.find('(') {
        if s.ends_with(')') {
            return parse_single_value(&s[paren_pos + 1..s.len() - 1]);
        }
    }

    StepValue::String(s.to_string())
}

/// Decode STEP/IFC encoded strings with Unicode escape sequences.
/// Supports:
/// - `\X2\XXXX\X0\` - 2-byte Unicode (BMP), can have multiple 4-char hex codes
/// - `\X\XX` - 1-byte ISO 8859-1
/// - `\S\X` - single shifted ISO 8859-1 character
/// - `\\` - escaped backslash
/// - `''` - escaped apostrophe
fn decode_step_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('X') => {
                    chars.next();
                    match chars.peek() {
                        Some('2') => {
                            chars.next(); // '2'
                            chars.next(); // '\'

                            let mut hex = String::new();
                            while let Some(&c) = chars.peek() {
                                if c == '\\' {
                                    break;
                                }
                                hex.push(c);
                                chars.next();
                            }
                            // Skip the closing \X0\
                            if chars.peek() == Some(&'\\') {
                                for _ in 0..4 {
                                    chars.next();
                                }
                            }
                            // Each 4 hex chars encode one BMP code point
                            for chunk in hex.as_bytes().chunks(4) {
                                let code = std::str::from_utf8(chunk)
                                    .ok()
                                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                                    .and_then(char::from_u32);
                                if let Some(c) = code {
                                    result.push(c);
                                }
                            }
                        }
                        Some('\\') => {
                            chars.next();
                            let mut hex = String::new();
                            for _ in 0..2 {
                                if let Some(c) = chars.next() {
                                    hex.push(c);
                                }
                            }
                            if let Ok(code) = u8::from_str_radix(&hex, 16) {
                                result.push(code as char);
                            }
                        }
                        _ => {
                            result.push('\\');
                            result.push('X');
                        }
                    }
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                Some('S') => {
                    chars.next(); // 'S'
                    chars.next(); // '\'
                    // Widen before shifting; the source char may already
                    // be outside ASCII in malformed files.
                    let shifted = chars
                        .next()
                        .and_then(|c| char::from_u32(c as u32 + 128));
                    if let Some(c) = shifted {
                        result.push(c);
                    }
                }
                _ => result.push('\\'),
            }
        } else if ch == '\'' {
            // '' is an escaped apostrophe in STEP
            if chars.peek() == Some(&'\'') {
                chars.next();
            }
            result.push('\'');
        } else {
            result.push(ch);
        }
    }

    result
}
