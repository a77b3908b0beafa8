//! Record source configuration form.

use crate::source::Credentials;

const MAX_FIELD_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigField {
    #[default]
    BaseId,
    Table,
    Token,
}

impl ConfigField {
    pub const ALL: [ConfigField; 3] = [Self::BaseId, Self::Table, Self::Token];

    pub fn label(self) -> &'static str {
        match self {
            Self::BaseId => "Base ID",
            Self::Table => "Table name or ID",
            Self::Token => "API token",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::BaseId => "appXXXXXXXXXXXXXX",
            Self::Table => "Questions",
            Self::Token => "patXXXXXXXXXXXXXX",
        }
    }

    /// Whether the value is masked on screen.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Token)
    }

    fn next(self) -> Self {
        match self {
            Self::BaseId => Self::Table,
            Self::Table => Self::Token,
            Self::Token => Self::BaseId,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::BaseId => Self::Token,
            Self::Table => Self::BaseId,
            Self::Token => Self::Table,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    base_id: String,
    table_id: String,
    token: String,
    focus: ConfigField,
}

impl ConfigForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> ConfigField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::BaseId => &self.base_id,
            ConfigField::Table => &self.table_id,
            ConfigField::Token => &self.token,
        }
    }

    fn value_mut(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::BaseId => &mut self.base_id,
            ConfigField::Table => &mut self.table_id,
            ConfigField::Token => &mut self.token,
        }
    }

    pub fn push(&mut self, c: char) {
        let value = self.value_mut(self.focus);
        if value.chars().count() < MAX_FIELD_LENGTH {
            value.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.value_mut(self.focus).pop();
    }

    pub fn is_complete(&self) -> bool {
        ConfigField::ALL
            .iter()
            .all(|field| !self.value(*field).trim().is_empty())
    }

    /// Builds credentials from the form, or `None` if a field is blank.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::new(&self.token, &self.base_id, &self.table_id).ok()
    }

    pub fn clear_token(&mut self) {
        self.token.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut ConfigForm, text: &str) {
        for c in text.chars() {
            form.push(c);
        }
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = ConfigForm::new();
        assert_eq!(form.focus(), ConfigField::BaseId);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), ConfigField::Token);
        form.focus_next();
        assert_eq!(form.focus(), ConfigField::BaseId);
        form.focus_previous();
        assert_eq!(form.focus(), ConfigField::Token);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut form = ConfigForm::new();
        fill(&mut form, "app1x");
        form.pop();
        form.focus_next();
        fill(&mut form, "Questions");

        assert_eq!(form.value(ConfigField::BaseId), "app1");
        assert_eq!(form.value(ConfigField::Table), "Questions");
        assert_eq!(form.value(ConfigField::Token), "");
        assert!(!form.is_complete());
        assert!(form.credentials().is_none());
    }

    #[test]
    fn test_complete_form_builds_credentials() {
        let mut form = ConfigForm::new();
        fill(&mut form, "app1");
        form.focus_next();
        fill(&mut form, "Questions");
        form.focus_next();
        fill(&mut form, "pat");

        let credentials = form.credentials().unwrap();
        assert_eq!(credentials.base_id, "app1");
        assert_eq!(credentials.table_id, "Questions");
        assert_eq!(credentials.token, "pat");

        form.clear_token();
        assert_eq!(form.value(ConfigField::Token), "");
        assert_eq!(form.value(ConfigField::BaseId), "app1");
    }

    #[test]
    fn test_field_length_is_capped() {
        let mut form = ConfigForm::new();
        fill(&mut form, &"x".repeat(MAX_FIELD_LENGTH + 10));
        assert_eq!(form.value(ConfigField::BaseId).len(), MAX_FIELD_LENGTH);
    }
}
