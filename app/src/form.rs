//! Declarative form engine.
//!
//! A `Form` is a titled list of fields plus an optional call-to-action.
//! Validity is a pure function of the field values: every field that is
//! required and not read-only must hold a truthy value.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Input(InputType),
    Select(Vec<SelectOption>),
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Checked(checked) => *checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    pub value: FieldValue,
}

impl Field {
    pub fn input(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Input(input_type),
            required: false,
            read_only: false,
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::input(name, InputType::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::input(name, InputType::Password)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::input(name, InputType::Email)
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Select(options),
            required: false,
            read_only: false,
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Checkbox,
            required: false,
            read_only: false,
            value: FieldValue::Checked(false),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        self.value = FieldValue::Text(value.into());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.value = FieldValue::Checked(checked);
        self
    }

    pub fn label(&self) -> String {
        if self.required {
            format!("{} *", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Required, editable fields must hold a truthy value.
    pub fn is_satisfied(&self) -> bool {
        !self.required || self.read_only || self.value.is_truthy()
    }
}

pub const DEFAULT_REQUIRED_MESSAGE: &str = "* Required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub fields: Vec<Field>,
    pub cta: Option<String>,
    pub required_message: String,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            cta: None,
            required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn cta(mut self, name: impl Into<String>) -> Self {
        self.cta = Some(name.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_satisfied)
    }

    pub fn submit_disabled(&self) -> bool {
        !self.is_valid()
    }

    pub fn has_required(&self) -> bool {
        self.fields.iter().any(|f| f.required)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Sets a text value; returns false for unknown or read-only fields.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) if !field.read_only && field.kind != FieldKind::Checkbox => {
                field.value = FieldValue::Text(value.into());
                true
            }
            _ => false,
        }
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) if !field.read_only && field.kind == FieldKind::Checkbox => {
                field.value = FieldValue::Checked(checked);
                true
            }
            _ => false,
        }
    }

    /// Text value of a field, empty for unknown or checkbox fields.
    pub fn text(&self, name: &str) -> &str {
        match self.get(name).map(|f| &f.value) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn checked(&self, name: &str) -> bool {
        matches!(
            self.get(name).map(|f| &f.value),
            Some(FieldValue::Checked(true))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_form() -> Form {
        Form::new("Login")
            .field(Field::text("Username").required())
            .field(Field::password("Password").required())
            .field(Field::checkbox("Remember"))
            .cta("Login")
    }

    #[test]
    fn empty_required_fields_disable_submit() {
        let mut form = login_form();
        assert!(form.submit_disabled());

        form.set_text("Username", "jane");
        assert!(!form.is_valid());

        form.set_text("Password", "secret");
        assert!(form.is_valid());
        assert!(!form.submit_disabled());

        form.set_text("Username", "");
        assert!(form.submit_disabled());
    }

    #[test]
    fn optional_fields_do_not_affect_validity() {
        let mut form = login_form();
        form.set_text("Username", "jane");
        form.set_text("Password", "secret");
        form.set_checked("Remember", false);
        assert!(form.is_valid());
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let mut form = Form::new("Terms").field(Field::checkbox("Accept").required());
        assert!(!form.is_valid());
        form.set_checked("Accept", true);
        assert!(form.is_valid());
    }

    #[test]
    fn read_only_fields_are_exempt() {
        let form = Form::new("Profile").field(Field::text("First Name").required().read_only());
        assert!(form.is_valid());
    }

    #[test]
    fn read_only_fields_reject_edits() {
        let mut form = Form::new("Profile")
            .field(Field::text("Email").read_only().with_text("jane@example.com"));
        assert!(!form.set_text("Email", "x"));
        assert_eq!(form.text("Email"), "jane@example.com");
    }

    #[test]
    fn labels_mark_required_fields() {
        let form = login_form();
        assert_eq!(form.fields[0].label(), "Username *");
        assert_eq!(form.fields[2].label(), "Remember");
        assert_eq!(form.required_message, "* Required");
    }
}
