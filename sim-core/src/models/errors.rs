use std::collections::BTreeMap;
use std::fmt;

use super::FieldName;

/// Who owns an error message: one field, or the submission as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorTarget {
    Field(FieldName),
    Submit,
}

impl ErrorTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field(field) => field.as_str(),
            Self::Submit => "submit",
        }
    }
}

/// Validation messages keyed by their owner, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<ErrorTarget, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field`, replacing any earlier message.
    pub fn insert(
        &mut self,
        field: FieldName,
        message: impl Into<String>,
    ) {
        self.entries
            .insert(ErrorTarget::Field(field), message.into());
    }

    pub fn insert_submit(
        &mut self,
        message: impl Into<String>,
    ) {
        self.entries.insert(ErrorTarget::Submit, message.into());
    }

    pub fn get(
        &self,
        field: FieldName,
    ) -> Option<&str> {
        self.entries
            .get(&ErrorTarget::Field(field))
            .map(String::as_str)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.entries.get(&ErrorTarget::Submit).map(String::as_str)
    }

    pub fn contains(
        &self,
        field: FieldName,
    ) -> bool {
        self.entries.contains_key(&ErrorTarget::Field(field))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fields that carry at least one error.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.entries.keys().filter_map(|target| match target {
            ErrorTarget::Field(field) => Some(*field),
            ErrorTarget::Submit => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorTarget, &str)> + '_ {
        self.entries
            .iter()
            .map(|(target, message)| (*target, message.as_str()))
    }

    /// Merges `other` into `self`; messages from `other` win on conflicts.
    pub fn extend(
        &mut self,
        other: FormErrors,
    ) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for (target, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", target.as_str())?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn later_messages_replace_earlier_ones_for_the_same_field() {
        let mut errors = FormErrors::new();
        errors.insert(FieldName::Plan, "first");
        errors.insert(FieldName::Plan, "second");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FieldName::Plan), Some("second"));
    }

    #[test]
    fn submit_errors_are_not_field_errors() {
        let mut errors = FormErrors::new();
        errors.insert_submit("boom");
        errors.insert(FieldName::Email, "bad");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldName::Email]);
        assert_eq!(errors.submit_error(), Some("boom"));
    }

    #[test]
    fn display_lists_entries_in_field_order() {
        let mut errors = FormErrors::new();
        errors.insert(FieldName::Email, "bad email");
        errors.insert(FieldName::PostalCode, "bad code");

        assert_eq!(
            errors.to_string(),
            "postalCode: bad code; email: bad email"
        );
    }
}
