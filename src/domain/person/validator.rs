use std::collections::BTreeMap;

use super::{
    person::Person,
    translator::{Translator, NOT_BLANK, TOO_LONG},
};

/// Field name to the ordered messages of every constraint it violates.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, PartialEq)]
pub struct Violation {
    property_path: &'static str,
    message_template: &'static str,
    parameters: Vec<(&'static str, String)>,
}

impl Violation {
    pub fn property_path(&self) -> &'static str {
        self.property_path
    }
    pub fn message_template(&self) -> &'static str {
        self.message_template
    }
    pub fn parameters(&self) -> &[(&'static str, String)] {
        &self.parameters
    }
}

fn check_name(property_path: &'static str, value: &str, violations: &mut Vec<Violation>) {
    if value.is_empty() {
        violations.push(Violation {
            property_path,
            message_template: NOT_BLANK,
            parameters: vec![],
        });
    }
    if value.chars().count() > NAME_MAX_LENGTH {
        violations.push(Violation {
            property_path,
            message_template: TOO_LONG,
            parameters: vec![("{{ limit }}", NAME_MAX_LENGTH.to_string())],
        });
    }
}

/// Lists the constraint violations of a person, in field declaration order.
pub fn violations(person: &Person) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_name("firstname", person.firstname(), &mut violations);
    check_name("lastname", person.lastname(), &mut violations);
    violations
}

#[derive(Debug, Clone, Default)]
pub struct PersonValidator {
    translator: Translator,
}

impl PersonValidator {
    pub fn new(translator: Translator) -> Self {
        Self { translator }
    }

    /// An empty map means the person is valid.
    pub fn validate(&self, person: &Person) -> FieldErrors {
        violations(person)
            .into_iter()
            .fold(FieldErrors::new(), |mut errors, violation| {
                let message = self
                    .translator
                    .trans(violation.message_template(), violation.parameters());
                errors
                    .entry(violation.property_path().to_string())
                    .or_default()
                    .push(message);
                errors
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{violations, PersonValidator, NAME_MAX_LENGTH};
    use crate::domain::person::{translator::Translator, Person};

    #[test]
    fn test_valid_person_has_no_errors() {
        let validator = PersonValidator::default();
        assert!(validator.validate(&Person::new("Ada", "Lovelace")).is_empty());
    }

    #[test]
    fn test_blank_fields_are_reported_per_field() {
        let validator = PersonValidator::default();
        let errors = validator.validate(&Person::new("", ""));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("firstname"),
            Some(&vec!["This value should not be blank.".to_string()])
        );
        assert_eq!(
            errors.get("lastname"),
            Some(&vec!["This value should not be blank.".to_string()])
        );
    }

    #[test]
    fn test_too_long_name_reports_limit() {
        let validator = PersonValidator::default();
        let long = "é".repeat(NAME_MAX_LENGTH + 1);
        let errors = validator.validate(&Person::new("Ada", &long));
        assert_eq!(errors.get("firstname"), None);
        assert_eq!(
            errors.get("lastname"),
            Some(&vec![
                "This value is too long. It should have 255 characters or less.".to_string()
            ])
        );
        // Length is counted in characters, not bytes.
        let at_limit = "é".repeat(NAME_MAX_LENGTH);
        assert!(validator.validate(&Person::new(&at_limit, "x")).is_empty());
    }

    #[test]
    fn test_violations_keep_field_order() {
        let paths: Vec<&str> = violations(&Person::new("", ""))
            .iter()
            .map(|v| v.property_path())
            .collect();
        assert_eq!(paths, vec!["firstname", "lastname"]);
    }

    #[test]
    fn test_messages_are_translated() {
        let validator = PersonValidator::new(Translator::new("fr"));
        let errors = validator.validate(&Person::new("", "Lovelace"));
        assert_eq!(
            errors.get("firstname"),
            Some(&vec!["Cette valeur ne doit pas être vide.".to_string()])
        );
    }
}
