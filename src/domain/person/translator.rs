use lazy_static::lazy_static;
use std::collections::HashMap;

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const TOO_LONG: &str = "This value is too long. It should have {{ limit }} characters or less.";

type Catalog = HashMap<&'static str, &'static str>;

// Catalogs of the "validators" domain, keyed by locale then message template.
lazy_static! {
    static ref VALIDATORS_CATALOGS: HashMap<&'static str, Catalog> = {
        let mut catalogs = HashMap::new();
        catalogs.insert(
            "en",
            Catalog::from([(NOT_BLANK, NOT_BLANK), (TOO_LONG, TOO_LONG)]),
        );
        catalogs.insert(
            "fr",
            Catalog::from([
                (NOT_BLANK, "Cette valeur ne doit pas être vide."),
                (
                    TOO_LONG,
                    "Cette chaîne est trop longue. Elle doit avoir au maximum {{ limit }} caractères.",
                ),
            ]),
        );
        catalogs
    };
}

#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
}

impl Translator {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    /// Resolves a message template in the current locale and fills its placeholders.
    /// Templates missing from the catalog are used as is.
    pub fn trans(&self, template: &str, parameters: &[(&str, String)]) -> String {
        let message = VALIDATORS_CATALOGS
            .get(self.locale.as_str())
            .and_then(|catalog| catalog.get(template))
            .copied()
            .unwrap_or(template);
        parameters
            .iter()
            .fold(message.to_string(), |acc, (placeholder, value)| {
                acc.replace(placeholder, value)
            })
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::{Translator, NOT_BLANK, TOO_LONG};

    #[test]
    fn test_trans_substitutes_parameters() {
        let translator = Translator::new("en");
        assert_eq!(
            translator.trans(TOO_LONG, &[("{{ limit }}", "255".to_string())]),
            "This value is too long. It should have 255 characters or less."
        );
    }

    #[test]
    fn test_trans_uses_locale_catalog() {
        let translator = Translator::new("fr");
        assert_eq!(
            translator.trans(NOT_BLANK, &[]),
            "Cette valeur ne doit pas être vide."
        );
        assert_eq!(
            translator.trans(TOO_LONG, &[("{{ limit }}", "10".to_string())]),
            "Cette chaîne est trop longue. Elle doit avoir au maximum 10 caractères."
        );
    }

    #[test]
    fn test_trans_falls_back_to_template() {
        let translator = Translator::new("de");
        assert_eq!(translator.trans(NOT_BLANK, &[]), NOT_BLANK);
        let translator = Translator::new("fr");
        assert_eq!(
            translator.trans("Unknown {{ x }}", &[("{{ x }}", "y".to_string())]),
            "Unknown y"
        );
    }
}
