//! Display strings used by the grid.

use serde::Deserialize;
use serde::Serialize;

/// Localisable strings the grid writes into its view.
///
/// `{current}` and `{total}` are substituted in [`Labels::page_info`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub yes: String,
    pub no: String,
    pub currency_symbol: String,
    pub loading: String,
    pub no_data: String,
    pub item_singular: String,
    pub item_plural: String,
    pub page_info: String,
    pub actions_header: String,
    pub add_button: String,
    pub search_placeholder: String,
    pub rows_option: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            yes: "Yes".to_string(),
            no: "No".to_string(),
            currency_symbol: "€".to_string(),
            loading: "Loading data...".to_string(),
            no_data: "No data found".to_string(),
            item_singular: "item".to_string(),
            item_plural: "items".to_string(),
            page_info: "Page {current} of {total}".to_string(),
            actions_header: "Actions".to_string(),
            add_button: "Add".to_string(),
            search_placeholder: "Search...".to_string(),
            rows_option: "rows".to_string(),
        }
    }
}

impl Labels {
    /// The wording of the French storefront back office.
    pub fn french() -> Self {
        Self {
            yes: "Oui".to_string(),
            no: "Non".to_string(),
            currency_symbol: "€".to_string(),
            loading: "Chargement des données...".to_string(),
            no_data: "Aucune donnée trouvée".to_string(),
            item_singular: "élément".to_string(),
            item_plural: "éléments".to_string(),
            page_info: "Page {current} sur {total}".to_string(),
            actions_header: "Actions".to_string(),
            add_button: "Ajouter".to_string(),
            search_placeholder: "Rechercher...".to_string(),
            rows_option: "lignes".to_string(),
        }
    }

    /// Formats the boolean word.
    pub fn boolean(&self, value: bool) -> &str {
        if value { &self.yes } else { &self.no }
    }

    /// Formats a count like "1 item" / "3 items".
    pub fn item_count(&self, count: usize) -> String {
        let noun = if count == 1 {
            &self.item_singular
        } else {
            &self.item_plural
        };
        format!("{} {}", count, noun)
    }

    /// Formats the page position text.
    pub fn page_info(&self, current: usize, total: usize) -> String {
        self.page_info
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }

    /// Formats an amount with two decimals behind the currency symbol.
    pub fn currency(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count_plural() {
        let labels = Labels::default();
        assert_eq!(labels.item_count(0), "0 items");
        assert_eq!(labels.item_count(1), "1 item");
        assert_eq!(Labels::french().item_count(2), "2 éléments");
    }

    #[test]
    fn test_page_info() {
        assert_eq!(Labels::default().page_info(2, 3), "Page 2 of 3");
        assert_eq!(Labels::french().page_info(1, 1), "Page 1 sur 1");
    }

    #[test]
    fn test_currency() {
        let labels = Labels::default();
        assert_eq!(labels.currency(10.0), "€10.00");
        assert_eq!(labels.currency(19.999), "€20.00");
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let labels: Labels = serde_json::from_str(r#"{"yes":"Ja"}"#).unwrap();
        assert_eq!(labels.yes, "Ja");
        assert_eq!(labels.no, "No");
    }
}
