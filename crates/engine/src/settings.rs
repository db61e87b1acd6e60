//! Ledger settings.
//!
//! Settings are read from an optional TOML file and from `CAIXA_*`
//! environment variables, which take precedence. Missing keys keep their
//! defaults.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{ResultEngine, access::WRITE_SCOPE, transactions::DEFAULT_CATEGORY};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// Category stored when the form leaves it blank.
    pub default_category: String,
    /// Categories offered for expenses.
    pub expense_categories: Vec<String>,
    /// Smallest accepted transaction value.
    pub valor_min: f64,
    /// Scope checked before any mutation.
    pub write_scope: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            expense_categories: vec![
                "Salário".to_string(),
                "Compras".to_string(),
                "Pagamentos".to_string(),
            ],
            valor_min: 0.01,
            write_scope: WRITE_SCOPE.to_string(),
        }
    }
}

impl LedgerSettings {
    /// Loads settings from `path` (if it exists) and the environment.
    pub fn load(path: &str) -> ResultEngine<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CAIXA")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("expense_categories"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
