//! Transaction filters.
//!
//! Every active criterion becomes an independent [`Criterion`]; a transaction
//! is kept when all of them match. Blank text and missing bounds are no-ops.

use chrono::NaiveDateTime;

use crate::{MoneyCents, Transaction, util::normalize_match_key};

/// Filters for listing transactions.
///
/// `data_inicio` and `data_fim` are both inclusive and compare full
/// date-time values, not calendar days.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the description.
    pub descricao: String,
    pub data_inicio: Option<NaiveDateTime>,
    pub data_fim: Option<NaiveDateTime>,
    /// Case-insensitive exact category name.
    pub categoria: String,
    pub valor_min: Option<MoneyCents>,
    pub valor_max: Option<MoneyCents>,
    /// Kept with the rest of the filter form state but never applied.
    pub observacao: String,
}

/// A single filter predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Criterion {
    DescriptionContains(String),
    CategoryIs(String),
    NotBefore(NaiveDateTime),
    NotAfter(NaiveDateTime),
    ValueAtLeast(MoneyCents),
    ValueAtMost(MoneyCents),
}

impl Criterion {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Self::DescriptionContains(needle) => {
                normalize_match_key(tx.descricao()).contains(needle.as_str())
            }
            Self::CategoryIs(categoria) => normalize_match_key(tx.categoria()) == *categoria,
            Self::NotBefore(inicio) => tx.data() >= *inicio,
            Self::NotAfter(fim) => tx.data() <= *fim,
            Self::ValueAtLeast(min) => tx.valor() >= *min,
            Self::ValueAtMost(max) => tx.valor() <= *max,
        }
    }
}

impl FilterCriteria {
    /// Decomposes the active criteria into predicates.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut out = Vec::new();
        let descricao = normalize_match_key(&self.descricao);
        if !descricao.is_empty() {
            out.push(Criterion::DescriptionContains(descricao));
        }
        if let Some(inicio) = self.data_inicio {
            out.push(Criterion::NotBefore(inicio));
        }
        if let Some(fim) = self.data_fim {
            out.push(Criterion::NotAfter(fim));
        }
        let categoria = normalize_match_key(&self.categoria);
        if !categoria.is_empty() {
            out.push(Criterion::CategoryIs(categoria));
        }
        if let Some(min) = self.valor_min {
            out.push(Criterion::ValueAtLeast(min));
        }
        if let Some(max) = self.valor_max {
            out.push(Criterion::ValueAtMost(max));
        }
        out
    }

    /// Returns `true` if no criterion would restrict the result.
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }
}

pub fn filter_transactions(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> Vec<Transaction> {
    let predicates = criteria.criteria();
    transactions
        .iter()
        .filter(|tx| predicates.iter().all(|c| c.matches(tx)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{NewTransaction, TransactionKind, security::parse_date_time};

    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_date_time(s).unwrap()
    }

    fn tx(id: &str, descricao: &str, categoria: &str, cents: i64, data: &str) -> Transaction {
        let new = NewTransaction::new(
            TransactionKind::Expense,
            MoneyCents::new(cents),
            at(data),
            descricao,
            Some(categoria),
            None,
            None,
        )
        .unwrap();
        Transaction::from_new(id.to_string(), new)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("1", "Compra gelo", "Compras", 4000, "2024-03-05T09:00"),
            tx("2", "Conta de luz", "Pagamentos", 18000, "2024-03-10"),
            tx("3", "Compra farinha", "compras", 12000, "2024-04-01T18:30"),
            tx("4", "Salário Ana", "Salário", 150000, "2024-04-05"),
        ]
    }

    fn ids(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(Transaction::id).collect()
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let txs = sample();
        let criteria = FilterCriteria {
            descricao: "  ".to_string(),
            observacao: "ignored".to_string(),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(filter_transactions(&txs, &criteria), txs);
    }

    #[test]
    fn description_is_case_insensitive_substring() {
        let criteria = FilterCriteria {
            descricao: "COMPRA".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&sample(), &criteria)), ["1", "3"]);
    }

    #[test]
    fn category_is_case_insensitive_exact() {
        let criteria = FilterCriteria {
            categoria: "COMPRAS".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&sample(), &criteria)), ["1", "3"]);
        let partial = FilterCriteria {
            categoria: "Compra".to_string(),
            ..Default::default()
        };
        assert!(filter_transactions(&sample(), &partial).is_empty());
    }

    #[test]
    fn date_bounds_compare_time_of_day() {
        let criteria = FilterCriteria {
            data_inicio: Some(at("2024-03-05T10:00")),
            data_fim: Some(at("2024-04-01")),
            ..Default::default()
        };
        // "1" is at 09:00 on the start day, "3" at 18:30 on the end day.
        assert_eq!(ids(&filter_transactions(&sample(), &criteria)), ["2"]);
    }

    #[test]
    fn value_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            valor_min: Some(MoneyCents::new(12000)),
            valor_max: Some(MoneyCents::new(18000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&sample(), &criteria)), ["2", "3"]);
    }

    #[test]
    fn inverted_value_range_yields_nothing() {
        let criteria = FilterCriteria {
            valor_min: Some(MoneyCents::new(10000)),
            valor_max: Some(MoneyCents::new(5000)),
            ..Default::default()
        };
        assert!(filter_transactions(&sample(), &criteria).is_empty());
    }

    #[test]
    fn observacao_criterion_is_not_applied() {
        let criteria = FilterCriteria {
            observacao: "nada".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&sample(), &criteria).len(), 4);
    }

    #[test]
    fn predicate_order_does_not_matter() {
        let txs = sample();
        let criteria = FilterCriteria {
            descricao: "compra".to_string(),
            categoria: "compras".to_string(),
            data_inicio: Some(at("2024-03-01")),
            valor_max: Some(MoneyCents::new(15000)),
            ..Default::default()
        };
        let combined = filter_transactions(&txs, &criteria);

        let forward = criteria
            .criteria()
            .iter()
            .fold(txs.clone(), |acc, c| {
                acc.into_iter().filter(|tx| c.matches(tx)).collect()
            });
        let backward = criteria
            .criteria()
            .iter()
            .rev()
            .fold(txs.clone(), |acc, c| {
                acc.into_iter().filter(|tx| c.matches(tx)).collect()
            });

        assert_eq!(combined, forward);
        assert_eq!(combined, backward);
        assert_eq!(ids(&combined), ["1", "3"]);
    }
}
