//! Report reducers for the charting collaborator.
//!
//! Both reducers are pure: the same transactions (and, for the monthly view,
//! the same reference year) always produce the same buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use serde::Serialize;

use crate::{MoneyCents, ResultEngine, Transaction, TransactionKind};

const MONTH_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const WEEKDAY_LABELS: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

/// Income and expense totals for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub name: String,
    pub entrada: MoneyCents,
    pub saida: MoneyCents,
}

/// Income total for one day of the week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeekdaySummary {
    pub name: String,
    pub valor: MoneyCents,
}

#[derive(Clone, Copy, Debug, Default)]
struct MonthTotals {
    entradas: MoneyCents,
    saidas: MoneyCents,
}

fn month_label(year: i32, month: u32) -> String {
    let idx = month.saturating_sub(1) as usize;
    format!("{} {year}", MONTH_LABELS[idx % 12])
}

pub fn weekday_label(day: Weekday) -> &'static str {
    WEEKDAY_LABELS[day.num_days_from_sunday() as usize]
}

/// Buckets transactions by `(year, month)`.
///
/// The twelve months of `current_year` are always present, even when empty.
/// Months of other years only appear when a transaction falls in them. The
/// output is chronological. A bucket total that overflows is an error.
pub fn aggregate_by_month(
    transactions: &[Transaction],
    current_year: i32,
) -> ResultEngine<Vec<MonthlySummary>> {
    let mut buckets: BTreeMap<(i32, u32), MonthTotals> = (1..=12)
        .map(|month| ((current_year, month), MonthTotals::default()))
        .collect();

    for tx in transactions {
        let date = tx.data();
        let bucket = buckets.entry((date.year(), date.month())).or_default();
        match tx.kind() {
            TransactionKind::Income => bucket.entradas = bucket.entradas.try_add(tx.valor())?,
            TransactionKind::Expense => bucket.saidas = bucket.saidas.try_add(tx.valor())?,
        }
    }

    Ok(buckets
        .into_iter()
        .map(|((year, month), totals)| MonthlySummary {
            name: month_label(year, month),
            entrada: totals.entradas,
            saida: totals.saidas,
        })
        .collect())
}

/// Sums income per weekday, Sunday first. Expenses are not counted.
pub fn aggregate_by_weekday(
    transactions: &[Transaction],
) -> ResultEngine<Vec<WeekdaySummary>> {
    let mut totals = [MoneyCents::ZERO; 7];
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind() == TransactionKind::Income)
    {
        let slot = &mut totals[tx.data().weekday().num_days_from_sunday() as usize];
        *slot = slot.try_add(tx.valor())?;
    }

    Ok(WEEKDAY_LABELS
        .iter()
        .zip(totals)
        .map(|(name, valor)| WeekdaySummary {
            name: (*name).to_string(),
            valor,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::{NewTransaction, security::parse_date_time};

    use super::*;

    fn tx(id: &str, kind: TransactionKind, cents: i64, data: &str) -> Transaction {
        let new = NewTransaction::new(
            kind,
            MoneyCents::new(cents),
            parse_date_time(data).unwrap(),
            "Movimento",
            None,
            None,
            None,
        )
        .unwrap();
        Transaction::from_new(id.to_string(), new)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("1", TransactionKind::Income, 15000, "2024-03-05"),
            tx("2", TransactionKind::Expense, 4000, "2024-03-05"),
            tx("3", TransactionKind::Income, 2500, "2024-03-31T23:59"),
            tx("4", TransactionKind::Expense, 900, "2023-12-24"),
            tx("5", TransactionKind::Income, 10000, "2025-01-02"),
        ]
    }

    fn bucket<'a>(months: &'a [MonthlySummary], name: &str) -> &'a MonthlySummary {
        months.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn empty_input_still_has_full_current_year() {
        let months = aggregate_by_month(&[], 2024).unwrap();
        let names: Vec<&str> = months.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "jan 2024", "fev 2024", "mar 2024", "abr 2024", "mai 2024", "jun 2024",
                "jul 2024", "ago 2024", "set 2024", "out 2024", "nov 2024", "dez 2024",
            ]
        );
        assert!(
            months
                .iter()
                .all(|m| m.entrada == MoneyCents::ZERO && m.saida == MoneyCents::ZERO)
        );
    }

    #[test]
    fn folds_into_month_buckets() {
        let months = aggregate_by_month(&sample(), 2024).unwrap();
        let march = bucket(&months, "mar 2024");
        assert_eq!(march.entrada, MoneyCents::new(17500));
        assert_eq!(march.saida, MoneyCents::new(4000));
    }

    #[test]
    fn out_of_year_buckets_sort_chronologically() {
        let months = aggregate_by_month(&sample(), 2024).unwrap();
        assert_eq!(months.len(), 14);
        assert_eq!(months.first().unwrap().name, "dez 2023");
        assert_eq!(months[1].name, "jan 2024");
        assert_eq!(months.last().unwrap().name, "jan 2025");
        // "abr" sorts before "fev" lexically; the output must not.
        assert_eq!(months[2].name, "fev 2024");
    }

    #[test]
    fn totals_match_transaction_sums() {
        let txs = sample();
        let months = aggregate_by_month(&txs, 2024).unwrap();
        let entradas: i64 = months.iter().map(|m| m.entrada.cents()).sum();
        let saidas: i64 = months.iter().map(|m| m.saida.cents()).sum();
        let expected_entradas: i64 = txs
            .iter()
            .filter(|t| t.kind() == TransactionKind::Income)
            .map(|t| t.valor().cents())
            .sum();
        let expected_saidas: i64 = txs
            .iter()
            .filter(|t| t.kind() == TransactionKind::Expense)
            .map(|t| t.valor().cents())
            .sum();
        assert_eq!(entradas, expected_entradas);
        assert_eq!(saidas, expected_saidas);
    }

    #[test]
    fn reducers_are_idempotent() {
        let txs = sample();
        assert_eq!(aggregate_by_month(&txs, 2024), aggregate_by_month(&txs, 2024));
        assert_eq!(aggregate_by_weekday(&txs), aggregate_by_weekday(&txs));
    }

    #[test]
    fn weekday_counts_only_income() {
        let days = aggregate_by_weekday(&sample()).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].name, "domingo");
        // 2024-03-05 is a Tuesday: the 40.00 expense on that day is ignored.
        assert_eq!(days[2].name, "terça-feira");
        assert_eq!(days[2].valor, MoneyCents::new(15000));
        // 2024-03-31 is a Sunday, 2025-01-02 a Thursday.
        assert_eq!(days[0].valor, MoneyCents::new(2500));
        assert_eq!(days[4].valor, MoneyCents::new(10000));
        let total: i64 = days.iter().map(|d| d.valor.cents()).sum();
        assert_eq!(total, 27500);
    }

    #[test]
    fn weekday_ignores_expense_only_input() {
        let txs = vec![tx("1", TransactionKind::Expense, 5000, "2024-03-06")];
        assert!(
            aggregate_by_weekday(&txs)
                .unwrap()
                .iter()
                .all(|d| d.valor == MoneyCents::ZERO)
        );
    }

    #[test]
    fn bucket_overflow_is_an_error() {
        let huge = 9_000_000_000_000_000_000;
        let txs = vec![
            tx("1", TransactionKind::Income, huge, "2024-03-05"),
            tx("2", TransactionKind::Income, huge, "2024-03-12"),
        ];
        assert!(matches!(
            aggregate_by_month(&txs, 2024),
            Err(crate::EngineError::InvalidAmount(_))
        ));
        assert!(aggregate_by_weekday(&txs).is_err());

        // Same totals spread across months fit.
        let spread = vec![
            tx("1", TransactionKind::Income, huge, "2024-03-05"),
            tx("2", TransactionKind::Income, huge, "2024-04-02"),
        ];
        assert!(aggregate_by_month(&spread, 2024).is_ok());
    }

    #[test]
    fn weekday_label_is_pt_br() {
        assert_eq!(weekday_label(Weekday::Sat), "sábado");
    }
}
