//! Scheduled payments ("pagamentos programados").
//!
//! A scheduled payment is derived from a recurring expense at submission
//! time. The [`Schedule`] keeps its payments ordered by due date after every
//! insert and removal. Only one payment is created per submission: later
//! occurrences implied by the recurrence are entered by hand.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, MoneyCents, ResultEngine, Transaction, TransactionKind,
    security::generate_secure_id,
};

const PAYMENT_ID_PREFIX: &str = "pag";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Nenhuma,
    Quinzenal,
    Mensal,
    Trimestral,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nenhuma => "nenhuma",
            Self::Quinzenal => "quinzenal",
            Self::Mensal => "mensal",
            Self::Trimestral => "trimestral",
        }
    }

    pub fn is_recurring(self) -> bool {
        self != Self::Nenhuma
    }
}

impl TryFrom<&str> for Recurrence {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "" | "nenhuma" => Ok(Self::Nenhuma),
            "quinzenal" => Ok(Self::Quinzenal),
            "mensal" => Ok(Self::Mensal),
            "trimestral" => Ok(Self::Trimestral),
            other => Err(EngineError::InvalidKind(format!(
                "invalid recurrence: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduledPayment {
    pub id: String,
    pub descricao: String,
    pub valor: MoneyCents,
    #[serde(rename = "dataVencimento")]
    pub data_vencimento: NaiveDateTime,
    pub pago: bool,
    pub recorrencia: Recurrence,
}

/// Totals shown next to the schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    /// Sum of unpaid payments.
    pub pendente: MoneyCents,
    /// Sum of paid payments.
    pub pago: MoneyCents,
    /// Unpaid payments due before the reference day.
    pub vencidos: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    payments: Vec<ScheduledPayment>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the scheduled payment for an accepted transaction.
    ///
    /// Returns `None` for income and for expenses without recurrence.
    pub fn plan(tx: &Transaction, recorrencia: Recurrence) -> Option<ScheduledPayment> {
        if tx.kind() != TransactionKind::Expense || !recorrencia.is_recurring() {
            return None;
        }
        Some(ScheduledPayment {
            id: generate_secure_id(PAYMENT_ID_PREFIX),
            descricao: tx.descricao().to_string(),
            valor: tx.valor(),
            data_vencimento: tx.data(),
            pago: false,
            recorrencia,
        })
    }

    /// Inserts a payment after any payment due at the same instant.
    pub fn insert(&mut self, payment: ScheduledPayment) {
        let idx = self
            .payments
            .partition_point(|p| p.data_vencimento <= payment.data_vencimento);
        self.payments.insert(idx, payment);
    }

    pub fn toggle_paid(&mut self, id: &str) -> ResultEngine<&ScheduledPayment> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        payment.pago = !payment.pago;
        Ok(payment)
    }

    /// Removal is reserved to the confirmation flow.
    pub(crate) fn remove(&mut self, id: &str) -> ResultEngine<ScheduledPayment> {
        let idx = self
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        Ok(self.payments.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&ScheduledPayment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn payments(&self) -> &[ScheduledPayment] {
        &self.payments
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn overdue(&self, today: NaiveDate) -> Vec<&ScheduledPayment> {
        self.payments
            .iter()
            .filter(|p| !p.pago && p.data_vencimento.date() < today)
            .collect()
    }

    /// Totals by paid state. Fails if a total overflows.
    pub fn summary(&self, today: NaiveDate) -> ResultEngine<ScheduleSummary> {
        let mut summary = ScheduleSummary::default();
        for p in &self.payments {
            if p.pago {
                summary.pago = summary.pago.try_add(p.valor)?;
            } else {
                summary.pendente = summary.pendente.try_add(p.valor)?;
                if p.data_vencimento.date() < today {
                    summary.vencidos += 1;
                }
            }
        }
        Ok(summary)
    }
}
