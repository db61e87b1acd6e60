//! Transaction primitives.
//!
//! A `Transaction` is an immutable ledger record: an income (`entrada`) adds
//! its value to the balance, an expense (`saida`) subtracts it. Edits are
//! modeled as a new submission, never as in-place mutation.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{EngineError, MoneyCents, ResultEngine, util::normalize_optional_text};

/// Category assigned when the form leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Sem categoria";
pub const DESCRICAO_MIN_LEN: usize = 3;
pub const DESCRICAO_MAX_LEN: usize = 100;
pub const OBSERVACAO_MAX_LEN: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionKind {
    #[default]
    #[serde(rename = "entrada")]
    Income,
    #[serde(rename = "saida")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "entrada",
            Self::Expense => "saida",
        }
    }

    /// Applies the balance sign of this kind to a (positive) value.
    pub fn signed(self, valor: MoneyCents) -> MoneyCents {
        match self {
            Self::Income => valor,
            Self::Expense => -valor,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "entrada" => Ok(Self::Income),
            "saida" | "saída" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// A validated transaction that has not been persisted yet.
///
/// Construction enforces `valor > 0` and a description between
/// [`DESCRICAO_MIN_LEN`] and [`DESCRICAO_MAX_LEN`] characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    kind: TransactionKind,
    valor: MoneyCents,
    data: NaiveDateTime,
    descricao: String,
    categoria: String,
    observacao: Option<String>,
    metodo_pagamento: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        valor: MoneyCents,
        data: NaiveDateTime,
        descricao: &str,
        categoria: Option<&str>,
        observacao: Option<&str>,
        metodo_pagamento: Option<&str>,
    ) -> ResultEngine<Self> {
        if !valor.is_positive() {
            return Err(EngineError::InvalidAmount("valor must be > 0".to_string()));
        }
        let descricao = descricao.trim();
        let len = descricao.chars().count();
        if !(DESCRICAO_MIN_LEN..=DESCRICAO_MAX_LEN).contains(&len) {
            return Err(EngineError::Validation(format!(
                "descricao must be between {DESCRICAO_MIN_LEN} and {DESCRICAO_MAX_LEN} characters"
            )));
        }
        let observacao = normalize_optional_text(observacao);
        if observacao
            .as_ref()
            .is_some_and(|o| o.chars().count() > OBSERVACAO_MAX_LEN)
        {
            return Err(EngineError::Validation(format!(
                "observacao must be at most {OBSERVACAO_MAX_LEN} characters"
            )));
        }

        Ok(Self {
            kind,
            valor,
            data,
            descricao: descricao.to_string(),
            categoria: normalize_optional_text(categoria)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            observacao,
            metodo_pagamento: normalize_optional_text(metodo_pagamento),
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn valor(&self) -> MoneyCents {
        self.valor
    }

    pub fn data(&self) -> NaiveDateTime {
        self.data
    }
}

/// A transaction accepted by a ledger store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: String,
    #[serde(rename = "tipo")]
    kind: TransactionKind,
    valor: MoneyCents,
    data: NaiveDateTime,
    descricao: String,
    categoria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    observacao: Option<String>,
    #[serde(rename = "metodoPagamento", skip_serializing_if = "Option::is_none")]
    metodo_pagamento: Option<String>,
}

impl Transaction {
    /// Binds a store-generated id to a validated transaction.
    pub fn from_new(id: String, new: NewTransaction) -> Self {
        Self {
            id,
            kind: new.kind,
            valor: new.valor,
            data: new.data,
            descricao: new.descricao,
            categoria: new.categoria,
            observacao: new.observacao,
            metodo_pagamento: new.metodo_pagamento,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn valor(&self) -> MoneyCents {
        self.valor
    }

    /// Value with the balance sign applied.
    pub fn signed_valor(&self) -> MoneyCents {
        self.kind.signed(self.valor)
    }

    pub fn data(&self) -> NaiveDateTime {
        self.data
    }

    pub fn descricao(&self) -> &str {
        &self.descricao
    }

    pub fn categoria(&self) -> &str {
        &self.categoria
    }

    pub fn observacao(&self) -> Option<&str> {
        self.observacao.as_deref()
    }

    pub fn metodo_pagamento(&self) -> Option<&str> {
        self.metodo_pagamento.as_deref()
    }
}

/// Balance derived from a transaction collection. Never stored on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    #[serde(rename = "saldoAtual")]
    pub saldo_atual: MoneyCents,
    #[serde(rename = "totalEntradas")]
    pub total_entradas: MoneyCents,
    #[serde(rename = "totalSaidas")]
    pub total_saidas: MoneyCents,
}

impl Balance {
    /// Sums the collection. Fails with [`EngineError::InvalidAmount`] if a
    /// total does not fit in [`MoneyCents`].
    pub fn from_transactions(transactions: &[Transaction]) -> ResultEngine<Self> {
        let mut balance = Self::default();
        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => {
                    balance.total_entradas = balance.total_entradas.try_add(tx.valor)?;
                }
                TransactionKind::Expense => {
                    balance.total_saidas = balance.total_saidas.try_add(tx.valor)?;
                }
            }
            balance.saldo_atual = balance.saldo_atual.try_add(tx.signed_valor())?;
        }
        Ok(balance)
    }
}
