//! The transaction form as typed by the user.

use crate::{
    EngineError, LedgerSettings, MoneyCents, NewTransaction, ResultEngine, TransactionKind,
    schedule::Recurrence,
    security::{parse_date_time, parse_decimal, sanitize_input},
    transactions::{DESCRICAO_MAX_LEN, DESCRICAO_MIN_LEN, OBSERVACAO_MAX_LEN},
    validation::{
        DateRules, NumberRules, TextRules, ValidationResult, validate_date_field,
        validate_form, validate_number_field, validate_text_field,
    },
};

/// Raw form input. Text fields hold exactly what was typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub tipo: TransactionKind,
    pub valor: String,
    pub data: String,
    pub descricao: String,
    pub categoria: String,
    pub observacao: String,
    pub recorrencia: Recurrence,
}

impl TransactionForm {
    /// Validates every field and reports the first failure.
    pub fn validate(&self, settings: &LedgerSettings) -> ValidationResult {
        let results = [
            validate_text_field(
                &self.descricao,
                "Descrição",
                &TextRules {
                    required: true,
                    min_length: Some(DESCRICAO_MIN_LEN),
                    max_length: Some(DESCRICAO_MAX_LEN),
                    ..Default::default()
                },
            ),
            validate_number_field(
                &self.valor,
                "Valor",
                &NumberRules {
                    required: true,
                    min: Some(settings.valor_min),
                    ..Default::default()
                },
            ),
            validate_date_field(
                self.data.as_str(),
                "Data",
                &DateRules {
                    required: true,
                    ..Default::default()
                },
            ),
            validate_text_field(
                &self.observacao,
                "Observação",
                &TextRules {
                    max_length: Some(OBSERVACAO_MAX_LEN),
                    ..Default::default()
                },
            ),
        ];
        validate_form(&results)
    }

    /// Converts a valid form into a transaction ready for the store.
    ///
    /// The payment method is taken from the note field.
    pub fn into_new_transaction(
        &self,
        settings: &LedgerSettings,
    ) -> ResultEngine<NewTransaction> {
        self.validate(settings).into_result()?;

        let valor = parse_decimal(&self.valor)
            .ok_or_else(|| EngineError::InvalidAmount(self.valor.clone()))
            .and_then(MoneyCents::from_decimal)?;
        let data = parse_date_time(&self.data)
            .ok_or_else(|| EngineError::InvalidDate(self.data.clone()))?;
        let descricao = sanitize_input(&self.descricao);
        let categoria = sanitize_input(&self.categoria);
        let categoria = if categoria.is_empty() {
            settings.default_category.as_str()
        } else {
            categoria.as_str()
        };
        let observacao = sanitize_input(&self.observacao);

        NewTransaction::new(
            self.tipo,
            valor,
            data,
            &descricao,
            Some(categoria),
            Some(&observacao),
            Some(&observacao),
        )
    }
}
