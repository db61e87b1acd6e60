//! Cash ledger engine for a small business.
//!
//! Transactions are recorded through [`Ledger::submit`], which validates the
//! form, persists through a [`LedgerStore`] and, for recurring expenses,
//! schedules a payment. Reports are derived on demand from the stored
//! transactions. Deletions go through a confirmation step.

pub use access::{PermissionGate, Role, StaticPermissions, WRITE_SCOPE};
pub use aggregation::{
    MonthlySummary, WeekdaySummary, aggregate_by_month, aggregate_by_weekday, weekday_label,
};
pub use confirmation::{ConfirmationState, ConfirmationWorkflow, PendingConfirmation};
pub use error::EngineError;
pub use filters::{Criterion, FilterCriteria, filter_transactions};
pub use form::TransactionForm;
pub use ledger::{Ledger, LedgerAction, LedgerBuilder, LedgerView, SubmitReceipt};
pub use money::MoneyCents;
pub use schedule::{Recurrence, Schedule, ScheduleSummary, ScheduledPayment};
pub use settings::LedgerSettings;
pub use store::{InMemoryStore, LedgerStore};
pub use transactions::{Balance, NewTransaction, Transaction, TransactionKind};
pub use validation::{
    DateInput, DateRules, NumberRules, TextRules, ValidationResult, validate_date_field,
    validate_form, validate_number_field, validate_text_field,
};

pub mod access;
pub mod aggregation;
pub mod confirmation;
mod error;
pub mod filters;
pub mod form;
mod ledger;
mod money;
pub mod schedule;
pub mod security;
pub mod settings;
pub mod store;
pub mod transactions;
mod util;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
