//! The ledger facade.
//!
//! `Ledger` wires a submitted form through validation, the store and the
//! schedule, and derives the filtered and aggregated views from the store.
//! Every mutation passes the permission gate first. Deletions only run
//! through the confirmation workflow.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    Balance, EngineError, LedgerSettings, ResultEngine, Transaction,
    access::{PermissionGate, StaticPermissions},
    aggregation::{MonthlySummary, WeekdaySummary, aggregate_by_month, aggregate_by_weekday},
    confirmation::{ConfirmationWorkflow, PendingConfirmation},
    filters::{FilterCriteria, filter_transactions},
    form::TransactionForm,
    schedule::{Schedule, ScheduleSummary, ScheduledPayment},
    store::LedgerStore,
};

/// A destructive action waiting for confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerAction {
    DeleteTransaction(String),
    DeleteScheduledPayment(String),
}

/// What a successful submission committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    pub transaction: Transaction,
    pub scheduled: Option<ScheduledPayment>,
}

/// Everything the finance screen renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
    pub monthly: Vec<MonthlySummary>,
    pub weekday: Vec<WeekdaySummary>,
    pub scheduled: Vec<ScheduledPayment>,
    pub schedule_summary: ScheduleSummary,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> ResultEngine<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(EngineError::SubmitInProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn operational(err: EngineError) -> EngineError {
    tracing::error!(error = %err, "ledger store failure");
    match err {
        EngineError::Store(_) => err,
        other => EngineError::Store(other.to_string()),
    }
}

pub struct Ledger<S> {
    store: S,
    permissions: Box<dyn PermissionGate>,
    settings: LedgerSettings,
    schedule: Mutex<Schedule>,
    confirmation: Mutex<ConfirmationWorkflow<LedgerAction>>,
    submitting: AtomicBool,
}

impl<S: LedgerStore> Ledger<S> {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder(store: S) -> LedgerBuilder<S> {
        LedgerBuilder {
            store,
            permissions: Box::new(StaticPermissions::default()),
            settings: LedgerSettings::default(),
            schedule: Schedule::new(),
        }
    }

    fn require_write(&self) -> ResultEngine<()> {
        let scope = self.settings.write_scope.as_str();
        if !self.permissions.has_permission(scope) {
            tracing::warn!(scope, "permission denied");
            return Err(EngineError::PermissionDenied(scope.to_string()));
        }
        Ok(())
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Categories offered for expenses.
    pub fn expense_categories(&self) -> &[String] {
        &self.settings.expense_categories
    }

    /// Returns `true` while a submission is waiting on the store.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validates and records a transaction.
    ///
    /// A recurring expense also adds one scheduled payment, due on the
    /// transaction date. Nothing is recorded unless every step succeeds.
    pub async fn submit(&self, form: &TransactionForm) -> ResultEngine<SubmitReceipt> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        self.require_write()?;

        let new = form
            .into_new_transaction(&self.settings)
            .inspect_err(|err| tracing::warn!(error = %err, "transaction rejected"))?;
        let transaction = self
            .store
            .add_transaction(new)
            .await
            .map_err(operational)?;

        let scheduled = Schedule::plan(&transaction, form.recorrencia);
        if let Some(payment) = &scheduled {
            self.schedule.lock().await.insert(payment.clone());
            tracing::info!(
                payment_id = %payment.id,
                recorrencia = payment.recorrencia.as_str(),
                "scheduled payment created"
            );
        }

        tracing::info!(
            transaction_id = transaction.id(),
            tipo = transaction.kind().as_str(),
            valor = %transaction.valor(),
            "transaction recorded"
        );
        Ok(SubmitReceipt {
            transaction,
            scheduled,
        })
    }

    /// Stored transactions matching `criteria`, in store order.
    pub async fn transactions(&self, criteria: &FilterCriteria) -> ResultEngine<Vec<Transaction>> {
        let all = self.store.transactions().await.map_err(operational)?;
        let filtered = filter_transactions(&all, criteria);
        tracing::debug!(total = all.len(), kept = filtered.len(), "transactions filtered");
        Ok(filtered)
    }

    /// Balance over every stored transaction, regardless of filters.
    pub async fn balance(&self) -> ResultEngine<Balance> {
        self.store.balance().await.map_err(|err| match err {
            EngineError::InvalidAmount(_) => err,
            other => operational(other),
        })
    }

    pub async fn monthly_report(
        &self,
        criteria: &FilterCriteria,
        current_year: i32,
    ) -> ResultEngine<Vec<MonthlySummary>> {
        let transactions = self.transactions(criteria).await?;
        aggregate_by_month(&transactions, current_year)
    }

    pub async fn weekday_report(
        &self,
        criteria: &FilterCriteria,
    ) -> ResultEngine<Vec<WeekdaySummary>> {
        let transactions = self.transactions(criteria).await?;
        aggregate_by_weekday(&transactions)
    }

    /// Builds every view of the finance screen in one pass.
    pub async fn dashboard(
        &self,
        criteria: &FilterCriteria,
        today: NaiveDate,
    ) -> ResultEngine<LedgerView> {
        let transactions = self.transactions(criteria).await?;
        let balance = self.balance().await?;
        let (scheduled, schedule_summary) = {
            let schedule = self.schedule.lock().await;
            (schedule.payments().to_vec(), schedule.summary(today)?)
        };

        Ok(LedgerView {
            monthly: aggregate_by_month(&transactions, today.year())?,
            weekday: aggregate_by_weekday(&transactions)?,
            transactions,
            balance,
            scheduled,
            schedule_summary,
        })
    }

    pub async fn scheduled_payments(&self) -> Vec<ScheduledPayment> {
        self.schedule.lock().await.payments().to_vec()
    }

    pub async fn schedule_summary(&self, today: NaiveDate) -> ResultEngine<ScheduleSummary> {
        self.schedule.lock().await.summary(today)
    }

    /// Flips the paid flag of a scheduled payment.
    pub async fn toggle_paid(&self, id: &str) -> ResultEngine<ScheduledPayment> {
        self.require_write()?;
        let mut schedule = self.schedule.lock().await;
        let payment = schedule.toggle_paid(id)?.clone();
        tracing::info!(payment_id = id, pago = payment.pago, "scheduled payment updated");
        Ok(payment)
    }

    /// Asks for confirmation before deleting a transaction.
    pub async fn request_delete_transaction(&self, id: &str) -> ResultEngine<()> {
        let transactions = self.store.transactions().await.map_err(operational)?;
        let tx = transactions
            .iter()
            .find(|tx| tx.id() == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let mensagem = format!(
            "Deseja excluir a transação \"{}\"? Esta ação não pode ser desfeita.",
            tx.descricao()
        );
        self.confirmation.lock().await.request(
            "Excluir transação",
            mensagem,
            id,
            LedgerAction::DeleteTransaction(id.to_string()),
        );
        Ok(())
    }

    /// Asks for confirmation before deleting a scheduled payment.
    pub async fn request_delete_scheduled_payment(&self, id: &str) -> ResultEngine<()> {
        let mensagem = {
            let schedule = self.schedule.lock().await;
            let payment = schedule
                .get(id)
                .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
            format!(
                "Deseja excluir o pagamento programado \"{}\"? Esta ação não pode ser desfeita.",
                payment.descricao
            )
        };
        self.confirmation.lock().await.request(
            "Excluir pagamento programado",
            mensagem,
            id,
            LedgerAction::DeleteScheduledPayment(id.to_string()),
        );
        Ok(())
    }

    pub async fn pending_confirmation(&self) -> Option<PendingConfirmation<LedgerAction>> {
        self.confirmation.lock().await.pending().cloned()
    }

    /// Runs the pending action, if any, and returns it.
    ///
    /// A permission failure leaves the action pending. Once the permission
    /// check passes the workflow returns to idle, even if the store fails.
    pub async fn confirm(&self) -> ResultEngine<Option<LedgerAction>> {
        let mut confirmation = self.confirmation.lock().await;
        if confirmation.pending().is_none() {
            return Ok(None);
        }
        self.require_write()?;
        let Some(pending) = confirmation.confirm() else {
            return Ok(None);
        };
        drop(confirmation);

        match &pending.action {
            LedgerAction::DeleteTransaction(id) => {
                self.store
                    .remove_transaction(id)
                    .await
                    .map_err(operational)?;
                tracing::info!(transaction_id = %id, "transaction deleted");
            }
            LedgerAction::DeleteScheduledPayment(id) => {
                self.schedule.lock().await.remove(id)?;
                tracing::info!(payment_id = %id, "scheduled payment deleted");
            }
        }
        Ok(Some(pending.action))
    }

    /// Discards the pending action. Returns `true` if one was pending.
    pub async fn cancel(&self) -> bool {
        self.confirmation.lock().await.cancel()
    }
}

/// The builder for `Ledger`
pub struct LedgerBuilder<S> {
    store: S,
    permissions: Box<dyn PermissionGate>,
    settings: LedgerSettings,
    schedule: Schedule,
}

impl<S: LedgerStore> LedgerBuilder<S> {
    /// Pass the permission gate. Without one every mutation is denied.
    pub fn permissions(mut self, gate: impl PermissionGate + 'static) -> Self {
        self.permissions = Box::new(gate);
        self
    }

    pub fn settings(mut self, settings: LedgerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed the schedule, e.g. with payments restored by the caller.
    pub fn schedule(mut self, payments: impl IntoIterator<Item = ScheduledPayment>) -> Self {
        for payment in payments {
            self.schedule.insert(payment);
        }
        self
    }

    /// Construct `Ledger`
    pub fn build(self) -> Ledger<S> {
        Ledger {
            store: self.store,
            permissions: self.permissions,
            settings: self.settings,
            schedule: Mutex::new(self.schedule),
            confirmation: Mutex::new(ConfirmationWorkflow::new()),
            submitting: AtomicBool::new(false),
        }
    }
}
