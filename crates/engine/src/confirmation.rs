//! Two-phase confirmation for destructive actions.
//!
//! A destructive action is first parked with [`ConfirmationWorkflow::request`]
//! and only handed back for execution by [`ConfirmationWorkflow::confirm`].
//! Requesting never runs anything.

use std::mem;

/// The action waiting for an explicit confirmation, with the dialog texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingConfirmation<A> {
    pub titulo: String,
    pub mensagem: String,
    pub item_id: String,
    pub action: A,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationState<A> {
    Idle,
    Pending(PendingConfirmation<A>),
}

impl<A> Default for ConfirmationState<A> {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationWorkflow<A> {
    state: ConfirmationState<A>,
}

impl<A> Default for ConfirmationWorkflow<A> {
    fn default() -> Self {
        Self {
            state: ConfirmationState::Idle,
        }
    }
}

impl<A> ConfirmationWorkflow<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `action` until confirmed or cancelled.
    ///
    /// A request made while another one is pending replaces it.
    pub fn request(
        &mut self,
        titulo: impl Into<String>,
        mensagem: impl Into<String>,
        item_id: impl Into<String>,
        action: A,
    ) {
        let pending = PendingConfirmation {
            titulo: titulo.into(),
            mensagem: mensagem.into(),
            item_id: item_id.into(),
            action,
        };
        tracing::debug!(item_id = %pending.item_id, "confirmation requested");
        if let ConfirmationState::Pending(previous) =
            mem::replace(&mut self.state, ConfirmationState::Pending(pending))
        {
            tracing::debug!(item_id = %previous.item_id, "pending confirmation replaced");
        }
    }

    /// Takes the pending action out, returning to idle.
    ///
    /// Returns `None` (and does nothing) when idle.
    pub fn confirm(&mut self) -> Option<PendingConfirmation<A>> {
        match mem::take(&mut self.state) {
            ConfirmationState::Idle => None,
            ConfirmationState::Pending(pending) => {
                tracing::debug!(item_id = %pending.item_id, "confirmation accepted");
                Some(pending)
            }
        }
    }

    /// Confirms and runs `on_confirm` with the pending action.
    pub fn confirm_with<R>(&mut self, on_confirm: impl FnOnce(A) -> R) -> Option<R> {
        self.confirm().map(|pending| on_confirm(pending.action))
    }

    /// Discards the pending action. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        match mem::take(&mut self.state) {
            ConfirmationState::Idle => false,
            ConfirmationState::Pending(pending) => {
                tracing::debug!(item_id = %pending.item_id, "confirmation cancelled");
                true
            }
        }
    }

    pub fn pending(&self) -> Option<&PendingConfirmation<A>> {
        match &self.state {
            ConfirmationState::Idle => None,
            ConfirmationState::Pending(pending) => Some(pending),
        }
    }

    pub fn state(&self) -> &ConfirmationState<A> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Action {
        Delete(String),
    }

    #[test]
    fn request_only_parks_the_action() {
        let mut deleted: Vec<String> = Vec::new();
        let mut workflow = ConfirmationWorkflow::new();
        workflow.request(
            "Excluir transação",
            "Deseja excluir?",
            "tx_1",
            Action::Delete("tx_1".to_string()),
        );

        assert!(deleted.is_empty());
        let pending = workflow.pending().unwrap();
        assert_eq!(pending.titulo, "Excluir transação");
        assert_eq!(pending.item_id, "tx_1");

        workflow.confirm_with(|Action::Delete(id)| deleted.push(id));
        assert_eq!(deleted, ["tx_1"]);
        assert_eq!(workflow.state(), &ConfirmationState::Idle);
    }

    #[test]
    fn cancel_discards_without_running() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow.request("t", "m", "tx_1", Action::Delete("tx_1".to_string()));
        assert!(workflow.cancel());
        assert!(workflow.pending().is_none());
        assert!(!workflow.cancel());
        assert_eq!(workflow.confirm_with(|_| unreachable!()), None::<()>);
    }

    #[test]
    fn confirm_when_idle_is_a_no_op() {
        let mut workflow: ConfirmationWorkflow<Action> = ConfirmationWorkflow::new();
        assert!(workflow.confirm().is_none());
        assert_eq!(workflow.state(), &ConfirmationState::Idle);
    }

    #[test]
    fn later_request_replaces_pending() {
        let mut workflow = ConfirmationWorkflow::new();
        workflow.request("t", "m", "tx_1", Action::Delete("tx_1".to_string()));
        workflow.request("t", "m", "tx_2", Action::Delete("tx_2".to_string()));
        let confirmed = workflow.confirm().unwrap();
        assert_eq!(confirmed.action, Action::Delete("tx_2".to_string()));
        assert!(workflow.confirm().is_none());
    }
}
