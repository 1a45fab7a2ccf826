//! Version history operations over an injected conversation store.
//!
//! [`HistoryService`] is what a front end talks to. It reads messages from the
//! store, runs the pure operations in [`history`](crate::history), asks the
//! caller for confirmation before a restore, and submits the result. The
//! write-back is attempted once: no retry, no timeout.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::HistoryResult;
use crate::history::{
    ComparisonSelector, RestorePolicy, VersionComparison, build_history, check_target,
    restore_with_policy,
};
use crate::models::{Message, VersionEntry, display_number};
use crate::store::ConversationStore;

/// Yes/no gate asked before a restore is executed
pub trait ConfirmRestore {
    /// `target` is the version about to become current; `display_number` is
    /// the number the user sees for it.
    fn confirm(&self, target: &VersionEntry, display_number: usize) -> bool;
}

/// Confirms every restore. For non-interactive callers that already asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmRestore for AlwaysConfirm {
    fn confirm(&self, _target: &VersionEntry, _display_number: usize) -> bool {
        true
    }
}

impl<F> ConfirmRestore for F
where
    F: Fn(&VersionEntry, usize) -> bool,
{
    fn confirm(&self, target: &VersionEntry, display_number: usize) -> bool {
        self(target, display_number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// The store accepted the restored message
    Restored(Message),
    /// The user declined; nothing was written
    Cancelled,
}

pub struct HistoryService<S> {
    store: S,
    policy: RestorePolicy,
}

impl<S: ConversationStore> HistoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store, policy: RestorePolicy::default() }
    }

    pub fn with_policy(mut self, policy: RestorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RestorePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Version sequence of a stored message, newest first
    pub async fn versions(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> HistoryResult<Vec<VersionEntry>> {
        let message = self.store.get_message(conversation_id, message_id).await?;
        Ok(build_history(&message))
    }

    /// Compare the current version with history tail entry `tail_index` (clamped)
    pub async fn compare(
        &self,
        conversation_id: &str,
        message_id: &str,
        tail_index: usize,
    ) -> HistoryResult<VersionComparison> {
        let versions = self.versions(conversation_id, message_id).await?;
        let mut selector = ComparisonSelector::new(tail_index);
        let (current, selected) = selector.pair(&versions)?;

        if selector.index() != tail_index {
            debug!(requested = tail_index, effective = selector.index(), "Clamped comparison index");
        }
        Ok(VersionComparison::between(current, selected))
    }

    /// Restore a stored message to version `target_index` after confirmation.
    ///
    /// The index is validated before the user is asked, and the restored
    /// message is stamped once the user has answered. A store failure is
    /// returned as-is and the message is not treated as updated.
    pub async fn restore(
        &self,
        conversation_id: &str,
        message_id: &str,
        target_index: usize,
        confirm: &dyn ConfirmRestore,
    ) -> HistoryResult<RestoreOutcome> {
        let message = self.store.get_message(conversation_id, message_id).await?;
        check_target(&message, target_index)?;

        let versions = build_history(&message);
        let target = &versions[target_index];
        if !confirm.confirm(target, display_number(versions.len(), target_index)) {
            debug!(message = message_id, target_index, "Restore cancelled");
            return Ok(RestoreOutcome::Cancelled);
        }

        let restored = restore_with_policy(&message, target_index, self.policy, Utc::now())?;

        if let Err(e) = self.store.update_message(&restored).await {
            warn!(message = message_id, error = %e, "Restore write-back failed");
            return Err(e);
        }

        info!(
            conversation = conversation_id,
            message = message_id,
            target_index,
            policy = %self.policy,
            "Restored message version"
        );
        Ok(RestoreOutcome::Restored(restored))
    }
}
