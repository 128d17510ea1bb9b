// Dispatch notification - the outbound collaborator seam

//! # Dispatch Notification
//!
//! When a document is dispatched, the final decision is communicated back
//! to the initiator by an external collaborator (SMS/email gateway). The
//! engine's only contract with it is [`Notifier`]: exactly one attempt per
//! dispatch, and a failed attempt never rolls back the committed status
//! change - it is recorded on the document and logged, not retried here.

use tracing::info;

use crate::models::Document;

/// Outbound notification collaborator
///
/// Implementations own delivery entirely; errors are reported back as
/// `anyhow::Error` so any gateway's failure type fits through the seam.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt to notify the initiator that their document was dispatched
    async fn notify_dispatched(
        &self,
        document: &Document,
        decision_summary: &str,
    ) -> anyhow::Result<()>;
}

/// Default notifier: logs the outbound message instead of delivering it
///
/// Stands in for the SMS/email gateway in development and tests.
#[derive(Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Notifier for LoggingNotifier {
    async fn notify_dispatched(
        &self,
        document: &Document,
        decision_summary: &str,
    ) -> anyhow::Result<()> {
        info!(
            reference = %document.reference_number,
            department = %document.initiator.department,
            contact = %document.initiator.contact_name,
            "📨 dispatch notification: {}",
            decision_summary
        );
        Ok(())
    }
}
