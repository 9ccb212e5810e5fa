//! Rebuild a wallet from its journal

use multisig_core::{Amount, Identity};
use multisig_wallet::{Wallet, WalletEvent};

use crate::error::JournalError;
use crate::event::JournalRecord;

/// Re-apply recorded events to `wallet` in order, without moving funds.
///
/// The wallet must be freshly initialized with the same configuration that
/// produced the journal. Every record must be accepted again with the same
/// result (same proposal id, same executed flag); otherwise replay stops.
/// An approval immediately followed by its `ExecutionAborted` record is
/// skipped.
///
/// Returns the executed payouts in journal order so the caller can rebuild
/// its executor's view.
pub async fn replay(
    records: &[JournalRecord],
    wallet: &Wallet,
) -> Result<Vec<(Identity, Amount)>, JournalError> {
    let mut payouts = Vec::new();
    let mut iter = records.iter().peekable();

    while let Some(record) = iter.next() {
        let mismatch = |reason: String| JournalError::Replay {
            sequence: record.sequence,
            reason,
        };

        match &record.event {
            WalletEvent::TransferApproved {
                id,
                approver,
                executed: true,
            } => {
                let aborted = iter.peek().is_some_and(|next| {
                    matches!(
                        &next.event,
                        WalletEvent::ExecutionAborted { id: aborted_id, approver: aborted_by }
                            if aborted_id == id && aborted_by == approver
                    )
                });
                if aborted {
                    iter.next();
                    tracing::debug!(%id, sequence = record.sequence, "Skipped aborted execution");
                    continue;
                }
            }
            WalletEvent::ExecutionAborted { id, .. } => {
                return Err(mismatch(format!(
                    "abort of proposal {} without a preceding executing approval",
                    id
                )));
            }
            _ => {}
        }

        let restored = wallet
            .restore(&record.event)
            .await
            .map_err(|e| mismatch(e.to_string()))?;
        if restored != record.event {
            return Err(mismatch(format!(
                "recorded {:?}, replayed as {:?}",
                record.event, restored
            )));
        }

        if let WalletEvent::TransferApproved {
            id, executed: true, ..
        } = restored
        {
            let proposal = wallet
                .transfer(id)
                .await
                .ok_or_else(|| mismatch(format!("executed proposal {} missing", id)))?;
            tracing::debug!(%id, sequence = record.sequence, "Replayed execution");
            payouts.push((proposal.destination, proposal.amount));
        }
    }

    tracing::info!(records = records.len(), executions = payouts.len(), "Journal replayed");
    Ok(payouts)
}
