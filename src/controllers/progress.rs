use crate::domain::shared::{ProgressSender, ProgressUpdate};
use tokio::sync::mpsc;

const PROGRESS_BUFFER: usize = 32;

/// Progress channel whose updates are written to the debug log.
/// The draining task ends when the sender is dropped.
pub fn log_progress(operation: &'static str) -> ProgressSender {
    let (tx, mut rx) = mpsc::channel::<ProgressUpdate>(PROGRESS_BUFFER);

    tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            match update {
                ProgressUpdate::Translating {
                    current,
                    total,
                    preview,
                } => {
                    tracing::debug!(operation, current, total, preview = %preview, "Translated phrase");
                }
                ProgressUpdate::Generating {
                    current,
                    total,
                    preview,
                } => {
                    tracing::debug!(operation, current, total, preview = %preview, "Processed pair");
                }
                ProgressUpdate::Encoding => tracing::debug!(operation, "Encoding track"),
                ProgressUpdate::Finished => tracing::debug!(operation, "Finished"),
            }
        }
    });

    Some(tx)
}
