use tokio::sync::mpsc::Sender;

/// Progress update emitted while a batch is translated or a track assembled
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// One phrase translated
    Translating {
        current: usize,
        total: usize,
        preview: String,
    },
    /// One phrase pair processed by the audio pipeline
    Generating {
        current: usize,
        total: usize,
        preview: String,
    },
    /// Concatenated track handed to the encoder
    Encoding,
    /// Run completed
    Finished,
}

pub type ProgressSender = Option<Sender<ProgressUpdate>>;

/// Sends a progress update if anyone is listening. A closed receiver is ignored.
pub async fn send_progress(sender: &ProgressSender, update: ProgressUpdate) {
    if let Some(sender) = sender {
        let _ = sender.send(update).await;
    }
}
