pub mod digest;
pub mod progress;
pub mod text;

pub use digest::ContentDigest;
pub use progress::{send_progress, ProgressSender, ProgressUpdate};
pub use text::preview;
