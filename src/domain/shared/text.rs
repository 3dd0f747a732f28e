/// Maximum number of characters shown in progress and warning previews
pub const PREVIEW_CHARS: usize = 50;

/// First [`PREVIEW_CHARS`] characters of `text`, never splitting a character.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
