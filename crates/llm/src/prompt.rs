//! Prompt building: memories in, natural-language instruction out.
//!
//! Pure function, no storage or network access. Memories are rendered in
//! the order given — chronological ordering is the storage layer's job —
//! and content passes through unmodified (the downstream renderer escapes).

use storynest_core::constants::UNKNOWN_TIMESTAMP;
use storynest_core::Memory;

/// Build the model prompt for a storybook covering `memories`.
///
/// One line per memory: timestamp (or a literal placeholder), note text,
/// and a parenthetical image reference when one exists.
#[must_use]
pub fn build_prompt(child_name: &str, interval: &str, memories: &[Memory]) -> String {
    let mut prompt = format!(
        "Write a {interval} storybook for {child_name}. Use warm, family-friendly \
         language and create section titles for each memory. Keep it fit for \
         printing and reading aloud. Memories:\n\n"
    );
    for memory in memories {
        let taken_at = memory
            .taken_at
            .map_or_else(|| UNKNOWN_TIMESTAMP.to_owned(), |d| d.format("%Y-%m-%d").to_string());
        prompt.push_str(&format!("- {}: {}", taken_at, memory.note.as_deref().unwrap_or("")));
        if let Some(image) = &memory.image_path {
            prompt.push_str(&format!(" (image: {image})"));
        }
        prompt.push('\n');
    }
    prompt
}
