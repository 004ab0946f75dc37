//! The `chunklab samples` command: list the built-in documents.

use anyhow::Result;
use chunklab_core::samples;

/// Print one row per sample: name, size in chars, and title.
pub fn list_samples() -> Result<()> {
    print!("{}", render_samples());
    Ok(())
}

pub fn render_samples() -> String {
    let mut out = format!("{:<10} {:>6}  {}\n", "NAME", "CHARS", "TITLE");
    for sample in samples::all() {
        out.push_str(&format!(
            "{:<10} {:>6}  {}\n",
            sample.name,
            sample.content().chars().count(),
            sample.title
        ));
    }
    out.push_str("\nUse `chunklab chunk --sample <NAME>` to chunk one.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_samples() {
        let out = render_samples();
        assert!(out.starts_with("NAME"));
        assert!(out.contains("legal"));
        assert!(out.contains("Python Transformation (Code)"));
        assert!(out.contains("Mars Rover Discovery (Article)"));
    }
}
