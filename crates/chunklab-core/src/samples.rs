//! Built-in sample documents for trying out chunking settings.
//!
//! Three documents with different shapes: numbered legal clauses,
//! indented source code, and a prose article with quotes.

/// A named sample document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub title: &'static str,
    content: &'static str,
}

impl Sample {
    /// The document text with surrounding whitespace removed.
    pub fn content(&self) -> &'static str {
        self.content.trim()
    }
}

static SAMPLES: [Sample; 3] = [
    Sample {
        name: "legal",
        title: "Terms of Service (Legal)",
        content: include_str!("../samples/legal.txt"),
    },
    Sample {
        name: "code",
        title: "Python Transformation (Code)",
        content: include_str!("../samples/code.txt"),
    },
    Sample {
        name: "article",
        title: "Mars Rover Discovery (Article)",
        content: include_str!("../samples/article.txt"),
    },
];

/// All samples, in display order.
pub fn all() -> &'static [Sample] {
    &SAMPLES
}

/// Look up a sample by name (case-insensitive).
pub fn get(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
