use std::{
    collections::HashSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::ToolError,
    tools::core::{Tool, decode_arguments},
};

/// Where the CLI looks for the FAQ file unless told otherwise.
pub const DEFAULT_FAQ_PATH: &str = "data/faq.json";

/// Lowest score that counts as an answer.
pub const MATCH_THRESHOLD: f64 = 0.2;

/// Reply when the FAQ file is missing or empty.
pub const FAQ_UNAVAILABLE: &str = "FAQ not available.";

/// Reply when no entry scores at least [`MATCH_THRESHOLD`].
pub const NO_GOOD_MATCH: &str = "No good match found in FAQ. Try rephrasing or provide more context.";

/// One question and its answer.
///
/// In the FAQ file an entry is an object with the optional string fields `q`
/// and `a`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(rename = "q", default)]
    pub question: String,
    #[serde(rename = "a", default)]
    pub answer:   String,
}

/// A loaded FAQ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqBook {
    entries: Vec<FaqEntry>,
}

impl FaqBook {
    #[must_use]
    pub const fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Reads a FAQ file.
    ///
    /// A missing file is an empty FAQ.
    ///
    /// # Errors
    /// - `ToolError::FaqUnreadable` if the file exists but cannot be read.
    /// - `ToolError::FaqMalformed` if it is not a JSON array of entries.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no FAQ file at '{}'", path.display());
                return Ok(Self::default());
            },
            Err(source) => {
                warn!("failed to read FAQ file '{}': {source}", path.display());
                return Err(ToolError::FaqUnreadable { path: path.to_path_buf(),
                                                      source });
            },
        };

        let entries: Vec<FaqEntry> =
            serde_json::from_str(&text).map_err(|source| ToolError::FaqMalformed { path: path.to_path_buf(),
                                                                                    source })?;
        info!("loaded {} FAQ entries from '{}'", entries.len(), path.display());
        Ok(Self::new(entries))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry that best matches `question`.
    ///
    /// An entry scores the better of its question and its answer. Only a
    /// strictly higher score replaces the current best, so ties keep the
    /// earlier entry; entries scoring zero never match.
    ///
    /// # Example
    /// ```
    /// use calcguard::tools::faq::{FaqBook, FaqEntry};
    ///
    /// let book = FaqBook::new(vec![FaqEntry { question: "How do refunds work".to_string(),
    ///                                         answer:   "Within 30 days.".to_string(), }]);
    /// let (score, entry) = book.best_match("refunds work how").unwrap();
    /// assert_eq!(score, 1.0);
    /// assert_eq!(entry.answer, "Within 30 days.");
    /// ```
    #[must_use]
    pub fn best_match(&self, question: &str) -> Option<(f64, &FaqEntry)> {
        let mut best: Option<(f64, &FaqEntry)> = None;
        for entry in &self.entries {
            let score = keyword_score(question, &entry.question).max(keyword_score(question, &entry.answer));
            if score > best.map_or(0.0, |(best_score, _)| best_score) {
                best = Some((score, entry));
            }
        }
        best
    }

    /// Answers `question` in the text format of the `faq_lookup` tool.
    #[must_use]
    pub fn answer(&self, question: &str) -> String {
        if self.is_empty() {
            return FAQ_UNAVAILABLE.to_string();
        }
        match self.best_match(question) {
            Some((score, entry)) if score >= MATCH_THRESHOLD => {
                debug!("FAQ match {score:.2} for {question:?}");
                format!("MatchScore={score:.2}\nQ: {}\nA: {}", entry.question, entry.answer)
            },
            _ => NO_GOOD_MATCH.to_string(),
        }
    }
}

/// Fraction of the query's keywords that occur in `text`.
///
/// Keywords are the lower-cased, whitespace-separated words longer than two
/// characters. A query without keywords scores zero.
///
/// # Example
/// ```
/// use calcguard::tools::faq::keyword_score;
///
/// assert_eq!(keyword_score("What is the refund policy", "Refund policy is 30 days"), 0.5);
/// assert_eq!(keyword_score("a b", "anything"), 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn keyword_score(query: &str, text: &str) -> f64 {
    let query = keywords(query);
    if query.is_empty() {
        return 0.0;
    }
    let text = keywords(text);
    query.intersection(&text).count() as f64 / query.len() as f64
}

fn keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// The `faq_lookup` tool.
///
/// Takes `{"question": "..."}`. The FAQ file is read on every call, so edits
/// to it take effect without a restart.
#[derive(Debug, Clone)]
pub struct FaqLookup {
    path: PathBuf,
}

impl FaqLookup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Deserialize)]
struct FaqArgs {
    question: String,
}

impl Tool for FaqLookup {
    fn name(&self) -> &'static str {
        "faq_lookup"
    }

    fn description(&self) -> &'static str {
        "Answer from a curated FAQ knowledge base. Input should be a short question. Returns the \
         match score, the matched question and its answer when a good match exists."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "a short question"
                }
            },
            "required": ["question"]
        })
    }

    fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let args: FaqArgs = decode_arguments(self.name(), arguments)?;
        Ok(FaqBook::load(&self.path)?.answer(&args.question))
    }
}
