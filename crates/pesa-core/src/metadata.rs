//! Category/reason annotations typed under a notification
//!
//! Supported forms (keys are case-insensitive, values keep their case):
//! `Category: food`, `c:food`, `Reason: lunch`, `r: lunch`

/// Category used when a message carries no usable category line
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub category: String,
    pub reason: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            category: UNCATEGORIZED.to_string(),
            reason: String::new(),
        }
    }
}

/// Extract category and reason from annotation lines. Later lines win.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> Metadata {
    let mut meta = Metadata::default();

    for line in lines {
        let line = line.as_ref().trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "category" | "c" => {
                if !value.is_empty() {
                    meta.category = value.to_string();
                }
            }
            "reason" | "r" => meta.reason = value.to_string(),
            _ => {}
        }
    }

    meta
}

/// Whether a line looks like an annotation (used when segmenting batches)
pub fn is_metadata_line(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    ["c:", "category:", "r:", "reason:"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
