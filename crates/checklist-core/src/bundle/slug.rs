use std::collections::{HashMap, HashSet};

/// Hands out bundle-unique slugs in first-seen order.
///
/// The first label producing a base slug gets it verbatim, later ones get
/// `-1`, `-2`, ... A suffixed candidate that another label already produced
/// naturally is skipped so ids stay unique.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, label: &str) -> String {
        let base = slug_base(label);
        let count = self.counts.entry(base.clone()).or_insert(0);

        let mut candidate = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;

        while self.issued.contains(&candidate) {
            candidate = format!("{base}-{count}");
            *count += 1;
        }

        self.issued.insert(candidate.clone());
        candidate
    }
}

/// Lowercase the label and collapse every run of characters outside
/// `[a-z0-9]` into a single `-`. Labels with nothing usable become `item`.
pub fn slug_base(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for c in label.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}
