//! Todo ordering by one of four sort keys.

use crate::domain::TodoItem;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

thread_local! {
    static TEXT_COLLATOR: Option<Collator> = root_collator();
}

/// Root-locale collator at secondary strength: accents count, case does not.
fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = ?e, "text collator unavailable, falling back to lowercase order");
            None
        }
    }
}

/// Field a todo list is ordered by.
///
/// Serialized names match the renderer's sort options (`"created"` for
/// [`SortKey::CreatedAt`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Deadline,
    #[serde(rename = "created")]
    CreatedAt,
    Text,
    Completed,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Deadline, Self::CreatedAt, Self::Text, Self::Completed];

    /// Parses the renderer's option names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deadline" => Some(Self::Deadline),
            "created" | "createdat" | "created_at" => Some(Self::CreatedAt),
            "text" => Some(Self::Text),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Compares two todos by `key`.
///
/// Direction is applied by reversing the resulting [`Ordering`], the same way
/// for every key. The one exception is a missing deadline, which is always
/// placed at the "far" end: last when ascending, first when descending.
///
/// Text compares case-insensitively with locale-aware collation (root
/// locale), so accented letters sort next to their base letter.
///
/// # Examples
///
/// ```
/// use boostfocus::view::sort::{compare, SortKey};
/// use boostfocus::TodoItem;
/// use std::cmp::Ordering;
///
/// let now = chrono::Utc::now();
/// let undated = TodoItem::new("a", None, now);
/// let dated = TodoItem::new("b", Some(now), now);
///
/// assert_eq!(compare(&undated, &dated, SortKey::Deadline, true), Ordering::Greater);
/// assert_eq!(compare(&undated, &dated, SortKey::Deadline, false), Ordering::Less);
/// ```
#[must_use]
pub fn compare(a: &TodoItem, b: &TodoItem, key: SortKey, ascending: bool) -> Ordering {
    let ordering = match key {
        SortKey::Deadline => match (a.deadline, b.deadline) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return if ascending { Ordering::Greater } else { Ordering::Less },
            (Some(_), None) => return if ascending { Ordering::Less } else { Ordering::Greater },
            (Some(da), Some(db)) => da.cmp(&db),
        },
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Text => compare_text(&a.text, &b.text),
        SortKey::Completed => a.completed.cmp(&b.completed),
    };

    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    TEXT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    })
}

/// Stable in-place sort of todo references.
pub fn sort_todos(todos: &mut [&TodoItem], key: SortKey, ascending: bool) {
    todos.sort_by(|a, b| compare(a, b, key, ascending));
}
