//! Meaningful-element resolution — walks the ancestor chain of a click
//! target to find the semantic subject of the interaction.

use crate::host::UiElement;

/// Tags treated as meaningful interaction targets by default.
pub const DEFAULT_MEANINGFUL_TAGS: [&str; 2] = ["A", "BUTTON"];

/// A resolved click target: the matched element plus the semantic name that
/// becomes the event-name prefix (`"linkclick"`, `"buttonclick"`, ...).
#[derive(Debug, Clone)]
pub struct MeaningfulTarget<E> {
    pub semantic_name: String,
    pub element: E,
}

/// Raw tag names are implementation detail; event names should read as
/// actions. The anchor tag maps to "link", everything else lower-cases.
fn semantic_name(tag: &str) -> String {
    if tag.eq_ignore_ascii_case("a") {
        "link".to_string()
    } else {
        tag.to_ascii_lowercase()
    }
}

/// Find the closest meaningful ancestor (self included) of `target`.
///
/// An empty `meaningful_tags` set treats the target itself as meaningful —
/// everything is trackable. A populated set with no matching ancestor
/// yields `None`: the click produces no event, which is a normal outcome,
/// not an error. Tag comparison is ASCII case-insensitive.
pub fn resolve<E: UiElement>(
    target: Option<&E>,
    meaningful_tags: &[String],
) -> Option<MeaningfulTarget<E>> {
    let target = target?;

    if meaningful_tags.is_empty() {
        return Some(MeaningfulTarget {
            semantic_name: semantic_name(&target.tag_name()),
            element: target.clone(),
        });
    }

    let mut current = Some(target.clone());
    while let Some(element) = current {
        let tag = element.tag_name();
        if meaningful_tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            return Some(MeaningfulTarget {
                semantic_name: semantic_name(&tag),
                element,
            });
        }
        current = element.parent();
    }
    None
}
