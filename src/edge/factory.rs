//! Adposition phrase -> edge resolution
//!
//! Phrases are canonicalized (lower-cased, hyphens and articles removed,
//! whitespace collapsed) and then looked up in fixed synonym tables. The
//! tables are content, not algorithm: extending them never requires touching
//! the lookup functions.

use crate::scene::graph::VertexId;

use super::{Anchor, Edge, HorizontalPlace, RelativeKind, VerticalPlace};

const ARTICLES: &[&str] = &["the", "a", "an"];

/// Trailing words naming the canvas itself ("at the top of the picture")
const CANVAS_SUFFIXES: &[&str] = &[
    " of picture",
    " of image",
    " of scene",
    " of canvas",
    " of screen",
    " of frame",
];

/// Normalize a phrase for table lookup
pub fn canonicalize(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .filter(|word| !ARTICLES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Relative rule named by an already canonical phrase
pub fn relative_kind(phrase: &str) -> Option<RelativeKind> {
    let kind = match phrase {
        "on" | "onto" | "on to" | "upon" | "up on" | "on top" | "on top of" | "atop"
        | "top of" | "above" | "up" | "over" | "up over" | "sitting on" | "standing on"
        | "resting on" | "lying on" | "perched on" | "mounted on" | "stacked on"
        | "placed on" | "high above" => RelativeKind::OnTopOf,

        "under" | "underneath" | "beneath" | "below" | "down" | "down below" | "lower than"
        | "underneath of" | "at foot of" | "at base of" | "hanging from" => RelativeKind::Under,

        "in" | "inside" | "inside of" | "within" | "into" | "in inside" | "contained in"
        | "held in" | "enclosed in" | "placed in" | "sitting in" | "lying in"
        | "swimming in" => RelativeKind::In,

        "behind" | "in back of" | "at back of" | "back of" | "partially behind"
        | "partly behind" | "standing behind" | "beyond" => RelativeKind::Behind,

        "fully behind" | "completely behind" | "entirely behind" | "totally behind"
        | "hidden behind" | "hidden by" | "obscured by" | "covered by" => RelativeKind::FullyBehind,

        "left of" | "to left of" | "on left of" | "at left of" | "on left side of"
        | "to left side of" | "left side of" | "leftward of" => RelativeKind::ToLeftOf,

        "right of" | "to right of" | "on right of" | "at right of" | "on right side of"
        | "to right side of" | "right side of" | "rightward of" | "next to" | "beside"
        | "besides" | "by" | "near" | "nearby" | "near to" | "close to" | "alongside"
        | "adjacent to" | "with" => RelativeKind::ToRightOf,

        "between" | "in between" | "among" | "amongst" | "amid" | "amidst" | "in middle of"
        | "at middle of" | "in center of" | "at center of" | "in centre of"
        | "surrounded by" => RelativeKind::InMiddleOf,

        _ => return None,
    };
    Some(kind)
}

/// Canvas anchor named by a single phrase, or `None` if unrecognized
pub fn absolute_anchor(phrase: &str) -> Option<Anchor> {
    let mut canon = canonicalize(phrase);
    for suffix in CANVAS_SUFFIXES {
        if let Some(stripped) = canon.strip_suffix(suffix) {
            canon = stripped.to_string();
            break;
        }
    }

    let anchor = match canon.as_str() {
        "at top" | "at very top" | "up top" | "along top" => Some(Anchor::Top),
        "at bottom" | "at very bottom" | "along bottom" => Some(Anchor::Bottom),
        "in middle" | "middle" | "at middle" | "in center" | "center" | "at center"
        | "in centre" | "centre" | "at centre" | "centered" | "centred" => Some(Anchor::Middle),
        _ => None,
    };
    anchor.or_else(|| corner_anchor(&canon))
}

/// Decompose a corner phrase ("on the top left corner", "in the lower right",
/// "on the left") into its horizontal and vertical parts.
fn corner_anchor(canon: &str) -> Option<Anchor> {
    // "on the top left" and "in the top left" mean the same corner
    let canon = match canon.strip_prefix("on ") {
        Some(rest) => format!("in {rest}"),
        None => canon.to_string(),
    };
    let body = canon
        .strip_prefix("in ")
        .or_else(|| canon.strip_prefix("at "))
        .unwrap_or(&canon);

    let mut horizontal = None;
    let mut vertical = None;
    for word in body.split_whitespace() {
        match word {
            "corner" | "side" | "hand" | "edge" => {}
            "left" | "lefthand" => set_once(&mut horizontal, HorizontalPlace::Left)?,
            "right" | "righthand" => set_once(&mut horizontal, HorizontalPlace::Right)?,
            "top" | "upper" => set_once(&mut vertical, VerticalPlace::Top)?,
            "bottom" | "lower" => set_once(&mut vertical, VerticalPlace::Bottom)?,
            _ => return None,
        }
    }

    if horizontal.is_none() && vertical.is_none() {
        return None;
    }
    Some(Anchor::Corner {
        horizontal,
        vertical,
    })
}

/// Fill an axis slot, rejecting phrases that name the same axis twice
fn set_once<T>(slot: &mut Option<T>, value: T) -> Option<()> {
    if slot.is_some() {
        return None;
    }
    *slot = Some(value);
    Some(())
}

/// Absolute edge binding `left` to the anchor named by `phrase`
pub fn absolute_edge(left: VertexId, phrase: &str) -> Option<Edge> {
    absolute_anchor(phrase).map(|anchor| Edge::absolute(left, anchor))
}

/// Relative edge between `left` and `right` from the adpositions attached to
/// each side of the sentence.
///
/// Tried in order: both lists concatenated (clears both), then the left list
/// if Right is the grammatical subject, otherwise the right list (clears only
/// that list). Returns `None`, leaving both lists untouched, if nothing matches.
pub fn relative_edge(
    left: VertexId,
    right: VertexId,
    left_adpositions: &mut Vec<String>,
    right_adpositions: &mut Vec<String>,
    right_is_subject: bool,
) -> Option<Edge> {
    let combined: Vec<String> = left_adpositions
        .iter()
        .chain(right_adpositions.iter())
        .cloned()
        .collect();
    if let Some(kind) = lookup_joined(&combined) {
        left_adpositions.clear();
        right_adpositions.clear();
        return Some(Edge::relative(left, right, kind));
    }

    let side = if right_is_subject {
        left_adpositions
    } else {
        right_adpositions
    };
    let kind = lookup_joined(side)?;
    side.clear();
    Some(Edge::relative(left, right, kind))
}

fn lookup_joined(words: &[String]) -> Option<RelativeKind> {
    if words.is_empty() {
        return None;
    }
    relative_kind(&canonicalize(&words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::PlaceType;
    use pretty_assertions::assert_eq;

    fn ads(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("  On   TOP of the "), "on top of");
        assert_eq!(canonicalize("to-the-left-of"), "to left of");
        assert_eq!(canonicalize("in an upper_left corner"), "in upper left corner");
    }

    #[test]
    fn test_synonyms_share_a_kind() {
        for phrase in ["above", "up", "upon", "over", "onto", "on", "on top of"] {
            assert_eq!(
                relative_kind(&canonicalize(phrase)),
                Some(RelativeKind::OnTopOf),
                "{phrase}"
            );
        }
        assert_eq!(relative_kind("beneath"), Some(RelativeKind::Under));
        assert_eq!(relative_kind("between"), Some(RelativeKind::InMiddleOf));
        assert_eq!(
            relative_kind(&canonicalize("to the left of")),
            Some(RelativeKind::ToLeftOf)
        );
    }

    #[test]
    fn test_unrecognized_phrase() {
        assert_eq!(relative_kind(&canonicalize("upside-down-of")), None);
        assert_eq!(absolute_anchor("upside-down-of"), None);
    }

    #[test]
    fn test_absolute_top_and_middle() {
        assert_eq!(absolute_anchor("at the top"), Some(Anchor::Top));
        assert_eq!(absolute_anchor("at the bottom of the picture"), Some(Anchor::Bottom));
        assert_eq!(absolute_anchor("in the middle"), Some(Anchor::Middle));
    }

    #[test]
    fn test_corner_phrases_canonicalize_on_to_in() {
        let expected = Some(Anchor::corner(HorizontalPlace::Left, VerticalPlace::Top));
        assert_eq!(absolute_anchor("on the top left corner"), expected);
        assert_eq!(absolute_anchor("in the top left corner"), expected);
        assert_eq!(absolute_anchor("in the upper-left"), expected);
        assert_eq!(absolute_anchor("at the left top"), expected);
        assert_eq!(
            absolute_anchor("in the lower right corner"),
            Some(Anchor::corner(HorizontalPlace::Right, VerticalPlace::Bottom))
        );
    }

    #[test]
    fn test_bare_sides_are_partial_corners() {
        let left = absolute_anchor("on the left").expect("recognized");
        assert_eq!(
            left,
            Anchor::Corner {
                horizontal: Some(HorizontalPlace::Left),
                vertical: None
            }
        );
        assert_eq!(left.place_type(), PlaceType::Horizontal);

        let top = absolute_anchor("top").expect("recognized");
        assert_eq!(top.place_type(), PlaceType::Vertical);
    }

    #[test]
    fn test_contradictory_corner_rejected() {
        assert_eq!(absolute_anchor("in the left right corner"), None);
        assert_eq!(absolute_anchor("in the corner"), None);
    }

    #[test]
    fn test_combined_lists_are_both_consumed() {
        let mut left = ads(&["on", "top"]);
        let mut right = ads(&["of"]);
        let edge = relative_edge(VertexId(0), VertexId(1), &mut left, &mut right, false);

        assert_eq!(
            edge,
            Some(Edge::relative(VertexId(0), VertexId(1), RelativeKind::OnTopOf))
        );
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn test_right_only_list_consumed_when_right_is_object() {
        let mut left = ads(&["quickly"]);
        let mut right = ads(&["under"]);
        let edge = relative_edge(VertexId(0), VertexId(1), &mut left, &mut right, false);

        assert_eq!(
            edge.as_ref().and_then(|e| match e {
                Edge::Relative(r) => Some(r.kind),
                Edge::Absolute(_) => None,
            }),
            Some(RelativeKind::Under)
        );
        assert_eq!(left, ads(&["quickly"]));
        assert!(right.is_empty());
    }

    #[test]
    fn test_left_only_list_consumed_when_right_is_subject() {
        let mut left = ads(&["behind"]);
        let mut right = ads(&["happily"]);
        let edge = relative_edge(VertexId(2), VertexId(3), &mut left, &mut right, true);

        assert!(edge.is_some());
        assert!(left.is_empty());
        assert_eq!(right, ads(&["happily"]));
    }

    #[test]
    fn test_no_match_leaves_lists_untouched() {
        let mut left = ads(&["upside-down-of"]);
        let mut right = ads(&[]);
        assert_eq!(
            relative_edge(VertexId(0), VertexId(1), &mut left, &mut right, true),
            None
        );
        assert_eq!(left, ads(&["upside-down-of"]));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = relative_edge(
            VertexId(0),
            VertexId(1),
            &mut ads(&["beside"]),
            &mut ads(&[]),
            true,
        );
        let second = relative_edge(
            VertexId(0),
            VertexId(1),
            &mut ads(&["beside"]),
            &mut ads(&[]),
            true,
        );
        assert_eq!(first, second);
        assert_eq!(
            absolute_edge(VertexId(4), "on the bottom right"),
            absolute_edge(VertexId(4), "on the bottom right")
        );
    }
}
