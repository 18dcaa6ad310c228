//! Approximate name matching between the answer catalog, the description
//! catalog and photo file names.
//!
//! The catalogs are maintained by hand, so the same person may appear as
//! `"김 철수"`, `"김철수"`, `"Backend Lead [김철수]"` or with a marker
//! character in front of the name. Everything here compares *normalized*
//! names (all whitespace removed) by substring containment, and every
//! resolver returns the first catalog entry that qualifies.

use crate::model::{Description, ImageAsset, Member};

/// Remove every whitespace character.
///
/// The byte order mark counts as whitespace (it shows up in pasted names);
/// NEL (U+0085) does not.
#[must_use]
pub fn normalize_name(value: &str) -> String {
    value.chars().filter(|&ch| !is_name_space(ch)).collect()
}

fn is_name_space(ch: char) -> bool {
    ch == '\u{feff}' || (ch.is_whitespace() && ch != '\u{85}')
}

/// Content of the first non-empty `[...]` group, or the whole value.
#[must_use]
pub fn extract_bracket_name(value: &str) -> &str {
    let mut rest = value;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };
        if close > 0 {
            return &after[..close];
        }
        rest = &after[close + 1..];
    }
    value
}

/// Normalized lookup keys for a member name: the name itself and the name
/// without its first character. Empty keys are dropped.
#[must_use]
pub fn candidate_keys(member_name: &str) -> Vec<String> {
    let mut chars = member_name.chars();
    chars.next();
    [normalize_name(member_name), normalize_name(chars.as_str())]
        .into_iter()
        .filter(|key| !key.is_empty())
        .collect()
}

fn overlaps(candidate: &str, key: &str) -> bool {
    key.contains(candidate) || candidate.contains(key)
}

/// First description whose (bracketed) name overlaps one of the member's keys.
#[must_use]
pub fn resolve_description<'a>(
    member_name: &str,
    descriptions: &'a [Description],
) -> Option<&'a Description> {
    let candidates = candidate_keys(member_name);
    if candidates.is_empty() {
        return None;
    }

    descriptions.iter().find(|item| {
        let key = normalize_name(extract_bracket_name(item.display_name()));
        // A blank name like "[ ]" would contain every candidate; skip it.
        !key.is_empty()
            && candidates
                .iter()
                .any(|candidate| overlaps(candidate, &key))
    })
}

/// Photo for a member: by name containment first, then by exact student id.
#[must_use]
pub fn resolve_image<'a>(member: &Member, images: &'a [ImageAsset]) -> Option<&'a ImageAsset> {
    let name_key = normalize_name(member.identity());
    if !name_key.is_empty() {
        if let Some(found) = images
            .iter()
            .find(|image| normalize_name(image.identity()).contains(&name_key))
        {
            return Some(found);
        }
    }

    images
        .iter()
        .find(|image| image.student_id() == member.student_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentId;

    fn member(name: &str, student_id: &str) -> Member {
        Member::new(name, StudentId::new(student_id), vec![1, 1, 1]).unwrap()
    }

    #[test]
    fn normalize_strips_all_whitespace() {
        assert_eq!(normalize_name("  김 철\t수\n"), "김철수");
        assert_eq!(normalize_name("a\u{3000}b"), "ab");
    }

    #[test]
    fn normalize_treats_bom_as_whitespace() {
        assert_eq!(normalize_name("김철\u{feff}수"), "김철수");
        assert_eq!(normalize_name("a\u{85}b"), "a\u{85}b");

        let descriptions = vec![Description::new("[김철\u{feff}수]", "text")];
        let found = resolve_description("김철수", &descriptions).unwrap();
        assert_eq!(found.display_name(), "[김철\u{feff}수]");
    }

    #[test]
    fn bracket_extraction_uses_first_non_empty_group() {
        assert_eq!(extract_bracket_name("Lead [김철수] [x]"), "김철수");
        assert_eq!(extract_bracket_name("Lead [] [박영희]"), "박영희");
        assert_eq!(extract_bracket_name("no brackets"), "no brackets");
        assert_eq!(extract_bracket_name("open [only"), "open [only");
    }

    #[test]
    fn candidate_keys_drop_first_character_variant() {
        assert_eq!(candidate_keys("*김철수"), vec!["*김철수", "김철수"]);
        assert_eq!(candidate_keys("a"), vec!["a"]);
        assert!(candidate_keys("   ").is_empty());
    }

    #[test]
    fn description_lookup_ignores_whitespace() {
        let descriptions = vec![
            Description::new("Designer [박영희]", "likes color"),
            Description::new("Backend Lead [김철수]", "likes rust"),
        ];
        let spaced = resolve_description("김 철수", &descriptions);
        let compact = resolve_description("김철수", &descriptions);
        assert_eq!(spaced, compact);
        assert_eq!(spaced.unwrap().text(), "likes rust");
    }

    #[test]
    fn description_lookup_accepts_marker_prefix() {
        let descriptions = vec![Description::new("[김철수]", "found")];
        let found = resolve_description("@김철수", &descriptions).unwrap();
        assert_eq!(found.text(), "found");
    }

    #[test]
    fn description_lookup_is_first_match_not_best_match() {
        let descriptions = vec![
            Description::new("[김철수수]", "first"),
            Description::new("[김철수]", "exact"),
        ];
        let found = resolve_description("김철수", &descriptions).unwrap();
        assert_eq!(found.text(), "first");
    }

    #[test]
    fn description_lookup_skips_blank_keys() {
        let descriptions = vec![
            Description::new("[ ]", "blank"),
            Description::new("이민호", "real"),
        ];
        assert!(resolve_description("김철수", &descriptions).is_none());
        assert_eq!(
            resolve_description("이민호", &descriptions).unwrap().text(),
            "real"
        );
    }

    #[test]
    fn image_lookup_prefers_name_then_student_id() {
        let images = vec![
            ImageAsset::from_path("1111_박영희.png").unwrap(),
            ImageAsset::from_path("2222_김철수 사진.jpg").unwrap(),
            ImageAsset::from_path("3333_someone.png").unwrap(),
        ];

        let by_name = resolve_image(&member("김 철수", "9999"), &images).unwrap();
        assert_eq!(by_name.student_id().as_str(), "2222");

        let by_id = resolve_image(&member("Unknown", "3333"), &images).unwrap();
        assert_eq!(by_id.identity(), "someone");

        assert!(resolve_image(&member("Nobody", "0000"), &images).is_none());
    }
}
