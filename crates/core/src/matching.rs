use crate::model::{Member, Selections};

/// A member paired with how many of the user's answers it shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMember<'a> {
    pub member: &'a Member,
    pub score: usize,
}

/// Number of positions where the user's (1-based) answer equals the
/// member's expected answer. Only the overlapping prefix is compared.
#[must_use]
pub fn score(selections: &Selections, member: &Member) -> usize {
    selections
        .one_based()
        .zip(member.expected_answers())
        .filter(|(chosen, expected)| *chosen == u64::from(**expected))
        .count()
}

/// All members ordered by score, highest first.
///
/// Equal scores keep catalog order, so the earlier member always ranks higher.
#[must_use]
pub fn rank<'a>(selections: &Selections, members: &'a [Member]) -> Vec<ScoredMember<'a>> {
    let mut ranked: Vec<ScoredMember<'a>> = members
        .iter()
        .map(|member| ScoredMember {
            member,
            score: score(selections, member),
        })
        .collect();
    // `sort_by` is stable.
    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    ranked
}

/// The best-matching member, or `None` when there is nothing to compare.
#[must_use]
pub fn best_match<'a>(selections: &Selections, members: &'a [Member]) -> Option<ScoredMember<'a>> {
    if selections.is_empty() {
        return None;
    }
    rank(selections, members).into_iter().next()
}
