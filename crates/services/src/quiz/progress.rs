/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 0-based index of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Width of the progress bar, counting the question on screen as reached.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let reached = (self.current + 1).min(self.total);
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(current: usize, total: usize) -> QuizProgress {
        QuizProgress {
            current,
            total,
            answered: current,
            is_complete: false,
        }
    }

    #[test]
    fn percent_counts_the_current_question() {
        assert_eq!(at(0, 4).percent(), 25);
        assert_eq!(at(3, 4).percent(), 100);
        assert_eq!(at(1, 3).percent(), 66);
    }

    #[test]
    fn percent_of_empty_quiz_is_zero() {
        assert_eq!(at(0, 0).percent(), 0);
    }
}
