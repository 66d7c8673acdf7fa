//=========================================================================
// Completion Policy
//=========================================================================
//
// Threshold table consulted by every module's completion predicate.
//
// The defaults follow the stricter of the historical rule sets. Hosts
// that want the lenient variant adjust the table through the builder
// methods instead of editing module code.
//
//=========================================================================

//=== Elaboration =========================================================

/// Whether the awakening module requires written elaboration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elaboration {
    /// The slider alone is enough. The intensity label is recorded.
    Optional,
    /// At least `min_words` words must be written.
    Required { min_words: usize },
}

//=== CompletionPolicy ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPolicy {
    pub awakening_elaboration: Elaboration,
    pub min_memories: usize,
    pub letter_min_words: usize,
    pub reverse_letter_min_words: usize,
    pub breath_cycles: u32,
    pub journal_min_words: usize,
    pub min_triggers: usize,
    pub ripples: usize,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            awakening_elaboration: Elaboration::Required { min_words: 1 },
            min_memories: 3,
            letter_min_words: 10,
            reverse_letter_min_words: 30,
            breath_cycles: 3,
            journal_min_words: 20,
            min_triggers: 2,
            ripples: 3,
        }
    }
}

impl CompletionPolicy {
    //--- Builder Methods --------------------------------------------------

    pub fn with_awakening_elaboration(mut self, elaboration: Elaboration) -> Self {
        self.awakening_elaboration = elaboration;
        self
    }

    pub fn with_min_memories(mut self, count: usize) -> Self {
        self.min_memories = count;
        self
    }

    pub fn with_letter_min_words(mut self, words: usize) -> Self {
        self.letter_min_words = words;
        self
    }

    pub fn with_reverse_letter_min_words(mut self, words: usize) -> Self {
        self.reverse_letter_min_words = words;
        self
    }

    /// # Panics
    ///
    /// Panics if `cycles` is zero. The breathing exercise needs a target.
    pub fn with_breath_cycles(mut self, cycles: u32) -> Self {
        assert!(cycles > 0, "breath cycle target must be positive");
        self.breath_cycles = cycles;
        self
    }

    pub fn with_journal_min_words(mut self, words: usize) -> Self {
        self.journal_min_words = words;
        self
    }

    pub fn with_min_triggers(mut self, count: usize) -> Self {
        self.min_triggers = count;
        self
    }

    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn with_ripples(mut self, count: usize) -> Self {
        assert!(count > 0, "ripple target must be positive");
        self.ripples = count;
        self
    }
}

//=== Word Counting =======================================================

/// Counts whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `true` when the trimmed text is not empty.
pub(crate) fn is_answered(text: &str) -> bool {
    !text.trim().is_empty()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_runs_of_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one  two\nthree\tfour "), 4);
        assert_eq!(word_count("mañana\u{2003}déjà vu"), 3);
    }

    #[test]
    fn defaults_are_the_strict_table() {
        let policy = CompletionPolicy::default();
        assert_eq!(policy.awakening_elaboration, Elaboration::Required { min_words: 1 });
        assert_eq!(policy.letter_min_words, 10);
        assert_eq!(policy.reverse_letter_min_words, 30);
        assert_eq!((policy.breath_cycles, policy.journal_min_words), (3, 20));
    }

    #[test]
    fn builder_overrides_single_thresholds() {
        let policy = CompletionPolicy::default()
            .with_awakening_elaboration(Elaboration::Optional)
            .with_min_memories(1);
        assert_eq!(policy.awakening_elaboration, Elaboration::Optional);
        assert_eq!(policy.min_memories, 1);
        assert_eq!(policy.ripples, 3);
    }

    #[test]
    #[should_panic(expected = "breath cycle target must be positive")]
    fn zero_breath_cycles_panics() {
        let _ = CompletionPolicy::default().with_breath_cycles(0);
    }
}
