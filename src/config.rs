/// How relational operators treat two string operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringOrdering {
    /// Byte-wise lexicographic order of the two strings.
    #[default]
    Lexicographic,
    /// Relational comparison of strings is a type mismatch and yields `false`.
    Reject,
}

/// Tuning knobs for a [`ProcessEngine`](crate::traversal::ProcessEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub string_ordering: StringOrdering,
    /// Fetch every referenced field once into a projected context before evaluating
    /// a gateway. Does not change results.
    pub project_fields: bool,
    /// Fail the build when a task's `next` disagrees with its `end` flag, instead of
    /// reporting a warning on each resolution.
    pub strict_end_flags: bool,
    /// Upper bound on elements visited by a single [`run`](crate::traversal::ProcessEngine::run).
    pub max_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            string_ordering: StringOrdering::default(),
            project_fields: false,
            strict_end_flags: false,
            max_steps: 1_000,
        }
    }
}
