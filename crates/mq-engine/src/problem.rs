use mq_world::Category;

/// One generated arithmetic problem.
///
/// Created fresh by the [`ProblemGenerator`](crate::ProblemGenerator) at the
/// start of every challenge and never mutated. The canonical answer is a
/// string: a plain number, or `"<q> rest <r>"` for division with remainder.
#[derive(Debug, Clone)]
pub struct Problem {
    /// The question presented to the player.
    pub question: String,
    /// The canonical answer.
    pub answer: String,
    /// The category this problem was generated from.
    pub category: Category,
    /// The difficulty tier this problem was generated from.
    pub difficulty: u8,
    /// A nudge shown after a wrong answer.
    pub hint: String,
    /// The worked method, shown by the remedial encounter.
    pub method: String,
}
