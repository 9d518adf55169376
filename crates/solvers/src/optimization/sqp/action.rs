/// Actions an observer can take during SQP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the best solution found so far.
    StopEarly,

    /// Reject the current line-search trial and keep backtracking.
    ///
    /// Only [`Event::Trial`] and failure events raised by a trial honor this
    /// action; elsewhere it is ignored. A rejected trial is never considered
    /// for the best solution.
    ///
    /// Use this for:
    /// - Recovering from model or problem errors when domain knowledge suggests
    ///   a shorter step will succeed.
    /// - Steering the search away from a region even when evaluation succeeded.
    ///
    /// [`Event::Trial`]: super::Event::Trial
    AssumeWorse,
}
