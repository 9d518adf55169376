/// Receives solver events and optionally returns a control action.
///
/// Solvers define their own event and action types. Returning `None` lets the
/// solver proceed with its default behavior.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<usize, bool>>(mut observer: O, events: &[usize]) -> Vec<Option<bool>> {
        events.iter().map(|e| observer.observe(e)).collect()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), &[1, 2, 3]), vec![None, None, None]);
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let actions = drive(
            |event: &usize| {
                seen.push(*event);
                (*event > 1).then_some(true)
            },
            &[1, 2],
        );

        assert_eq!(actions, vec![None, Some(true)]);
        assert_eq!(seen, vec![1, 2]);
    }
}
