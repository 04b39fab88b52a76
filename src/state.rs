use crate::{
    calls::CallOutput,
    error::Failure,
};

/// The latest outcome, projected for display. Holds at most one of a result
/// or an error; writing either slot clears the other.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InteractionState {
    result: Option<CallOutput>,
    error: Option<Failure>,
}

impl InteractionState {
    pub fn set_result(&mut self, value: CallOutput) {
        self.error = None;
        self.result = Some(value);
    }

    pub fn set_error(&mut self, failure: Failure) {
        self.result = None;
        self.error = Some(failure);
    }

    pub fn result(&self) -> Option<&CallOutput> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Completion {
        Result(i32),
        Error(String),
    }

    fn completions() -> impl Strategy<Value = Completion> {
        prop_oneof![
            any::<i32>().prop_map(Completion::Result),
            any::<u16>().prop_map(|n| Completion::Error(format!("revert {n}"))),
        ]
    }

    proptest! {
        #[test]
        fn completed_operations_leave_exactly_one_slot(
            sequence in proptest::collection::vec(completions(), 1..32)
        ) {
            let mut state = InteractionState::default();
            for completion in sequence {
                match completion {
                    Completion::Result(spacing) => {
                        state.set_result(CallOutput::TickSpacing(spacing))
                    }
                    Completion::Error(message) => {
                        state.set_error(Failure::CallReverted(message))
                    }
                }
                prop_assert!(state.result().is_some() ^ state.error().is_some());
            }
        }
    }

    #[test]
    fn set_result__clears_a_prior_error() {
        let mut state = InteractionState::default();
        state.set_error(Failure::ConnectionRejected);

        state.set_result(CallOutput::TickSpacing(10));

        assert_eq!(state.result(), Some(&CallOutput::TickSpacing(10)));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn set_error__clears_a_prior_result() {
        let mut state = InteractionState::default();
        state.set_result(CallOutput::TickSpacing(60));

        state.set_error(Failure::NetworkSwitchFailed);

        assert_eq!(state.result(), None);
        assert_eq!(state.error(), Some(&Failure::NetworkSwitchFailed));
    }
}
