/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic, always producing the same result for a given
/// input. Solvers call a model many times with nearby inputs and rely on every
/// call being fully determined by its argument, so implementations must not
/// memoize results across different inputs.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

impl<T: Model + ?Sized> Model for &T {
    type Input = T::Input;
    type Output = T::Output;
    type Error = T::Error;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).call(input)
    }
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Doubler;

    impl Model for Doubler {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            Ok(2.0 * input)
        }
    }

    fn call_generic<M: Model<Input = f64, Output = f64>>(model: M, x: f64) -> f64 {
        model.call(&x).unwrap()
    }

    #[test]
    fn references_are_models() {
        let model = Doubler;
        assert_eq!(call_generic(&model, 1.5), 3.0);
        assert_eq!(call_generic(&&model, 2.0), 4.0);
    }
}
