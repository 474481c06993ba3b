//! Pass trait and types for routing passes.

use lgr_ir::Circuit;

use crate::error::RouteResult;
use crate::property::PropertySet;

/// The kind of routing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads the circuit and writes derived graphs to the
    /// `PropertySet`.
    Analysis,
    /// Transformation pass that replaces the circuit.
    Transformation,
}

/// A routing pass.
///
/// Passes hold no state of their own; everything one pass derives for a
/// later one travels through the `PropertySet` of the current call.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    ///
    /// Analysis passes leave `circuit` untouched. Transformation passes build
    /// a new circuit and store it in `circuit`.
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPass;

    impl Pass for TestPass {
        fn name(&self) -> &'static str {
            "test"
        }

        fn kind(&self) -> PassKind {
            PassKind::Transformation
        }

        fn run(&self, _circuit: &mut Circuit, _properties: &mut PropertySet) -> RouteResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pass_kind() {
        let pass = TestPass;
        assert_eq!(pass.kind(), PassKind::Transformation);
        assert_eq!(pass.name(), "test");
    }
}
