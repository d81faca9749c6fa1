//! Required waiting periods per parameter kind.

use crate::kind::ParameterKind;

/// Supplies the delay between staging and earliest commit.
pub trait DelayPolicy: Send + Sync {
    /// Delay in seconds for `kind`. Zero is a valid delay.
    fn required_delay(&self, kind: ParameterKind) -> u64;
}

/// The same delay for every parameter kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformDelay(pub u64);

impl DelayPolicy for UniformDelay {
    fn required_delay(&self, _kind: ParameterKind) -> u64 {
        self.0
    }
}
