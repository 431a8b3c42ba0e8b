//! Safety envelope checks
//!
//! Individually valid parameters can still describe an oscillation that does
//! not fit on screen or would be numerically meaningless. These predicates
//! decide that at `start()`.

use crate::config::spring;
use crate::params::{PendulumParams, SpringParams};

/// Whether a parameter set may be allowed to oscillate.
pub trait RangeValidator {
    fn is_safe(&self) -> bool;
}

impl RangeValidator for PendulumParams {
    fn is_safe(&self) -> bool {
        self.config.safe_length.contains(self.length_for_calculations)
    }
}

impl RangeValidator for SpringParams {
    fn is_safe(&self) -> bool {
        // A zero stretch is a legal input but never a releasable one
        let stretch_ok = self.max_stretch > 0.0 && spring::STRETCH_DOMAIN.contains(self.max_stretch);
        if !(spring::MASS_DOMAIN.contains(self.mass)
            && spring::SPRING_CONSTANT_DOMAIN.contains(self.spring_constant)
            && stretch_ok)
        {
            return false;
        }

        let sweep = self.sweep();
        let envelope = self.config.oscillation_length;
        sweep.max <= envelope.max && sweep.min >= envelope.min
    }
}
