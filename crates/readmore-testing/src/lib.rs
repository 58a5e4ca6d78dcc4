//! Testing utilities and harness for readmore

mod measurer;
mod rule;
pub mod assertions;

pub use measurer::MonospaceMeasurer;
pub use rule::{ExpandableTextRule, RuleError, DEFAULT_MAX_FRAMES};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::{ExpandableTextRule, MonospaceMeasurer, DEFAULT_MAX_FRAMES};
}
