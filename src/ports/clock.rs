//! Clock port - the injectable "now".

use crate::domain::foundation::Timestamp;

/// Source of the current time.
///
/// Every policy window and reminder threshold is evaluated against this,
/// never against the system clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
