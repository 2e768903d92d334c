//! Direction of travel along the line.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of travel relative to station order.
///
/// `Forward` means towards higher orders, `Backward` towards lower ones.
/// `Undetermined` is used before a leg has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    Undetermined,
}

impl Direction {
    /// Infer the direction needed to travel from `from` to `to`.
    ///
    /// Equal orders give `Undetermined`: there is nowhere to travel.
    ///
    /// ```
    /// use metro_tracker::domain::Direction;
    ///
    /// assert_eq!(Direction::between(1, 4), Direction::Forward);
    /// assert_eq!(Direction::between(4, 1), Direction::Backward);
    /// assert_eq!(Direction::between(3, 3), Direction::Undetermined);
    /// ```
    pub fn between(from: i32, to: i32) -> Self {
        match to.cmp(&from) {
            Ordering::Greater => Direction::Forward,
            Ordering::Less => Direction::Backward,
            Ordering::Equal => Direction::Undetermined,
        }
    }

    /// Returns true for `Forward` and `Backward`.
    pub fn is_determined(self) -> bool {
        self != Direction::Undetermined
    }

    /// The opposite direction. `Undetermined` stays undetermined.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
            Direction::Undetermined => Direction::Undetermined,
        }
    }

    /// Returns true if `order` lies strictly ahead of `reference` when
    /// travelling in this direction.
    pub fn is_ahead(self, reference: i32, order: i32) -> bool {
        match self {
            Direction::Forward => order > reference,
            Direction::Backward => order < reference,
            Direction::Undetermined => false,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Undetermined => "undetermined",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undetermined() {
        assert_eq!(Direction::default(), Direction::Undetermined);
        assert!(!Direction::default().is_determined());
    }

    #[test]
    fn reversed() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
        assert_eq!(Direction::Undetermined.reversed(), Direction::Undetermined);
    }

    #[test]
    fn ahead() {
        assert!(Direction::Forward.is_ahead(2, 3));
        assert!(!Direction::Forward.is_ahead(2, 2));
        assert!(Direction::Backward.is_ahead(2, 1));
        assert!(!Direction::Backward.is_ahead(2, 3));
        assert!(!Direction::Undetermined.is_ahead(2, 3));
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&Direction::Forward).unwrap(),
            "\"forward\""
        );
        let d: Direction = serde_json::from_str("\"backward\"").unwrap();
        assert_eq!(d, Direction::Backward);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Swapping the endpoints reverses the direction
        #[test]
        fn antisymmetric(a in -100i32..100, b in -100i32..100) {
            prop_assert_eq!(Direction::between(a, b), Direction::between(b, a).reversed());
        }

        /// The destination is always ahead of the origin
        #[test]
        fn destination_is_ahead(a in -100i32..100, b in -100i32..100) {
            prop_assume!(a != b);
            prop_assert!(Direction::between(a, b).is_ahead(a, b));
        }
    }
}
