use std::time::Duration;

use serde::Serialize;

use crate::types::Position;

pub const ENTER_DURATION: Duration = Duration::from_millis(1_000);
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Easing {
    Linear,
    Spring { tension: u16, friction: u16 },
}

/// Vertical slide, in percent of the element's own height.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SlideTransition {
    pub from_percent: i16,
    pub to_percent: i16,
    #[serde(with = "millis")]
    pub duration: Duration,
    pub easing: Easing,
}

impl SlideTransition {
    /// Slide in from the edge the list is anchored to. Anything but `Top`
    /// slides in from below.
    #[must_use]
    pub const fn enter(position: Option<Position>) -> Self {
        Self {
            from_percent: edge_offset(position),
            to_percent: 0,
            duration: ENTER_DURATION,
            easing: Easing::Spring {
                tension: 200,
                friction: 20,
            },
        }
    }

    #[must_use]
    pub const fn exit(position: Option<Position>) -> Self {
        Self {
            from_percent: 0,
            to_percent: edge_offset(position),
            duration: EXIT_DURATION,
            easing: Easing::Linear,
        }
    }
}

const fn edge_offset(position: Option<Position>) -> i16 {
    match position {
        Some(Position::Top) => -100,
        Some(Position::Bottom) | None => 100,
    }
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::{EXIT_DURATION, SlideTransition};
    use crate::types::Position;

    #[test]
    fn top_lists_slide_from_above() {
        let enter = SlideTransition::enter(Some(Position::Top));
        assert_eq!((enter.from_percent, enter.to_percent), (-100, 0));
        let exit = SlideTransition::exit(Some(Position::Top));
        assert_eq!((exit.from_percent, exit.to_percent), (0, -100));
        assert_eq!(exit.duration, EXIT_DURATION);
    }

    #[test]
    fn unset_position_behaves_like_bottom() {
        assert_eq!(
            SlideTransition::enter(None),
            SlideTransition::enter(Some(Position::Bottom))
        );
        assert_eq!(SlideTransition::exit(None).to_percent, 100);
    }
}
