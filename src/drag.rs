//! Drag-and-drop interaction state machine for the board.
//!
//! A single mutable slot holds the interaction state, so two live drag
//! subjects cannot exist: starting a new drag while one is pending simply
//! replaces it. The machine is pure — it records gestures and resolves a
//! drop into an intent; issuing the store call belongs to the controller.

use crate::stage::Stage;

/// Current drag interaction state. Hover events fire repeatedly as the drag
/// crosses column boundaries; every column is a legal target, including the
/// card's own current column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        case_id: String,
    },
    Hovering {
        case_id: String,
        target: Stage,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The case currently being dragged, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { case_id } | Self::Hovering { case_id, .. } => Some(case_id),
        }
    }

    /// A drag gesture started on a card. Clamps to single-drag-at-a-time:
    /// any pending drag is discarded in favor of the new subject.
    pub fn begin(&mut self, case_id: impl Into<String>) {
        *self = Self::Dragging {
            case_id: case_id.into(),
        };
    }

    /// The drag crossed into a column. No-op when idle (a hover without a
    /// drag subject has nothing to target).
    pub fn hover(&mut self, target: Stage) {
        match std::mem::take(self) {
            Self::Idle => {}
            Self::Dragging { case_id } | Self::Hovering { case_id, .. } => {
                *self = Self::Hovering { case_id, target };
            }
        }
    }

    /// The gesture ended on a column. Resets to idle and yields the drop
    /// intent; yields `None` when the gesture ended without a valid target
    /// (idle, or dragging with no column hovered).
    pub fn take_drop(&mut self) -> Option<(String, Stage)> {
        match std::mem::take(self) {
            Self::Hovering { case_id, target } => Some((case_id, target)),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }

    /// The gesture terminated anywhere else. Resets with no server call.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_hover_drop_sequence() {
        let mut drag = DragState::default();
        assert!(drag.is_idle());

        drag.begin("case-1");
        assert_eq!(drag.subject(), Some("case-1"));

        drag.hover(Stage::Hearing);
        assert_eq!(
            drag,
            DragState::Hovering {
                case_id: "case-1".into(),
                target: Stage::Hearing
            }
        );

        assert_eq!(drag.take_drop(), Some(("case-1".into(), Stage::Hearing)));
        assert!(drag.is_idle());
    }

    #[test]
    fn hover_fires_repeatedly_and_last_column_wins() {
        let mut drag = DragState::default();
        drag.begin("case-1");
        drag.hover(Stage::Ongoing);
        drag.hover(Stage::Judgment);
        drag.hover(Stage::Closed);
        assert_eq!(drag.take_drop(), Some(("case-1".into(), Stage::Closed)));
    }

    #[test]
    fn drop_without_hover_target_is_a_cancel() {
        let mut drag = DragState::default();
        drag.begin("case-1");
        assert_eq!(drag.take_drop(), None);
        assert!(drag.is_idle());
    }

    #[test]
    fn cancel_resets_without_intent() {
        let mut drag = DragState::default();
        drag.begin("case-1");
        drag.hover(Stage::Hearing);
        drag.cancel();
        assert!(drag.is_idle());
        assert_eq!(drag.take_drop(), None);
    }

    #[test]
    fn new_drag_replaces_pending_drag() {
        // One mutable slot: no two live drag subjects.
        let mut drag = DragState::default();
        drag.begin("case-1");
        drag.hover(Stage::Hearing);
        drag.begin("case-2");
        assert_eq!(drag.subject(), Some("case-2"));
        assert_eq!(drag.take_drop(), None);
    }

    #[test]
    fn hover_while_idle_is_ignored() {
        let mut drag = DragState::default();
        drag.hover(Stage::Ongoing);
        assert!(drag.is_idle());
    }
}
