use crate::Vec2;

/// The slice of the pointer vocabulary the trigger engine consumes: hover
/// is driven by enter/leave pairs, clicks arrive pre-synthesized through
/// the node's click binding.
#[derive(Clone, Copy, Debug)]
pub enum PointerEventKind {
    Enter,
    Leave,
}

#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn enter(position: Vec2) -> Self {
        Self {
            event: PointerEventKind::Enter,
            position,
        }
    }

    pub fn leave(position: Vec2) -> Self {
        Self {
            event: PointerEventKind::Leave,
            position,
        }
    }
}
