use crate::Modifier;
use crate::input::PointerEvent;

#[derive(Clone)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Text { text: String },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }

    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    /// Resolved class string of this node.
    pub fn class_name(&self) -> String {
        self.modifier.class_name()
    }

    /// Deliver a pointer-enter to this node's binding, if it has one.
    /// Event routing itself belongs to the platform layer.
    pub fn pointer_enter(&self, event: PointerEvent) {
        if let Some(f) = &self.modifier.on_pointer_enter {
            f(event);
        }
    }

    /// Deliver a pointer-leave to this node's binding, if it has one.
    pub fn pointer_leave(&self, event: PointerEvent) {
        if let Some(f) = &self.modifier.on_pointer_leave {
            f(event);
        }
    }

    /// Deliver a click to this node's binding, if it has one.
    pub fn click(&self) {
        if let Some(f) = &self.modifier.on_click {
            f();
        }
    }
}
