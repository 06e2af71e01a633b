//! Annotator message handlers
//!
//! Routes AnnotatorMsg from the host into the shape store.

use crate::render::Surface;
use crate::session::messages::{AnnotatorMsg, PointerAction};
use crate::session::state::ShapeStore;

/// Handle an AnnotatorMsg, modifying store state
///
/// Host notifications produced along the way are queued on the store.
pub fn handle_annotator_msg<S: Surface>(store: &mut ShapeStore<S>, msg: AnnotatorMsg) {
    match msg {
        AnnotatorMsg::SelectTool(tool) => {
            log::debug!("Tool changed to {tool:?}");
            store.select_tool(tool);
        }
        AnnotatorMsg::ActivateTag(name) => {
            if !store.tags().iter().any(|t| t.name == name) {
                log::warn!("Activating tag {name:?} that is not in the palette");
            }
            store.activate_tag(&name);
        }
        AnnotatorMsg::RemoveFocused => {
            if store.can_remove_focused() {
                store.remove_focused();
            }
        }
        AnnotatorMsg::RemoveAll => {
            if store.can_remove_all() {
                store.remove_all();
            }
        }
        AnnotatorMsg::Pointer(action) => handle_pointer(store, action),
    }
}

// ============================================================================
// Pointer handlers
// ============================================================================

fn handle_pointer<S: Surface>(store: &mut ShapeStore<S>, action: PointerAction) {
    match action {
        PointerAction::Down { x, y, button } => store.on_mouse_down(x, y, button),
        PointerAction::Move { x, y } => store.on_mouse_move(x, y),
        PointerAction::Click { x, y } => store.on_click(x, y),
    }
}
