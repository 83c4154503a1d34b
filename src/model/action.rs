use serde::{Deserialize, Serialize};

use crate::Uid;
use crate::model::{Group, Layer};

/// One step of the construction log handed to the downstream store.
///
/// Replaying a stream in order rebuilds the catalog: every `LinkChild`
/// refers only to entities created earlier in the same stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    CreateGroup { entity: Group },
    CreateLayer { entity: Layer },
    LinkChild { parent_id: Option<Uid>, child_id: Uid },
}

impl Action {
    /// Id of the entity this action creates, if it creates one.
    pub fn created_id(&self) -> Option<&Uid> {
        match self {
            Action::CreateGroup { entity } => Some(&entity.id),
            Action::CreateLayer { entity } => Some(&entity.id),
            Action::LinkChild { .. } => None,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Action::LinkChild { .. })
    }
}

/// Receiver for emitted actions.
pub trait ActionSink {
    fn emit(&mut self, action: Action);
}

impl ActionSink for Vec<Action> {
    fn emit(&mut self, action: Action) {
        self.push(action);
    }
}

impl<S: ActionSink + ?Sized> ActionSink for &mut S {
    fn emit(&mut self, action: Action) {
        (**self).emit(action);
    }
}
