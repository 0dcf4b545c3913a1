//! Entering, running and leaving play mode

use super::EditorSession;
use crate::play::{self, MoveKey, PlayState};
use crate::state::tool::EditorMode;

impl EditorSession {
    /// Spawn the actor and suspend editing
    pub fn enter_play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.end_drag();
        self.selection.clear();
        self.held_keys = Default::default();

        let state = PlayState::spawn(self.scene.active_spawn(), &self.sim);
        tracing::info!("Play started at {:?}", state.actor_position);
        self.play = Some(state);
        self.mode = EditorMode::Playing;
        true
    }

    /// Drop the play state and resume editing with nothing selected
    pub fn exit_play(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.play = None;
        self.held_keys = Default::default();
        self.selection.clear();
        self.mode = EditorMode::Editing;
        tracing::info!("Play stopped");
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing() {
            self.exit_play()
        } else {
            self.enter_play()
        }
    }

    /// Record a key press or release. Only meaningful while playing.
    pub fn set_key(&mut self, key: MoveKey, held: bool) {
        if self.is_playing() {
            self.held_keys.set(key, held);
        }
    }

    /// Replace the whole held-key snapshot (sampled by the UI each frame)
    pub fn set_held_keys(&mut self, keys: play::MoveKeys) {
        if self.is_playing() {
            self.held_keys = keys;
        }
    }

    /// Advance the simulation by one frame. Returns `false` when not playing.
    pub fn frame(&mut self, delta: f32) -> bool {
        let Some(state) = self.play.as_ref() else {
            return false;
        };
        let next = play::step(state, self.held_keys, delta, &self.sim);
        self.play = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::settings::AppSettings;
    use crate::state::tool::Tool;
    use shared::SceneDescription;

    fn session() -> EditorSession {
        EditorSession::new("t", SceneDescription::default_scene(), &AppSettings::default())
    }

    #[test]
    fn test_enter_play_clears_selection_and_blocks_tools() {
        let mut s = session();
        s.click(Some(2));
        assert!(s.enter_play());
        assert!(s.selected().is_none());
        assert!(!s.select_tool(Tool::Move));
        s.click(Some(2));
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_actor_starts_above_spawn() {
        let mut s = session();
        s.enter_play();
        let p = s.play_state().unwrap().actor_position;
        assert!((p.y - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_exit_play_discards_state_and_keeps_scene() {
        let mut s = session();
        let before = s.objects().to_vec();
        let history = s.scene().history_len();
        s.enter_play();
        s.set_key(MoveKey::Forward, true);
        for _ in 0..30 {
            s.frame(1.0 / 60.0);
        }
        assert!(s.exit_play());
        assert!(s.play_state().is_none());
        assert_eq!(s.held_keys(), Default::default());
        assert_eq!(s.objects(), before.as_slice());
        assert_eq!(s.scene().history_len(), history);
    }

    #[test]
    fn test_keys_ignored_while_editing() {
        let mut s = session();
        s.set_key(MoveKey::Jump, true);
        assert!(!s.held_keys().jump);
        assert!(!s.frame(0.016));
    }
}
