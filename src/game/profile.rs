//=========================================================================
// Player Profile
//=========================================================================
//
// Read-only view of the player created by the character-creation layer.
//
// Architecture:
//   CharacterDraft ── finish() ──> PlayerProfile ──> SharedProfile
//                                                        │
//   SceneBase::initialize_theme() <── ProfileSource ─────┘
//
// Scenes never write the profile. An absent profile is legal and means
// "use the adult presentation".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::{Arc, RwLock};

use log::info;

//=== AgeGroup ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgeGroup {
    Teen,
    #[default]
    Adult,
}

//=== PlayerProfile =======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub age_group: AgeGroup,
    pub companion_name: String,
    /// Opaque avatar URL produced by the avatar collaborator.
    pub avatar: Option<String>,
}

//=== ProfileSource =======================================================

/// Where scenes read the current player from.
pub trait ProfileSource: Send + Sync {
    fn profile(&self) -> Option<PlayerProfile>;
}

/// Source with no player, used before character creation and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfile;

impl ProfileSource for NoProfile {
    fn profile(&self) -> Option<PlayerProfile> {
        None
    }
}

/// Thread-safe profile slot written by the character-creation layer.
#[derive(Debug, Clone, Default)]
pub struct SharedProfile {
    inner: Arc<RwLock<Option<PlayerProfile>>>,
}

impl SharedProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PlayerProfile) -> Self {
        let shared = Self::new();
        shared.set(profile);
        shared
    }

    pub fn set(&self, profile: PlayerProfile) {
        info!(target: "journey", "Player profile set for '{}' ({:?})", profile.name, profile.age_group);
        let mut slot = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(profile);
    }

    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

impl ProfileSource for SharedProfile {
    fn profile(&self) -> Option<PlayerProfile> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

//=== CharacterDraft ======================================================

/// Returned when a draft lacks state the profile requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    MissingName,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::MissingName => write!(f, "Please enter your name"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// In-progress character creation form.
#[derive(Debug, Clone, Default)]
pub struct CharacterDraft {
    pub name: String,
    pub age_group: AgeGroup,
    pub companion_name: Option<String>,
    pub avatar: Option<String>,
}

impl CharacterDraft {
    /// Companion name used when the player does not choose one.
    pub const DEFAULT_COMPANION: &'static str = "Sage";

    /// Validates the draft. A blank name is rejected.
    pub fn finish(self) -> Result<PlayerProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingName);
        }

        let companion_name = self
            .companion_name
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_COMPANION.to_string());

        Ok(PlayerProfile {
            name: name.to_string(),
            age_group: self.age_group,
            companion_name,
            avatar: self.avatar,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_missing_state() {
        let draft = CharacterDraft { name: "   ".into(), ..Default::default() };
        assert_eq!(draft.finish(), Err(ProfileError::MissingName));
    }

    #[test]
    fn finish_trims_and_defaults_companion() {
        let draft = CharacterDraft {
            name: "  Rin ".into(),
            age_group: AgeGroup::Teen,
            companion_name: Some(" ".into()),
            avatar: None,
        };
        let profile = draft.finish().unwrap();
        assert_eq!(profile.name, "Rin");
        assert_eq!(profile.age_group, AgeGroup::Teen);
        assert_eq!(profile.companion_name, CharacterDraft::DEFAULT_COMPANION);
    }

    #[test]
    fn shared_profile_is_visible_through_clones() {
        let shared = SharedProfile::new();
        let reader = shared.clone();
        assert!(reader.profile().is_none());

        shared.set(PlayerProfile {
            name: "Ada".into(),
            age_group: AgeGroup::Adult,
            companion_name: "Sage".into(),
            avatar: Some("https://example.invalid/a.glb".into()),
        });
        assert_eq!(reader.profile().map(|p| p.name), Some("Ada".to_string()));

        shared.clear();
        assert!(reader.profile().is_none());
    }

    #[test]
    fn no_profile_source_is_empty() {
        assert!(NoProfile.profile().is_none());
    }
}
