//=========================================================================
// Theme & Narrative
//=========================================================================
//
// Static presentation tables for the two age groups.
//
// Architecture:
//   AgeGroup ──> Presentation { theme: &ThemeConfig, narrative: &NarrativeConfig }
//
// Everything here is a pure lookup over `static` data. Scenes resolve a
// `Presentation` once per entry and read from it for the rest of the
// visit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::emotion::Color;
use super::modules::ModuleId;
use super::profile::{AgeGroup, PlayerProfile};

//=== ThemeConfig =========================================================

/// Visual styling for one age group.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub primary_font: &'static str,
    pub secondary_font: &'static str,
    pub title_font: &'static str,

    pub background: Color,
    pub accent: Color,
    pub text: Color,
    pub secondary_text: Color,

    pub border_radius: u8,
    pub glow_intensity: f32,
    pub particle_density: u32,
    pub fantasy_effects: bool,
    /// Multiplier applied to animation durations.
    pub animation_speed: f32,
}

pub static TEEN_THEME: ThemeConfig = ThemeConfig {
    primary_font: "Cinzel, serif",
    secondary_font: "Merriweather, serif",
    title_font: "Cinzel, serif",
    background: Color(0x1A1A2E),
    accent: Color(0xFFD700),
    text: Color(0xFFFFFF),
    secondary_text: Color(0xAACCFF),
    border_radius: 12,
    glow_intensity: 0.8,
    particle_density: 20,
    fantasy_effects: true,
    animation_speed: 1.0,
};

pub static ADULT_THEME: ThemeConfig = ThemeConfig {
    primary_font: "Inter, sans-serif",
    secondary_font: "Georgia, serif",
    title_font: "Poppins, sans-serif",
    background: Color(0xF5F7FA),
    accent: Color(0x4A90E2),
    text: Color(0x2C3E50),
    secondary_text: Color(0x7F8C8D),
    border_radius: 8,
    glow_intensity: 0.2,
    particle_density: 5,
    fantasy_effects: false,
    animation_speed: 0.7,
};

//=== NarrativeConfig =====================================================

/// Copy shown inside one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNarrative {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub instructions: &'static str,
    pub companion_guidance: &'static str,
    pub completion_message: &'static str,
}

/// Age-specific copy for the hub and the nine modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeConfig {
    pub welcome_title: &'static str,
    pub emotion_selection_title: &'static str,
    pub emotion_selection_prompt: &'static str,
    modules: [ModuleNarrative; 9],
}

impl NarrativeConfig {
    pub fn module(&self, module: ModuleId) -> &ModuleNarrative {
        &self.modules[module.number() as usize - 1]
    }
}

pub static TEEN_NARRATIVE: NarrativeConfig = NarrativeConfig {
    welcome_title: "Welcome, Young Explorer",
    emotion_selection_title: "Choose Your First Quest",
    emotion_selection_prompt: "Which emotion calls out to you? Select one to begin your exploration.",
    modules: [
        ModuleNarrative {
            title: "The Awakening Circle",
            subtitle: "Quest 1: Measure Your Emotional Power",
            instructions: "How powerful is this emotion flowing through you? Use the slider to reveal how much energy it commands, then write a few words about its strength.",
            companion_guidance: "Take your time, brave explorer. Every emotion has its own unique strength.",
            completion_message: "You have awakened your first emotional power! Your journey continues to the Memory Constellation.",
        },
        ModuleNarrative {
            title: "The Memory Constellation",
            subtitle: "Quest 2: Connect the Stars of Your Past",
            instructions: "Place a star for each memory this feeling brings up, then write the words, scenes or names your mind links to it.",
            companion_guidance: "Memories are like stars in your night sky. Each one tells a story of who you are becoming.",
            completion_message: "The constellation shines brightly! You have connected your memories.",
        },
        ModuleNarrative {
            title: "The Reflection Mirror",
            subtitle: "Quest 3: See Through Different Lenses",
            instructions: "Where in your physical form does this emotion reside? Choose the places, then answer what each part would say, ask for and do.",
            companion_guidance: "Sometimes the greatest power comes from seeing things differently.",
            completion_message: "The Mirror reveals its secrets! You now see your emotion through the eyes of wisdom.",
        },
        ModuleNarrative {
            title: "The Speaking Stone",
            subtitle: "Quest 4: Give Voice to Your Feelings",
            instructions: "Write a magical scroll to a part of yourself you are battling with, or to someone you have kept feelings locked away from.",
            companion_guidance: "Words are spells that shape reality. Speak your truth.",
            completion_message: "The Stone resonates with your words! Your voice has been heard across the realm.",
        },
        ModuleNarrative {
            title: "The Mirror Portal",
            subtitle: "Quest 5: Walk Through New Realities",
            instructions: "Swap places with someone you wish to receive a message from and write as them to yourself. This scroll is for your eyes alone.",
            companion_guidance: "Change how you see, and you change what is possible.",
            completion_message: "The Portals shimmer with your wisdom!",
        },
        ModuleNarrative {
            title: "The Cathartic Falls",
            subtitle: "Quest 6: Harness the Power of Breath",
            instructions: "Breathe with the falls, then pour your feelings onto the page without filtering them.",
            companion_guidance: "Breath is the bridge between mind and body. Let it flow.",
            completion_message: "The Falls cleanse your spirit!",
        },
        ModuleNarrative {
            title: "The Emotional Compass",
            subtitle: "Quest 7: Navigate Your Inner Landscape",
            instructions: "Mark what sets this feeling off, then describe where it came from, where it is now and where it is heading.",
            companion_guidance: "Know yourself, and you will never be lost.",
            completion_message: "The Compass glows with understanding!",
        },
        ModuleNarrative {
            title: "The Wisdom Tree",
            subtitle: "Quest 8: Harvest the Fruits of Knowledge",
            instructions: "Seek the ancient lessons: what wisdom are you gaining on this adventure?",
            companion_guidance: "Knowledge is power, young explorer.",
            completion_message: "The Wisdom Tree blooms!",
        },
        ModuleNarrative {
            title: "The Ripple Pool",
            subtitle: "Quest 9: Create Waves of Change",
            instructions: "Cast your insights into the pool and watch them ripple outward, then set your heroic intention.",
            companion_guidance: "Every action creates ripples. Choose wisely.",
            completion_message: "Your ripples spread across the realm! You have completed your quest.",
        },
    ],
};

pub static ADULT_NARRATIVE: NarrativeConfig = NarrativeConfig {
    welcome_title: "Welcome to Emotional Wellness",
    emotion_selection_title: "Select an Emotion to Explore",
    emotion_selection_prompt: "Which emotion would you like to work with today?",
    modules: [
        ModuleNarrative {
            title: "Emotion Recognition",
            subtitle: "Identify and measure your emotional intensity",
            instructions: "Move the slider to show how intense this feeling is, then write a few words about how it plays out in your day.",
            companion_guidance: "Be honest with yourself. There are no right or wrong answers.",
            completion_message: "Assessment complete. You have established awareness of your emotional intensity.",
        },
        ModuleNarrative {
            title: "Memory Reflection",
            subtitle: "Connect memories and associations",
            instructions: "Place a marker for each memory, then write the words, scenes or times of life you associate with this feeling.",
            companion_guidance: "Past experiences shape our emotional responses.",
            completion_message: "You have identified important emotional patterns.",
        },
        ModuleNarrative {
            title: "Body Awareness",
            subtitle: "Explore physical sensations and body signals",
            instructions: "Select where in your body you feel this, then describe what it feels like and what that part would say, ask for and do.",
            companion_guidance: "Our bodies hold emotional wisdom.",
            completion_message: "You have connected with your body's emotional signals.",
        },
        ModuleNarrative {
            title: "Letter Writing",
            subtitle: "Module 4: Express Your Experience",
            instructions: "Write a letter to a part of yourself you are struggling with, or to someone toward whom you have bottled up feelings.",
            companion_guidance: "Putting feelings into words helps regulate them.",
            completion_message: "You have completed an expressive writing exercise.",
        },
        ModuleNarrative {
            title: "Reverse Letter Writing",
            subtitle: "Module 5: Perspective From Another View",
            instructions: "Reverse roles with someone you would like to hear from and write their letter back to yourself. It is for your eyes only.",
            companion_guidance: "Seeing from several angles reduces emotional rigidity.",
            completion_message: "You have expanded your perspective.",
        },
        ModuleNarrative {
            title: "Feelings Journal",
            subtitle: "Module 6: Reflect and Process",
            instructions: "Complete the breathing cycles, then write freely without editing in your head.",
            companion_guidance: "Free writing allows unconscious material to surface.",
            completion_message: "You have practiced reflective journaling.",
        },
        ModuleNarrative {
            title: "Trajectories",
            subtitle: "Module 7: Past, Present, and Future",
            instructions: "Select what triggers this feeling, then describe its past, present and likely future course.",
            companion_guidance: "Emotions are not static.",
            completion_message: "You have traced your emotional trajectory.",
        },
        ModuleNarrative {
            title: "Integration",
            subtitle: "Connect insights with deeper meaning",
            instructions: "What are the lessons you are learning right now, and the thoughts you would like to take away with you?",
            companion_guidance: "Emotions often carry messages about what matters most.",
            completion_message: "You have connected with deeper meaning.",
        },
        ModuleNarrative {
            title: "Community Connection",
            subtitle: "Set intentions and identify next steps",
            instructions: "Consider how your insights will ripple through your relationships, then set your intention for today.",
            companion_guidance: "Awareness without action rarely leads to change.",
            completion_message: "You have completed your action plan.",
        },
    ],
};

//=== Presentation ========================================================

/// Resolved theme and copy for one age group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub age_group: AgeGroup,
    pub theme: &'static ThemeConfig,
    pub narrative: &'static NarrativeConfig,
}

impl Presentation {
    pub fn for_age_group(age_group: AgeGroup) -> Self {
        match age_group {
            AgeGroup::Teen => Self {
                age_group,
                theme: &TEEN_THEME,
                narrative: &TEEN_NARRATIVE,
            },
            AgeGroup::Adult => Self {
                age_group,
                theme: &ADULT_THEME,
                narrative: &ADULT_NARRATIVE,
            },
        }
    }

    /// Resolves from an optional profile. No profile means adult.
    pub fn resolve(profile: Option<&PlayerProfile>) -> Self {
        match profile {
            Some(profile) => Self::for_age_group(profile.age_group),
            None => {
                debug!(target: "scene", "No player profile found, using adult presentation");
                Self::for_age_group(AgeGroup::Adult)
            }
        }
    }

    pub fn module(&self, module: ModuleId) -> &'static ModuleNarrative {
        self.narrative.module(module)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_resolves_adult() {
        let presentation = Presentation::resolve(None);
        assert_eq!(presentation.age_group, AgeGroup::Adult);
        assert_eq!(presentation.theme.accent, Color(0x4A90E2));
        assert_eq!(presentation.module(ModuleId::Awakening).title, "Emotion Recognition");
    }

    #[test]
    fn teen_profile_resolves_teen_tables() {
        let profile = PlayerProfile {
            name: "Kai".into(),
            age_group: AgeGroup::Teen,
            companion_name: "Luma".into(),
            avatar: None,
        };
        let presentation = Presentation::resolve(Some(&profile));
        assert_eq!(presentation.theme.background, Color(0x1A1A2E));
        assert!(presentation.theme.fantasy_effects);
        assert_eq!(presentation.module(ModuleId::RipplePool).title, "The Ripple Pool");
    }

    #[test]
    fn every_module_has_copy_for_both_groups() {
        for number in 1..=9 {
            let module = ModuleId::from_number(number).unwrap();
            for group in [AgeGroup::Teen, AgeGroup::Adult] {
                let narrative = Presentation::for_age_group(group).module(module);
                assert!(!narrative.title.is_empty());
                assert!(!narrative.instructions.is_empty());
            }
        }
    }
}
