//=========================================================================
// Emotions
//=========================================================================
//
// The fixed catalogue of sixteen emotions and their display colours.
//
// Strict parsing (`FromStr`) rejects unknown names. Colour lookup by
// name is lenient and falls back to joy, so presentation code never
// fails on an unexpected identifier.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

//=== Color ===============================================================

/// Packed `0xRRGGBB` display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);

    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// Parses `#RRGGBB`.
    pub const fn from_hex(hex: &str) -> Option<Color> {
        let bytes = hex.as_bytes();
        if bytes.len() != 7 || bytes[0] != b'#' {
            return None;
        }
        let mut value: u32 = 0;
        let mut i = 1;
        while i < 7 {
            let digit = match bytes[i] {
                b'0'..=b'9' => bytes[i] - b'0',
                b'a'..=b'f' => bytes[i] - b'a' + 10,
                b'A'..=b'F' => bytes[i] - b'A' + 10,
                _ => return None,
            };
            value = (value << 4) | digit as u32;
            i += 1;
        }
        Some(Color(value))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

//=== EmotionId ===========================================================

/// One of the sixteen emotions a player can explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmotionId {
    Angry,
    Anxious,
    Scared,
    Jealous,
    Guilty,
    Forgiving,
    Joy,
    Lonely,
    Playful,
    Grateful,
    Other,
    Hopeful,
    Shameful,
    Sad,
    Stuck,
    Nervous,
}

impl EmotionId {
    /// Catalogue order as shown in the hub.
    pub const ALL: [EmotionId; 16] = [
        EmotionId::Angry,
        EmotionId::Anxious,
        EmotionId::Scared,
        EmotionId::Jealous,
        EmotionId::Guilty,
        EmotionId::Forgiving,
        EmotionId::Joy,
        EmotionId::Lonely,
        EmotionId::Playful,
        EmotionId::Grateful,
        EmotionId::Other,
        EmotionId::Hopeful,
        EmotionId::Shameful,
        EmotionId::Sad,
        EmotionId::Stuck,
        EmotionId::Nervous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionId::Angry => "angry",
            EmotionId::Anxious => "anxious",
            EmotionId::Scared => "scared",
            EmotionId::Jealous => "jealous",
            EmotionId::Guilty => "guilty",
            EmotionId::Forgiving => "forgiving",
            EmotionId::Joy => "joy",
            EmotionId::Lonely => "lonely",
            EmotionId::Playful => "playful",
            EmotionId::Grateful => "grateful",
            EmotionId::Other => "other",
            EmotionId::Hopeful => "hopeful",
            EmotionId::Shameful => "shameful",
            EmotionId::Sad => "sad",
            EmotionId::Stuck => "stuck",
            EmotionId::Nervous => "nervous",
        }
    }

    /// Capitalised name for titles ("Express Your Joy Emotion").
    pub fn display_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn color(self) -> Color {
        match self {
            EmotionId::Angry => Color(0xE74C3C),
            EmotionId::Anxious => Color(0xF39C12),
            EmotionId::Scared => Color(0x8E44AD),
            EmotionId::Jealous => Color(0x27AE60),
            EmotionId::Guilty => Color(0x7F8C8D),
            EmotionId::Forgiving => Color(0x48C9B0),
            EmotionId::Joy => Color(0xF1C40F),
            EmotionId::Lonely => Color(0x5D6D7E),
            EmotionId::Playful => Color(0xFF6FB5),
            EmotionId::Grateful => Color(0xD4AF37),
            EmotionId::Other => Color(0xBDC3C7),
            EmotionId::Hopeful => Color(0x5DADE2),
            EmotionId::Shameful => Color(0x922B21),
            EmotionId::Sad => Color(0x2E86C1),
            EmotionId::Stuck => Color(0x6E2C00),
            EmotionId::Nervous => Color(0xE59866),
        }
    }
}

impl fmt::Display for EmotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour for a possibly unknown emotion name. Unknown names get joy's.
pub fn color_for_name(name: &str) -> Color {
    name.parse::<EmotionId>().unwrap_or(EmotionId::Joy).color()
}

//=== Parsing =============================================================

/// Returned when a name is not one of the sixteen emotions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEmotion(pub String);

impl fmt::Display for UnknownEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown emotion identifier '{}'", self.0)
    }
}

impl std::error::Error for UnknownEmotion {}

impl FromStr for EmotionId {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EmotionId::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == wanted)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

//=== Tests ===============================================================
