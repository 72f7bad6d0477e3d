//! Fixed prompt fragments keyed by story genre, mood and visual style.

use std::{fmt, str::FromStr};

use crate::foundation::error::StoryscapeError;

/// Story genres with a dedicated scene fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Fantasy,
    SciFi,
    Horror,
    Mystery,
    Cyberpunk,
    PostApocalyptic,
    Western,
    Romance,
}

/// Story moods with a dedicated atmosphere fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Peaceful,
    Tense,
    Battle,
    Mysterious,
    Dark,
    Triumphant,
    Melancholic,
}

/// Rendering style requested from the image model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Realistic,
    #[default]
    Stylized,
}

/// Genre used when a descriptor names a genre missing from [`GENRE_SCENES`].
pub const DEFAULT_GENRE: Genre = Genre::Fantasy;
/// Mood used when a descriptor names a mood missing from [`MOOD_ATMOSPHERES`].
pub const DEFAULT_MOOD: Mood = Mood::Peaceful;

pub const GENRE_SCENES: &[(&str, &str)] = &[
    (
        "fantasy",
        "medieval fantasy kingdom, ancient castle on a cliff, enchanted forest, distant mountains",
    ),
    (
        "sci_fi",
        "futuristic space station interior, vast starfield through panoramic windows, alien planet on the horizon",
    ),
    (
        "horror",
        "abandoned victorian manor, overgrown graveyard, twisted dead trees, thick fog",
    ),
    (
        "mystery",
        "rain-soaked 1920s city street, gas lamps, shadowy alleyways, old detective office windows",
    ),
    (
        "cyberpunk",
        "neon-lit megacity at night, towering skyscrapers, holographic billboards, wet reflective streets",
    ),
    (
        "post_apocalyptic",
        "ruined city overtaken by nature, collapsed highways, rusted vehicles, dust-filled sky",
    ),
    (
        "western",
        "dusty frontier town, wooden saloon facades, red desert mesas, endless prairie",
    ),
    (
        "romance",
        "quaint seaside village, blooming gardens, cobblestone lanes, soft sunset over the harbor",
    ),
];

pub const MOOD_ATMOSPHERES: &[(&str, &str)] = &[
    (
        "peaceful",
        "calm atmosphere, soft golden light, gentle breeze, serene and tranquil",
    ),
    (
        "tense",
        "ominous atmosphere, dramatic shadows, storm clouds gathering, uneasy stillness",
    ),
    (
        "battle",
        "battlefield, destruction, fire, smoke-filled sky, embers in the air, chaotic scene",
    ),
    (
        "mysterious",
        "mysterious atmosphere, drifting mist, faint glowing lights, hidden secrets",
    ),
    (
        "dark",
        "dark foreboding atmosphere, cold moonlight, deep shadows, oppressive silence",
    ),
    (
        "triumphant",
        "triumphant atmosphere, radiant sunrise, banners in the wind, epic sense of victory",
    ),
    (
        "melancholic",
        "melancholic atmosphere, overcast sky, gentle rain, muted colors, quiet loneliness",
    ),
];

pub const REALISTIC_STYLE: &str =
    "photorealistic, 8k, ultra detailed, cinematic lighting, sharp focus, wide angle";
pub const STYLIZED_STYLE: &str =
    "digital painting, concept art, painterly illustration, rich colors, atmospheric perspective";

/// Backgrounds must never depict characters.
pub const SCENERY_ONLY_SUFFIX: &str =
    "scenery only, environment art, empty landscape, no people, no humans, no characters, no text";

/// Normalize a descriptor key for table lookup.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub(crate) fn lookup(
    table: &'static [(&'static str, &'static str)],
    key: &str,
) -> Option<&'static str> {
    let key = normalize_key(key);
    table
        .iter()
        .find_map(|(k, fragment)| (*k == key).then_some(*fragment))
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Horror,
        Genre::Mystery,
        Genre::Cyberpunk,
        Genre::PostApocalyptic,
        Genre::Western,
        Genre::Romance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Genre::Fantasy => "fantasy",
            Genre::SciFi => "sci_fi",
            Genre::Horror => "horror",
            Genre::Mystery => "mystery",
            Genre::Cyberpunk => "cyberpunk",
            Genre::PostApocalyptic => "post_apocalyptic",
            Genre::Western => "western",
            Genre::Romance => "romance",
        }
    }
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Peaceful,
        Mood::Tense,
        Mood::Battle,
        Mood::Mysterious,
        Mood::Dark,
        Mood::Triumphant,
        Mood::Melancholic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Mood::Peaceful => "peaceful",
            Mood::Tense => "tense",
            Mood::Battle => "battle",
            Mood::Mysterious => "mysterious",
            Mood::Dark => "dark",
            Mood::Triumphant => "triumphant",
            Mood::Melancholic => "melancholic",
        }
    }
}

impl Style {
    pub fn fragment(self) -> &'static str {
        match self {
            Style::Realistic => REALISTIC_STYLE,
            Style::Stylized => STYLIZED_STYLE,
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Style {
    type Err = StoryscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "realistic" | "photo" | "photorealistic" => Ok(Style::Realistic),
            "stylized" | "stylised" | "illustration" => Ok(Style::Stylized),
            other => Err(StoryscapeError::validation(format!(
                "unknown style '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/tables.rs"]
mod tests;
