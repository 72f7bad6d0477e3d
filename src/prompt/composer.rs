use rand::Rng;
use url::Url;

use crate::{
    config::EndpointConfig,
    foundation::error::{StoryscapeError, StoryscapeResult},
    prompt::tables::{
        self, DEFAULT_GENRE, DEFAULT_MOOD, GENRE_SCENES, Genre, MOOD_ATMOSPHERES, Mood,
        SCENERY_ONLY_SUFFIX, Style,
    },
};

/// Exclusive upper bound of generated seeds.
pub const SEED_BOUND: u32 = 1_000_000;

/// Semantic description of the wanted backdrop.
///
/// `genre` and `mood` are free-form keys: hosts may pass values this crate has no fragment for,
/// in which case composition falls back to the default entries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundDescriptor {
    pub genre: String,
    pub mood: String,
    #[serde(default)]
    pub style: Style,
}

impl BackgroundDescriptor {
    pub fn new(genre: impl Into<String>, mood: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            mood: mood.into(),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Neutral descriptor used before any story context exists.
    pub fn neutral() -> Self {
        Self::new(DEFAULT_GENRE.key(), DEFAULT_MOOD.key())
    }
}

impl From<(Genre, Mood)> for BackgroundDescriptor {
    fn from((genre, mood): (Genre, Mood)) -> Self {
        Self::new(genre.key(), mood.key())
    }
}

/// Everything needed to address one generated image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImageRequest {
    pub prompt_text: String,
    pub seed: u32,
    pub width: u32,
    pub height: u32,
    pub flags: Vec<(String, String)>,
}

impl GeneratedImageRequest {
    /// Build the fetchable URL: prompt as a percent-encoded path segment, then
    /// `width`, `height`, `seed` and the fixed flags as query parameters.
    ///
    /// The segment uses WHATWG path-segment encoding: spaces become `%20`, while `,` and other
    /// sub-delimiters stay literal.
    pub fn to_url(&self, base_url: &str) -> StoryscapeResult<Url> {
        let mut url = Url::parse(base_url)?;
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| {
                StoryscapeError::config(format!(
                    "endpoint '{base_url}' cannot carry a path segment"
                ))
            })?
            .pop_if_empty()
            .push(&self.prompt_text);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("width", &self.width.to_string())
                .append_pair("height", &self.height.to_string())
                .append_pair("seed", &self.seed.to_string());
            for (key, value) in &self.flags {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Assemble the prompt text: scene, mood, style, then the scenery-only suffix.
///
/// Unknown genre or mood keys fall back to the default fragments.
pub fn compose_prompt_text(desc: &BackgroundDescriptor) -> String {
    let scene = tables::lookup(GENRE_SCENES, &desc.genre).unwrap_or_else(|| {
        tracing::debug!(genre = %desc.genre, "unknown genre, using default scene");
        default_fragment(GENRE_SCENES, DEFAULT_GENRE.key())
    });
    let mood = tables::lookup(MOOD_ATMOSPHERES, &desc.mood).unwrap_or_else(|| {
        tracing::debug!(mood = %desc.mood, "unknown mood, using default atmosphere");
        default_fragment(MOOD_ATMOSPHERES, DEFAULT_MOOD.key())
    });

    [scene, mood, desc.style.fragment(), SCENERY_ONLY_SUFFIX].join(", ")
}

fn default_fragment(table: &'static [(&'static str, &'static str)], key: &str) -> &'static str {
    tables::lookup(table, key).unwrap_or(table[0].1)
}

/// Draw a seed uniformly from `[0, SEED_BOUND)`.
pub fn draw_seed<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..SEED_BOUND)
}

pub fn compose_request<R: Rng + ?Sized>(
    desc: &BackgroundDescriptor,
    endpoint: &EndpointConfig,
    rng: &mut R,
) -> GeneratedImageRequest {
    GeneratedImageRequest {
        prompt_text: compose_prompt_text(desc),
        seed: draw_seed(rng),
        width: endpoint.width,
        height: endpoint.height,
        flags: endpoint
            .flags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

/// Compose the image URL for `desc`. Never touches the network.
pub fn compose_url<R: Rng + ?Sized>(
    desc: &BackgroundDescriptor,
    endpoint: &EndpointConfig,
    rng: &mut R,
) -> StoryscapeResult<String> {
    let request = compose_request(desc, endpoint, rng);
    let url = request.to_url(&endpoint.base_url)?;
    tracing::debug!(seed = request.seed, genre = %desc.genre, mood = %desc.mood, "composed backdrop url");
    Ok(url.into())
}

/// URL for the neutral descriptor, shown before any story context exists.
pub fn default_url<R: Rng + ?Sized>(
    endpoint: &EndpointConfig,
    rng: &mut R,
) -> StoryscapeResult<String> {
    compose_url(&BackgroundDescriptor::neutral(), endpoint, rng)
}

/// [`compose_url`] seeded from the thread-local RNG.
pub fn random_url(
    desc: &BackgroundDescriptor,
    endpoint: &EndpointConfig,
) -> StoryscapeResult<String> {
    compose_url(desc, endpoint, &mut rand::rng())
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/composer.rs"]
mod tests;
