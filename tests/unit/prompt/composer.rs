use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn endpoint() -> EndpointConfig {
    EndpointConfig::default()
}

#[test]
fn fantasy_battle_realistic_example() {
    let desc = BackgroundDescriptor::from((Genre::Fantasy, Mood::Battle)).with_style(Style::Realistic);
    let mut rng = StdRng::seed_from_u64(7);
    let url = compose_url(&desc, &endpoint(), &mut rng).unwrap();

    assert!(url.starts_with("https://image.pollinations.ai/prompt/"));
    assert!(url.contains("medieval%20fantasy%20kingdom"));
    assert!(url.contains("battlefield,%20destruction,%20fire"));
    assert!(url.contains("photorealistic,%208k"));
    assert!(url.contains("no%20humans"));

    let parsed = url::Url::parse(&url).unwrap();
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs[0], ("width".to_owned(), "1920".to_owned()));
    assert_eq!(pairs[1], ("height".to_owned(), "1080".to_owned()));
    assert_eq!(pairs[2].0, "seed");
    let seed: u32 = pairs[2].1.parse().unwrap();
    assert!(seed < SEED_BOUND);
    assert!(parsed.query().unwrap().starts_with("width=1920&height=1080&seed="));
}

#[test]
fn fragment_order_is_stable() {
    let desc = BackgroundDescriptor::new("horror", "dark");
    let text = compose_prompt_text(&desc);
    let scene = text.find("abandoned victorian manor").unwrap();
    let mood = text.find("dark foreboding atmosphere").unwrap();
    let style = text.find("digital painting").unwrap();
    let suffix = text.find("scenery only").unwrap();
    assert!(scene < mood && mood < style && style < suffix);
    assert!(text.ends_with(SCENERY_ONLY_SUFFIX));
}

#[test]
fn same_descriptor_differs_only_in_seed() {
    let desc = BackgroundDescriptor::from((Genre::Cyberpunk, Mood::Tense));
    let mut rng = StdRng::seed_from_u64(42);
    let a = compose_request(&desc, &endpoint(), &mut rng);
    let b = compose_request(&desc, &endpoint(), &mut rng);

    assert_eq!(a.prompt_text, b.prompt_text);
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert_eq!(a.flags, b.flags);
    assert_ne!(a.seed, b.seed);
    assert_ne!(
        a.to_url(&endpoint().base_url).unwrap(),
        b.to_url(&endpoint().base_url).unwrap()
    );
}

#[test]
fn injected_rng_makes_composition_reproducible() {
    let desc = BackgroundDescriptor::new("western", "triumphant");
    let a = compose_url(&desc, &endpoint(), &mut StdRng::seed_from_u64(3)).unwrap();
    let b = compose_url(&desc, &endpoint(), &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_keys_fall_back_to_defaults() {
    let unknown = BackgroundDescriptor::new("opera", "whimsical");
    let neutral = BackgroundDescriptor::neutral();
    assert_eq!(compose_prompt_text(&unknown), compose_prompt_text(&neutral));

    let mut rng = StdRng::seed_from_u64(1);
    let url = compose_url(&unknown, &endpoint(), &mut rng).unwrap();
    assert!(url.contains("medieval%20fantasy%20kingdom"));
    assert!(url.contains("calm%20atmosphere"));

    let empty = BackgroundDescriptor::new("", "");
    assert!(!compose_prompt_text(&empty).is_empty());
}

#[test]
fn default_url_uses_neutral_descriptor_and_stylized_style() {
    let mut rng = StdRng::seed_from_u64(9);
    let url = default_url(&endpoint(), &mut rng).unwrap();
    assert!(url.contains("digital%20painting"));
    assert!(!url.contains("photorealistic"));
}

#[test]
fn prompt_with_reserved_characters_stays_one_segment() {
    let request = GeneratedImageRequest {
        prompt_text: "a/b ? c#d".to_owned(),
        seed: 5,
        width: 10,
        height: 20,
        flags: vec![("nologo".to_owned(), "true".to_owned())],
    };
    let url = request.to_url("https://example.test/prompt/").unwrap();
    assert_eq!(url.path_segments().unwrap().count(), 2);
    assert_eq!(url.query(), Some("width=10&height=20&seed=5&nologo=true"));
}

#[test]
fn prompt_segment_keeps_commas_literal() {
    let desc = BackgroundDescriptor::from((Genre::Fantasy, Mood::Battle));
    let mut rng = StdRng::seed_from_u64(1);
    let url = compose_url(&desc, &endpoint(), &mut rng).unwrap();
    assert!(url.contains("battlefield,%20destruction,%20fire"));
    assert!(!url.contains("%2C"));
    assert!(!url.contains('+'));
}

#[test]
fn random_url_uses_thread_rng() {
    let desc = BackgroundDescriptor::new("horror", "dark");
    let random = url::Url::parse(&random_url(&desc, &endpoint()).unwrap()).unwrap();
    let seeded = url::Url::parse(
        &compose_url(&desc, &endpoint(), &mut StdRng::seed_from_u64(3)).unwrap(),
    )
    .unwrap();
    assert_eq!(random.path(), seeded.path());

    let seed: u32 = random
        .query_pairs()
        .find(|(k, _)| k == "seed")
        .map(|(_, v)| v.parse().unwrap())
        .unwrap();
    assert!(seed < SEED_BOUND);
}

#[test]
fn seeds_are_in_range_and_spread() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 10_000;
    let mut distinct = HashSet::new();
    let mut buckets = [0u32; 10];
    for _ in 0..n {
        let seed = draw_seed(&mut rng);
        assert!(seed < SEED_BOUND);
        distinct.insert(seed);
        buckets[(seed / (SEED_BOUND / 10)) as usize] += 1;
    }
    assert!(distinct.len() >= 9_850, "distinct = {}", distinct.len());
    for count in buckets {
        assert!((800..=1200).contains(&count), "bucket = {count}");
    }
}
