use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use storyscape::{
    BackdropConfig, BackdropProps, BackdropSession, BackgroundDescriptor, BackgroundPosition,
    Canvas, Completion, DefaultLoader, FsLoader, ShotSize, StoryscapeError, Style,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyscape", version)]
struct Cli {
    /// Config JSON overriding the defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the image-generation URL for a story context.
    Prompt(PromptArgs),
    /// Play a sequence of scenes through the transition engine and write one frame as PNG.
    Frame(FrameArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    #[arg(long)]
    genre: String,

    #[arg(long)]
    mood: String,

    /// `realistic` or `stylized`.
    #[arg(long, default_value = "stylized")]
    style: Style,

    /// Pin the RNG so the seed (and URL) is reproducible.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the prompt text instead of the URL.
    #[arg(long, default_value_t = false)]
    text: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene image as `PATH` or `PATH@SHOT` (e.g. `castle.png@close_up`). Repeatable.
    /// A suffix that does not name a shot size stays part of the path.
    #[arg(long = "scene", required = true)]
    scenes: Vec<SceneArg>,

    /// Seconds between consecutive scene changes.
    #[arg(long, default_value_t = 2.0)]
    hold: f64,

    /// Seconds after the last scene change at which the frame is captured.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    #[arg(long, default_value_t = false)]
    blur: bool,

    /// Defaults to the configured brightness.
    #[arg(long)]
    brightness: Option<f32>,

    #[arg(long, default_value = "center")]
    position: BackgroundPosition,

    #[arg(long, default_value_t = 960)]
    width: u32,

    #[arg(long, default_value_t = 540)]
    height: u32,

    /// Give up on a preload after this many seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Debug)]
struct SceneArg {
    src: String,
    shot: Option<ShotSize>,
}

impl FromStr for SceneArg {
    type Err = StoryscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A suffix that is not a shot size belongs to the path (`castle@2x.png`).
        if let Some((src, shot)) = s.rsplit_once('@')
            && !src.is_empty()
            && let Ok(shot) = shot.parse::<ShotSize>()
        {
            return Ok(Self {
                src: src.to_owned(),
                shot: Some(shot),
            });
        }
        Ok(Self {
            src: s.to_owned(),
            shot: None,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Prompt(args) => cmd_prompt(args, &cfg),
        Command::Frame(args) => cmd_frame(args, &cfg),
        Command::Config => {
            println!("{}", BackdropConfig::default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BackdropConfig> {
    match path {
        Some(path) => BackdropConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(BackdropConfig::default()),
    }
}

fn cmd_prompt(args: PromptArgs, cfg: &BackdropConfig) -> anyhow::Result<()> {
    let desc = BackgroundDescriptor::new(args.genre, args.mood).with_style(args.style);
    if args.text {
        println!("{}", storyscape::compose_prompt_text(&desc));
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let url = storyscape::compose_url(&desc, &cfg.endpoint, &mut rng)?;
    println!("{url}");
    Ok(())
}

fn cmd_frame(args: FrameArgs, cfg: &BackdropConfig) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.width, args.height)?;
    let loader = DefaultLoader::new(FsLoader::new())?;
    let mut session = BackdropSession::new(Arc::new(loader), cfg.transition.clone());
    let brightness = args
        .brightness
        .unwrap_or(cfg.transition.default_brightness);
    let timeout = Duration::from_secs(args.timeout_secs);

    for (i, scene) in args.scenes.iter().enumerate() {
        if i > 0 {
            session.advance(args.hold);
        }
        session.update(BackdropProps {
            src: scene.src.clone(),
            should_blur: args.blur,
            brightness,
            position: args.position,
            shot: scene.shot,
        });
        for completion in session.wait_pending(timeout) {
            if completion == Completion::Failed {
                eprintln!("scene '{}' failed to load; keeping previous backdrop", scene.src);
            }
        }
    }
    session.advance(args.at);

    let frame = session.render(canvas)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} layer(s))",
        args.out.display(),
        session.layers().len()
    );
    Ok(())
}
