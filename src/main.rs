//! Standalone viewer binary for the depthline scroll-driven 3D timeline.

use std::path::PathBuf;

use clap::Parser;
use depthline::{options::Options, TimelineError, Viewer};

#[derive(Parser, Debug)]
#[command(about = "Scroll-driven 3D visual timeline", version)]
struct Args {
    /// Directory the asset manifest paths are resolved against
    #[arg(long)]
    assets: Option<PathBuf>,

    /// TOML options file; missing sections fall back to defaults
    #[arg(long)]
    options: Option<PathBuf>,

    /// Window title
    #[arg(long, default_value = "Depthline")]
    title: String,
}

fn run(args: Args) -> Result<(), TimelineError> {
    let mut options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(root) = args.assets {
        options.assets.manifest.root = root;
    }

    let session = Viewer::builder()
        .with_options(options)
        .with_title(args.title)
        .build()
        .run()?;
    log::info!(
        "exited with {} textures loaded",
        session.registry().map_or(0, |r| r.texture_count())
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
