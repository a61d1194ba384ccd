use clap::{Parser, Subcommand};
use deskscene_assets::TextureManifest;
use deskscene_common::{TextureSlot, ViewMode};
use deskscene_render::{DebugTextRenderer, FlyCamera, Frame, Renderer};
use deskscene_scene::Scene;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deskscene-cli", about = "CLI tool for desk scene inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Compose one frame with the default camera and print its draw list
    Frame {
        /// Framebuffer width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Framebuffer height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Use the orthographic projection
        #[arg(long)]
        ortho: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Decode every scene texture and report its format
    CheckAssets {
        /// Texture directory
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
    },
}

fn compose_default(width: u32, height: u32, ortho: bool) -> Frame {
    let mode = if ortho {
        ViewMode::Orthographic
    } else {
        ViewMode::Perspective
    };
    Frame::compose(&Scene::desk(), &FlyCamera::default(), mode, width, height)
}

fn check_assets(manifest: &TextureManifest) -> usize {
    let mut failures = 0;
    for slot in TextureSlot::ALL {
        match manifest.load(slot) {
            Ok(tex) => tracing::info!(
                slot = slot.name(),
                file = TextureManifest::file_name(slot),
                "ok: {:?} {}x{}, {} mips",
                tex.format,
                tex.width,
                tex.height,
                tex.mip_level_count()
            ),
            Err(e) => {
                failures += 1;
                tracing::error!(slot = slot.name(), "failed: {e}");
            }
        }
    }
    failures
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("deskscene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", deskscene_scene::crate_info());
            println!("render: {}", deskscene_render::crate_info());
            println!("input: {}", deskscene_input::crate_info());
            println!("assets: {}", deskscene_assets::crate_info());
            let scene = Scene::desk();
            println!(
                "desk scene: {} wedge rings, {} textures",
                scene.rings.len(),
                TextureSlot::COUNT
            );
        }
        Commands::Frame {
            width,
            height,
            ortho,
            json,
        } => {
            let frame = compose_default(width, height, ortho);
            tracing::debug!(draws = frame.draws.len(), "composed frame {width}x{height}");
            if json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&frame));
            }
        }
        Commands::CheckAssets { assets } => {
            let manifest = TextureManifest::new(assets);
            tracing::info!("checking textures in {}", manifest.root().display());
            let failures = check_assets(&manifest);
            if failures > 0 {
                anyhow::bail!("{failures} of {} textures failed to load", TextureSlot::COUNT);
            }
            tracing::info!("all {} textures OK", TextureSlot::COUNT);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_command_parses() {
        let cli = Cli::parse_from(["deskscene-cli", "frame", "--width", "1600", "--ortho"]);
        match cli.command {
            Commands::Frame {
                width,
                height,
                ortho,
                json,
            } => {
                assert_eq!((width, height), (1600, 600));
                assert!(ortho);
                assert!(!json);
            }
            _ => panic!("expected frame command"),
        }
    }

    #[test]
    fn default_frame_is_perspective() {
        let frame = compose_default(800, 600, false);
        assert_eq!(frame.projection.mode, ViewMode::Perspective);
        assert_eq!(frame.draws.len(), 39);
    }

    #[test]
    fn frame_json_lists_every_draw() {
        let frame = compose_default(640, 480, true);
        let value: serde_json::Value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["draws"].as_array().map(Vec::len), Some(39));
        assert_eq!(value["projection"]["mode"], "Orthographic");
    }

    #[test]
    fn complete_asset_dir_checks_clean() {
        let dir = tempfile::tempdir().unwrap();
        for slot in TextureSlot::ALL {
            let path = dir.path().join(TextureManifest::file_name(slot));
            image::RgbImage::new(2, 2).save(&path).unwrap();
        }
        assert_eq!(check_assets(&TextureManifest::new(dir.path())), 0);
    }

    #[test]
    fn missing_assets_are_counted() {
        let manifest = TextureManifest::new("/nonexistent/deskscene-assets");
        assert_eq!(check_assets(&manifest), TextureSlot::COUNT);
    }
}
