mod legend;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colorbar_guides::legend::colorbar::make_colorbar_scene;
use colorbar_image::svg::svg_to_png;
use colorbar_scales::scheme::ColorScheme;
use colorbar_svg::SvgRenderer;
use log::info;
use strum::IntoEnumIterator;

use crate::legend::RenderArgs;

/// Render color scale legends
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a colorbar legend to an SVG or PNG file
    Render(RenderArgs),

    /// List the named color schemes and their stops
    Schemes,
}

fn render(args: &RenderArgs) -> anyhow::Result<()> {
    let scale = args.color_scale()?;
    let (title, config) = args.legend()?;
    let scene = make_colorbar_scene(&scale, &title, &config)?;
    let svg = SvgRenderer::render_scene(&scene)?;
    write_output(&args.output, &svg, args.scale)?;
    info!("Saved {} colorbar to {}", scale.kind(), args.output.display());
    Ok(())
}

fn write_output(path: &Path, svg: &str, scale: f32) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let bytes = match extension.as_deref() {
        Some("svg") => svg.as_bytes().to_vec(),
        Some("png") => svg_to_png(svg, scale)?,
        _ => bail!(
            "Unsupported output file {}, expected .svg or .png",
            path.display()
        ),
    };
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn list_schemes() {
    for scheme in ColorScheme::iter() {
        println!("{scheme}\t{}", scheme.hex_stops().join(" "));
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logger
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(&args),
        Commands::Schemes => {
            list_schemes();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg_file() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("colorbar-{}.svg", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "colorbar",
            "render",
            "--domain",
            "0",
            "100",
            "--title",
            "Score",
            "--output",
            path_str.as_str(),
        ])?;
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        render(&args)?;

        let svg = fs::read_to_string(&path)?;
        fs::remove_file(&path)?;
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Score</text>"));
        Ok(())
    }

    #[test]
    fn test_unsupported_extension() {
        let result = write_output(Path::new("legend.gif"), "<svg/>", 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_domain_requires_two_values() {
        assert!(Cli::try_parse_from(["colorbar", "render", "--domain", "1"]).is_err());
    }
}
