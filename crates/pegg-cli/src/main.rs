//! pegg CLI - generate egg scene descriptions
//!
//! Builds one of the bundled documents and writes its egg text to a file or
//! stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pegg::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pegg")]
#[command(about = "Generate Panda3D egg files", long_about = None)]
struct Cli {
    /// Log every entry as it is attached
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with render options (`indent`, `compact`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Indent with this many spaces per level
    #[arg(long, global = true, conflicts_with = "tabs")]
    indent: Option<usize>,

    /// Indent with one tab per level
    #[arg(long, global = true)]
    tabs: bool,

    /// Never collapse entries onto one line
    #[arg(long, global = true)]
    expanded: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// A cube centered on the origin
    Cube {
        /// Edge length
        #[arg(short, long, default_value_t = 2.0)]
        size: f64,
        /// Comment written at the top of the file
        #[arg(long)]
        comment: Option<String>,
        /// Output .egg file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// A textured unit quad with a material
    Quad {
        /// Image file for the texture
        #[arg(short, long, default_value = "texture.png")]
        texture: String,
        /// Output .egg file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    let options = render_options(&cli)?;
    match cli.command {
        Commands::Cube {
            size,
            comment,
            output,
        } => {
            let mut doc = pegg::primitives::cube(size)?;
            if let Some(text) = comment {
                doc.append_comment(&text)?;
            }
            write_document(&doc, output.as_deref(), &options)?;
        }
        Commands::Quad { texture, output } => {
            let doc = textured_quad(&texture)?;
            write_document(&doc, output.as_deref(), &options)?;
        }
    }

    Ok(())
}

/// Start from the config file, if any, then apply command-line overrides.
fn render_options(cli: &Cli) -> Result<RenderOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RenderOptions::from_toml_str(&source)?
        }
        None => RenderOptions::default(),
    };
    if let Some(width) = cli.indent {
        options.indent = " ".repeat(width);
    }
    if cli.tabs {
        options.indent = "\t".to_owned();
    }
    if cli.expanded {
        options.compact = false;
    }
    Ok(options)
}

fn write_document(doc: &Document, output: Option<&Path>, options: &RenderOptions) -> Result<()> {
    match output {
        Some(path) => {
            doc.export(path, options)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", doc.render_with(options)),
    }
    Ok(())
}

/// A unit quad in the XY plane with UVs, a material and a texture.
fn textured_quad(texture: &str) -> Result<Document> {
    let mut doc = Document::new();
    doc.append_comment("textured quad")?;
    doc.set_coordinate_system(CoordinateSystem::ZUp)?;

    let mut material = doc.add_material("Quad")?;
    material.set_diffuse(&[1.0, 1.0, 1.0, 1.0], None)?;
    material.set_shininess(32, None)?;

    let mut tex = doc.add_texture("Quad", texture)?;
    tex.set_format(TextureFormat::Rgba)?;
    tex.set_wrap(WrapMode::Repeat)?;
    tex.set_envtype(EnvType::Modulate)?;

    let mut group = doc.add_group("Quad")?;
    let mut pool = group.add_vertex_pool("Quad")?;
    let corners: [([f64; 3], [f64; 2]); 4] = [
        ([0.0, 0.0, 0.0], [0.0, 0.0]),
        ([1.0, 0.0, 0.0], [1.0, 0.0]),
        ([1.0, 1.0, 0.0], [1.0, 1.0]),
        ([0.0, 1.0, 0.0], [0.0, 1.0]),
    ];
    for (index, (position, uv)) in (0u32..).zip(corners) {
        let mut vertex = pool.add_vertex(index, &position, None)?;
        vertex.set_normal(&[0, 0, 1], None)?;
        vertex.add_uv(&uv, None, None)?;
    }

    let mut polygon = group.append_polygon(&[0, 1, 2, 3], "Quad")?;
    polygon.set_material_ref("Quad")?;
    polygon.append_texture_ref("Quad")?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["pegg", "cube"]);
        assert!(matches!(cli.command, Commands::Cube { size, .. } if size == 2.0));
        assert_eq!(render_options(&cli).unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["pegg", "--indent", "2", "--expanded", "cube", "--size", "4"]);
        assert_eq!(render_options(&cli).unwrap(), RenderOptions::new("  ", false));

        let cli = parse(&["pegg", "quad", "--tabs"]);
        assert_eq!(render_options(&cli).unwrap().indent, "\t");
    }

    #[test]
    fn test_indent_conflicts_with_tabs() {
        assert!(Cli::try_parse_from(["pegg", "--indent", "2", "--tabs", "cube"]).is_err());
        assert!(Cli::try_parse_from(["pegg"]).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join("pegg_cli_test_options.toml");
        fs::write(&path, "indent = \"\\t\\t\"\ncompact = false\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = parse(&["pegg", "--config", &path_arg, "cube"]);
        assert_eq!(render_options(&cli).unwrap(), RenderOptions::new("\t\t", false));

        let cli = parse(&["pegg", "--config", &path_arg, "--indent", "1", "cube"]);
        assert_eq!(render_options(&cli).unwrap().indent, " ");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_config_file() {
        let cli = parse(&["pegg", "--config", "/nonexistent/pegg.toml", "cube"]);
        assert!(render_options(&cli).is_err());
    }

    #[test]
    fn test_textured_quad() {
        let doc = textured_quad("bricks.png").unwrap();
        let text = doc.render("  ", true);
        assert!(text.starts_with("<Comment> { \"textured quad\" }\n<CoordinateSystem> { Z-up }\n"));
        assert!(text.contains("<Texture> Quad {\n  \"bricks.png\"\n"));
        assert!(text.contains("<MRef> { Quad }"));
        assert!(text.contains("<TRef> { Quad }"));
        assert_eq!(text.matches("<UV> { ").count(), 4);
    }
}
