//! # Signboard CLI
//!
//! Command-line interface for rendering, exporting and serving signboards.
//!
//! ## Usage
//!
//! ```bash
//! # Render a design to PNG
//! signboard render design.json --png preview.png
//!
//! # Export at 2x with a timestamped filename
//! signboard export design.json --out-dir exports/
//!
//! # Ask the design service for a new design
//! signboard generate --shop-name "Bean There" --business-type Cafe --png bean.png
//!
//! # List templates and business types
//! signboard catalog
//!
//! # Start the rendering server
//! signboard serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use signboard::{
    DesignDescription, EditorSession, SignboardConfig, SignboardError,
    export::encode_png,
    render::{FontBook, rasterize, surface::device_size},
    server,
    source::{DesignSource, GenerateRequest, HttpDesignSource},
};

/// Signboard - parametric signboard renderer
#[derive(Parser, Debug)]
#[command(name = "signboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (missing keys take defaults)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of TTF/OTF faces (overrides the config)
    #[arg(long, global = true, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Log filter, e.g. `info` or `signboard=debug`
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a design file to PNG
    Render {
        /// Design JSON file
        design: PathBuf,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        /// Upscale factor
        #[arg(long, default_value = "1")]
        scale: f32,
    },

    /// Export a design at the configured scale
    Export {
        /// Design JSON file
        design: PathBuf,

        /// Directory the PNG is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also send the design to the design service
        #[arg(long)]
        save: bool,
    },

    /// Fetch a new design from the design service
    Generate {
        #[arg(long)]
        shop_name: String,

        #[arg(long)]
        business_type: String,

        /// Template id
        #[arg(long)]
        template: Option<String>,

        /// Write the design JSON here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also render the design to this PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// List templates and business types offered by the design service
    Catalog,

    /// Start the HTTP rendering server
    Serve {
        /// Address to listen on (overrides the config)
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::new(level);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<SignboardConfig, SignboardError> {
    let mut config = match &cli.config {
        Some(path) => SignboardConfig::load(path)?,
        None => SignboardConfig::default(),
    };
    if let Some(dir) = &cli.font_dir {
        config.font_dir = Some(dir.clone());
    }
    Ok(config)
}

fn load_fonts(config: &SignboardConfig) -> Result<FontBook, SignboardError> {
    match &config.font_dir {
        Some(dir) => FontBook::load_dir(dir),
        None => Ok(FontBook::builtin()),
    }
}

fn read_design(path: &Path) -> Result<DesignDescription, SignboardError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_png(
    path: &Path,
    design: &DesignDescription,
    config: &SignboardConfig,
    fonts: &FontBook,
    scale: f32,
) -> Result<(), SignboardError> {
    let (w, h) = design.validate(config)?;
    device_size(w, h, scale)?;
    let surface = rasterize(design, w, h, scale, fonts);
    std::fs::write(path, encode_png(surface.image())?)?;
    println!("Saved to {}", path.display());
    Ok(())
}

async fn run(cli: Cli) -> Result<(), SignboardError> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Render { design, png, scale } => {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(SignboardError::Config(format!("scale must be positive, got {}", scale)));
            }
            let fonts = load_fonts(&config)?;
            let design = read_design(&design)?;
            write_png(&png, &design, &config, &fonts, scale)?;
        }

        Commands::Export { design, out_dir, save } => {
            let fonts = load_fonts(&config)?;
            let mut session = EditorSession::new(config.clone());
            session.load(read_design(&design)?)?;

            let exported = session.export(&fonts)?;
            std::fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(&exported.filename);
            std::fs::write(&path, &exported.png)?;
            println!("Saved to {} ({}x{})", path.display(), exported.width, exported.height);

            if save {
                let source = HttpDesignSource::new(&config.api_base_url)?;
                // Save failures are reported but do not undo the export.
                if let Err(e) = session.save(&source).await {
                    eprintln!("Warning: {}", e);
                }
            }
        }

        Commands::Generate {
            shop_name,
            business_type,
            template,
            out,
            png,
        } => {
            let source = HttpDesignSource::new(&config.api_base_url)?;
            let mut request = GenerateRequest::new(shop_name, business_type);
            if let Some(template) = template {
                request = request.with_template(template);
            }

            let mut session = EditorSession::new(config.clone());
            session.generate(&source, request).await?;
            let Some(design) = session.design() else {
                return Err(SignboardError::NoDesign);
            };

            let json = serde_json::to_string_pretty(design)?;
            match &out {
                Some(path) => {
                    std::fs::write(path, json)?;
                    println!("Saved to {}", path.display());
                }
                None => println!("{}", json),
            }

            if let Some(png) = png {
                let fonts = load_fonts(&config)?;
                write_png(&png, design, &config, &fonts, 1.0)?;
            }
        }

        Commands::Catalog => {
            let source = HttpDesignSource::new(&config.api_base_url)?;
            println!("Templates:");
            for (id, template) in source.templates().await? {
                println!("  {:<16} {}", id, template.name);
            }
            println!("\nBusiness types:");
            for kind in source.business_types().await? {
                println!("  {}", kind);
            }
        }

        Commands::Serve { listen } => {
            let mut config = config;
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            config.validate()?;
            let fonts = load_fonts(&config)?;
            server::serve(config, fonts).await?;
        }
    }

    Ok(())
}
