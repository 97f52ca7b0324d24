use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use storefront_kit::delivery::{ImageFormat, Quality, UrlBuilder, markup};
use storefront_kit::{catalog, config, output};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storefront-kit")]
#[command(about = "Image delivery URLs for storefront front ends")]
#[command(long_about = "\
Image delivery URLs for storefront front ends

Rewrites media-CDN URLs into resized/recompressed variants by inserting
transformation directives after the /upload/ segment:

  https://res.cloudinary.com/demo/upload/sample.jpg
  https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/sample.jpg

URLs from other hosts are printed unchanged.

Run 'storefront-kit gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Per-call overrides of the configured defaults.
#[derive(clap::Args, Clone)]
struct VariantArgs {
    /// Target pixel width
    #[arg(long)]
    width: Option<u32>,
    /// Compression hint: auto, a number like 80, or a named value like auto:good
    #[arg(long)]
    quality: Option<Quality>,
    /// Target encoding (webp, jpg, png, avif, auto, ...)
    #[arg(long)]
    format: Option<ImageFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the delivery URL for an image
    Url {
        src: String,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Print the 1x/2x density srcset for an image
    Srcset {
        src: String,
        /// Target pixel width (defaults to the configured width)
        #[arg(long)]
        width: Option<u32>,
    },
    /// Print a lazily loaded <img> tag for an image
    Img {
        src: String,
        /// Alternative text
        #[arg(long, default_value = "")]
        alt: String,
        /// Target pixel width (defaults to the configured width)
        #[arg(long)]
        width: Option<u32>,
    },
    /// Rewrite a JSON array of image references (file or stdin) into JSON records
    Rewrite {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Url { src, variant } => {
            let builder = load_builder(&cli.config)?;
            let mut options = builder.defaults.clone();
            if let Some(width) = variant.width {
                options.width = width;
            }
            if let Some(quality) = variant.quality {
                options.quality = quality;
            }
            if let Some(format) = variant.format {
                options.format = format;
            }
            let url = builder.url_with(&src, &options);
            output::print_url(&src, &url);
        }
        Command::Srcset { src, width } => {
            let builder = load_builder(&cli.config)?;
            let width = width.unwrap_or(builder.defaults.width);
            let candidates = builder.srcset_candidates(&src, width);
            output::print_srcset(
                candidates
                    .as_ref()
                    .map(|(one_x, two_x)| (one_x.as_str(), two_x.as_str())),
            );
        }
        Command::Img { src, alt, width } => {
            let builder = load_builder(&cli.config)?;
            let width = width.unwrap_or(builder.defaults.width);
            println!(
                "{}",
                markup::responsive_img(&builder, &src, &alt, width).into_string()
            );
        }
        Command::Rewrite { file } => {
            let builder = load_builder(&cli.config)?;
            let records = match file {
                Some(path) => catalog::rewrite_reader(&builder, std::fs::File::open(path)?)?,
                None => catalog::rewrite_reader(&builder, std::io::stdin().lock())?,
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
            output::print_rewrite_summary(&records);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_builder(dir: &Path) -> Result<UrlBuilder, config::ConfigError> {
    Ok(config::load_config(dir)?.url_builder())
}
