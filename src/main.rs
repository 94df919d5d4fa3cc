use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use readme_landing::render::{self, CmarkRenderer};
use readme_landing::{export, PageModel, Settings};

#[derive(Parser)]
#[command(name = "readme-landing", about = "Turn a README into a landing-page model")]
struct Cli {
    /// Settings file (default: ./landing.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page model as JSON
    Extract {
        /// Markdown file, or "-" for stdin
        input: String,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the ordered sections
    Sections {
        /// Markdown file, or "-" for stdin
        input: String,
    },
    /// Render sections and write a static HTML page
    Export {
        /// Markdown file, or "-" for stdin
        input: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load_from(cli.config.as_deref()).context("loading settings")?;

    match cli.command {
        Commands::Extract { input, pretty } => {
            let page = load_page(&input, &settings)?;
            let json = if pretty {
                serde_json::to_string_pretty(&page)?
            } else {
                serde_json::to_string(&page)?
            };
            println!("{}", json);
        }
        Commands::Sections { input } => {
            let page = load_page(&input, &settings)?;
            if page.sections.is_empty() {
                println!("No sections found.");
                return Ok(());
            }
            println!("{:>3} | {:<28} | {:<24} | {:>6}", "#", "Id", "Title", "Bytes");
            println!("{}", "-".repeat(70));
            for (i, s) in page.sections.iter().enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<24} | {:>6}",
                    i + 1,
                    truncate(&s.id, 28),
                    truncate(&s.title, 24),
                    s.content.len()
                );
            }
        }
        Commands::Export { input, output } => {
            let page = load_page(&input, &settings)?;
            let renderer = Arc::new(CmarkRenderer::from_settings(&settings));
            let rendered =
                render::render_sections(renderer, &page.sections, settings.render_concurrency)
                    .await;
            info!(
                sections = page.sections.len(),
                rendered = rendered.len(),
                failed = rendered.failed().len(),
                "sections rendered"
            );
            let html = export::to_html(&page, &rendered);
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "page written");
                }
                None => print!("{}", html),
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn load_page(input: &str, settings: &Settings) -> anyhow::Result<PageModel> {
    let bytes = read_input(input)?;
    let page = readme_landing::extract_bytes(&bytes, settings)
        .with_context(|| format!("extracting {}", input))?;
    info!(
        title = %page.title,
        sections = page.sections.len(),
        features = page.features.len(),
        "page model extracted"
    );
    Ok(page)
}

fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    let path = Path::new(input);
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
