use clap::{Parser, Subcommand};
use forum_markup::{
    assemble_with_config, render_html, resolve_and_open, tokenize, Config, HtmlRenderer,
    MarkupError, MarkupResult, Navigator,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forum-render")]
#[command(about = "Inspect and render forum post markup")]
struct Cli {
    /// YAML render config (classes, overlap policy)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the inline segments of each file as JSON
    Tokenize { files: Vec<PathBuf> },
    /// Print the render nodes of each file as JSON
    Assemble { files: Vec<PathBuf> },
    /// Render each file to HTML
    Html {
        files: Vec<PathBuf>,
        /// Post id passed to poll widgets
        #[arg(long)]
        post_id: Option<String>,
    },
    /// Resolve link targets the way a reader's click would
    Resolve { hrefs: Vec<String> },
}

/// Prints navigation requests instead of opening a browser.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn open_in_new_context(&mut self, url: &str) -> MarkupResult<()> {
        println!("{}", url);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let exit_code = match cli.command {
        Command::Tokenize { files } => for_each_file(&files, |content| {
            to_json(&tokenize(content))
        }),
        Command::Assemble { files } => for_each_file(&files, |content| {
            to_json(&assemble_with_config(content, &config))
        }),
        Command::Html { files, post_id } => for_each_file(&files, |content| match &post_id {
            Some(id) => {
                let nodes = assemble_with_config(content, &config);
                Ok(HtmlRenderer::new(&config)
                    .with_post_id(id.as_str())
                    .render(&nodes))
            }
            None => Ok(render_html(content, &config)),
        }),
        Command::Resolve { hrefs } => {
            let mut navigator = StdoutNavigator;
            let mut code = 0;
            for href in &hrefs {
                if let Err(e) = resolve_and_open(href, &mut navigator) {
                    eprintln!("✗ {}: {}", href, e);
                    code = 1;
                }
            }
            code
        }
    };

    process::exit(exit_code);
}

/// Run `render` on every file, printing output or a per-file error.
/// Returns the process exit code.
fn for_each_file<F>(files: &[PathBuf], render: F) -> i32
where
    F: Fn(&str) -> MarkupResult<String>,
{
    if files.is_empty() {
        eprintln!("No input files given");
        return 1;
    }

    let mut exit_code = 0;
    for path in files {
        match read_file(path).and_then(|content| render(&content)) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("✗ {} has errors:", path.display());
                eprintln!("  {}", e);
                exit_code = 1;
            }
        }
    }
    exit_code
}

fn read_file(path: &Path) -> MarkupResult<String> {
    fs::read_to_string(path).map_err(|e| MarkupError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> MarkupResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| MarkupError::SerializationError(e.to_string()))
}
