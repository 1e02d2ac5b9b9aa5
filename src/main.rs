//! ctledit - edit NONMEM control streams block by block.
//!
//! # Usage
//!
//! ```bash
//! ctledit show run001.ctl
//! ctledit render run001.ctl
//! ctledit edit run001.ctl --block '$PK' --with new_pk.txt --name run002
//! ctledit replay run001.ctl --log run002_log.json --name run003
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ctledit::edit::edit_block;
use ctledit::model::{Block, ControlStream};
use ctledit::replay::replay_file;

/// Edit NONMEM control streams block by block, with a replayable change log
#[derive(Parser, Debug)]
#[command(name = "ctledit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the blocks of a control stream
    Show {
        /// Control stream to inspect
        file: PathBuf,
    },
    /// Parse a control stream and print its normalized rendering
    Render {
        /// Control stream to render
        file: PathBuf,
    },
    /// Replace one block and save the result with its change log
    Edit {
        /// Control stream to edit
        file: PathBuf,

        /// Block to replace (e.g. '$PK')
        #[arg(short, long)]
        block: String,

        /// File holding the replacement text, or '-' for stdin
        #[arg(short, long, value_name = "PATH")]
        with: PathBuf,

        /// Basename for the saved model and log (defaults to the input stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Rebuild an edited stream from an original file and a change log
    Replay {
        /// The original control stream
        file: PathBuf,

        /// Change log written by earlier edits
        #[arg(short, long)]
        log: PathBuf,

        /// Basename to save the rebuilt model under; prints to stdout if omitted
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn load_stream(file: &Path) -> Result<ControlStream> {
    ControlStream::load(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Basename to save under when the user does not supply one.
fn default_name(file: &Path) -> String {
    file.file_stem()
        .map_or_else(|| "model".to_string(), |stem| stem.to_string_lossy().into_owned())
}

fn read_replacement(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read replacement text from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn show(file: &Path) -> Result<()> {
    let stream = load_stream(file)?;
    if stream.is_empty() {
        println!("(no blocks)");
        return Ok(());
    }
    for name in stream.names() {
        let instances = stream.get(name).unwrap_or_default();
        let lines: usize = instances.iter().map(Block::line_count).sum();
        println!("{name:<16} {:>2} instance(s) {lines:>4} line(s)", instances.len());
    }
    Ok(())
}

fn render(file: &Path) -> Result<()> {
    println!("{}", load_stream(file)?.render());
    Ok(())
}

fn edit(file: &Path, block: &str, with: &Path, name: Option<&str>, out_dir: &Path) -> Result<()> {
    let stream = load_stream(file)?;
    let replacement = read_replacement(with)?;

    let mut source = |_: &str, _: &str| Some(replacement.clone());
    let updated = edit_block(&stream, block, &mut source)
        .with_context(|| format!("Failed to edit block {block}"))?;

    let save_name = name.map_or_else(|| default_name(file), ToOwned::to_owned);
    updated
        .save(&save_name, out_dir)
        .with_context(|| format!("Failed to save {save_name} under {}", out_dir.display()))?;
    println!(
        "Saved {save_name}.ctl and {save_name}_log.json to {}",
        out_dir.display()
    );
    Ok(())
}

fn replay(file: &Path, log: &Path, name: Option<&str>, out_dir: &Path) -> Result<()> {
    let original = load_stream(file)?;
    let rebuilt = replay_file(&original, log)
        .with_context(|| format!("Failed to replay {}", log.display()))?;

    match name {
        Some(save_name) => {
            let path = rebuilt.save_model(save_name, out_dir).with_context(|| {
                format!("Failed to save {save_name} under {}", out_dir.display())
            })?;
            println!("Saved {}", path.display());
        }
        None => println!("{}", rebuilt.render()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    match cli.command {
        Command::Show { file } => show(&file),
        Command::Render { file } => render(&file),
        Command::Edit {
            file,
            block,
            with,
            name,
            out_dir,
        } => edit(&file, &block, &with, name.as_deref(), &out_dir),
        Command::Replay {
            file,
            log,
            name,
            out_dir,
        } => replay(&file, &log, name.as_deref(), &out_dir),
    }
}
