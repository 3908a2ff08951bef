#![deny(unsafe_code)]
//! CLI binary for the backdrop-engine animated background system.
//!
//! Subcommands:
//! - `render <effect>` — advance an effect N fixed ticks, write PNG
//! - `list` — print available effects and themes

mod error;

use backdrop_core::{Effect, Recipe, Theme, Viewport};
use backdrop_effects::EffectKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

/// Fixed tick length used when advancing effects offline.
const TICK_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "backdrop", about = "Animated background effect CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Advance an effect for N ticks and write a PNG snapshot.
    Render {
        /// Effect name (e.g. "surface").
        effect: String,

        /// Snapshot width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Snapshot height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of 1/60 s ticks to advance before rasterizing.
        #[arg(short, long, default_value_t = 300)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Theme name (dark, light).
        #[arg(short, long, default_value = "dark")]
        theme: String,

        /// Pointer position "x,y" fed to interactive effects before stepping.
        #[arg(long)]
        pointer: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "backdrop.png")]
        output: PathBuf,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available effects and themes.
    List,
}

fn parse_pointer(raw: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{raw}': expected 'x,y'"));
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    Ok((
        x.trim().parse().map_err(|_| bad())?,
        y.trim().parse().map_err(|_| bad())?,
    ))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            let themes = Theme::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "effects": effects,
                    "themes": themes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
                println!("Themes:");
                println!("  {}", themes.join(", "));
            }
        }
        Command::Render {
            effect,
            width,
            height,
            steps,
            seed,
            theme,
            pointer,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut recipe = Recipe::new(&effect, width, height, seed);
            recipe.params = params;
            recipe.steps = steps;
            recipe.validate()?;

            let theme = Theme::from_name(&theme)?;
            let pointer = pointer.as_deref().map(parse_pointer).transpose()?;

            let viewport = Viewport::new(width as f64, height as f64);
            let mut eng =
                EffectKind::from_name(&recipe.effect, viewport, recipe.seed, &recipe.params, &theme)?;

            if let Some((x, y)) = pointer {
                eng.pointer_moved(x, y);
            }
            (0..recipe.steps).try_for_each(|_| eng.tick(TICK_SECONDS))?;

            backdrop_effects::snapshot::write_png(&eng, &theme, width, height, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "recipe": recipe,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({width}x{height}, {steps} ticks, seed {seed}) -> {}",
                    recipe.effect,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
