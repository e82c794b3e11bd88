#![deny(unsafe_code)]
//! CLI binary for the huewheel color picker.
//!
//! Subcommands:
//! - `render`: draw a picker, optionally set a color, write PNG
//! - `replay <script>`: run an interaction script, print emitted colors
//! - `convert`: print hex, RGB and HSL readouts of one color

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use huewheel_core::{hsl_to_rgb, Color, ColorPicker, Hsl, PickerConfig, Rgb};
use huewheel_scene::snapshot::write_png;
use huewheel_scene::{replay, Script};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "huewheel", about = "HSL hue-ring color picker")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    /// `HUEWHEEL_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// A color given as hex, RGB or HSL. At most one may be set.
#[derive(Args)]
#[group(multiple = false)]
struct ColorArg {
    /// Hex color, e.g. "#3366cc" or "f80".
    #[arg(long)]
    hex: Option<String>,

    /// RGB channels, e.g. "255,128,0".
    #[arg(long, value_delimiter = ',')]
    rgb: Option<Vec<u8>>,

    /// HSL triple, e.g. "210,60,50". The hue may be negative.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    hsl: Option<Vec<f64>>,
}

enum ColorInput {
    Rgb(Rgb),
    Hsl(Hsl),
}

impl ColorArg {
    fn parse(&self) -> Result<Option<ColorInput>, CliError> {
        if let Some(hex) = &self.hex {
            return Ok(Some(ColorInput::Rgb(Rgb::from_hex(hex)?)));
        }
        if let Some(rgb) = &self.rgb {
            let channels: [u8; 3] = rgb
                .as_slice()
                .try_into()
                .map_err(|_| CliError::Input("--rgb takes exactly three channels".into()))?;
            return Ok(Some(ColorInput::Rgb(Rgb::from(channels))));
        }
        if let Some(hsl) = &self.hsl {
            let triple: [f64; 3] = hsl
                .as_slice()
                .try_into()
                .map_err(|_| CliError::Input("--hsl takes exactly three values".into()))?;
            return Ok(Some(ColorInput::Hsl(Hsl::from(triple))));
        }
        Ok(None)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Draw a picker, optionally select a color, and write a PNG snapshot.
    Render {
        /// Surface side length in pixels.
        #[arg(short, long)]
        size: Option<usize>,

        /// Marker diameter in pixels.
        #[arg(short, long)]
        marker_width: Option<f64>,

        /// Picker config as a JSON string; flags override its keys.
        #[arg(long, default_value = "{}")]
        config: String,

        #[command(flatten)]
        color: ColorArg,

        /// Flatten transparent pixels over this hex color.
        #[arg(short, long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "picker.png")]
        output: PathBuf,
    },
    /// Replay a JSON interaction script and print every emitted color.
    Replay {
        /// Path to the script file.
        script: PathBuf,

        /// Also write the final surface as PNG.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Flatten transparent pixels over this hex color.
        #[arg(short, long)]
        background: Option<String>,
    },
    /// Show a color as hex, RGB and HSL.
    Convert {
        #[command(flatten)]
        color: ColorArg,
    },
}

fn describe(color: &Color) -> String {
    let Rgb { r, g, b } = color.rgb;
    let Hsl { h, s, l } = color.hsl;
    format!(
        "{} rgb({r}, {g}, {b}) hsl({h:.0}, {s:.0}%, {l:.0}%)",
        color.rgb.to_hex()
    )
}

fn parse_background(background: Option<&str>) -> Result<Option<Rgb>, CliError> {
    background
        .map(Rgb::from_hex)
        .transpose()
        .map_err(CliError::from)
}

fn snapshot(picker: &ColorPicker, background: Option<Rgb>, output: &Path) -> Result<(), CliError> {
    write_png(picker.surface(), background, output)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            size,
            marker_width,
            config,
            color,
            background,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&config)
                .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
            let mut config = PickerConfig::from_json(&params)?;
            if let Some(size) = size {
                config = config.with_size(size);
            }
            if let Some(marker_width) = marker_width {
                config = config.with_marker_width(marker_width);
            }
            let background = parse_background(background.as_deref())?;

            let mut picker = ColorPicker::from_config(config)?;
            match color.parse()? {
                Some(ColorInput::Rgb(rgb)) => picker.set_rgb(rgb),
                Some(ColorInput::Hsl(hsl)) => picker.set_hsl(hsl),
                None => {}
            }
            snapshot(&picker, background, &output)?;

            let selected = picker.get_color();
            if cli.json {
                let info = serde_json::json!({
                    "size": config.size,
                    "marker_width": config.marker_width,
                    "color": selected,
                    "hex": selected.rgb.to_hex(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("rendered {0}x{0} picker -> {1}", config.size, output.display());
                println!("{}", describe(&selected));
            }
        }
        Command::Replay {
            script,
            output,
            background,
        } => {
            let text = std::fs::read_to_string(&script)
                .map_err(|e| CliError::Io(format!("{}: {e}", script.display())))?;
            let parsed = Script::from_json(&text)?;
            let background = parse_background(background.as_deref())?;

            let result = replay(&parsed)?;
            if let Some(output) = &output {
                snapshot(&result.picker, background, output)?;
            }

            let final_color = result.final_color();
            if cli.json {
                let info = serde_json::json!({
                    "steps": parsed.steps.len(),
                    "events": result.events,
                    "final": final_color,
                    "output": output.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for color in &result.events {
                    println!("{}", describe(color));
                }
                eprintln!(
                    "replayed {} steps, {} colors emitted; final {}",
                    parsed.steps.len(),
                    result.events.len(),
                    final_color.rgb.to_hex()
                );
            }
        }
        Command::Convert { color } => {
            let color = match color.parse()? {
                Some(ColorInput::Rgb(rgb)) => Color::from_rgb(rgb),
                Some(ColorInput::Hsl(hsl)) => Color::from_rgb(hsl_to_rgb(hsl)),
                None => {
                    return Err(CliError::Input(
                        "convert needs one of --hex, --rgb or --hsl".into(),
                    ))
                }
            };
            if cli.json {
                let info = serde_json::json!({
                    "hex": color.rgb.to_hex(),
                    "rgb": color.rgb,
                    "hsl": color.hsl,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", describe(&color));
            }
        }
    }

    Ok(())
}

fn install_tracing(verbose: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let fmt_layer = fmt::layer().with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_env("HUEWHEEL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "huewheel=warn,huewheel_core=warn,huewheel_scene=warn",
            1 => "huewheel=info,huewheel_core=info,huewheel_scene=info",
            2 => "huewheel=debug,huewheel_core=debug,huewheel_scene=debug",
            _ => "huewheel=trace,huewheel_core=trace,huewheel_scene=trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = install_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn color_arg_parses_rgb_list() {
        let cli = Cli::try_parse_from(["huewheel", "convert", "--rgb", "255,128,0"]).unwrap();
        let Command::Convert { color } = cli.command else {
            panic!("expected convert");
        };
        match color.parse().ok().flatten() {
            Some(ColorInput::Rgb(rgb)) => assert_eq!(rgb, Rgb::new(255, 128, 0)),
            _ => panic!("expected rgb input"),
        }
    }

    #[test]
    fn color_args_are_mutually_exclusive() {
        let parsed = Cli::try_parse_from(["huewheel", "convert", "--hex", "#fff", "--rgb", "1,2,3"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn hsl_accepts_negative_hue() {
        let cli = Cli::try_parse_from(["huewheel", "convert", "--hsl", "-30,100,50"]).unwrap();
        let Command::Convert { color } = cli.command else {
            panic!("expected convert");
        };
        match color.parse().ok().flatten() {
            Some(ColorInput::Hsl(hsl)) => {
                assert_eq!(hsl, Hsl::new(-30.0, 100.0, 50.0));
                assert_eq!(hsl_to_rgb(hsl), hsl_to_rgb(Hsl::new(330.0, 100.0, 50.0)));
            }
            _ => panic!("expected hsl input"),
        }
    }

    #[test]
    fn bad_hex_is_input_error() {
        let cli = Cli::try_parse_from(["huewheel", "convert", "--hex", "#nope"]).unwrap();
        let Command::Convert { color } = cli.command else {
            panic!("expected convert");
        };
        let err = color.parse().err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn verbose_counts_repetitions() {
        let cli = Cli::try_parse_from(["huewheel", "-vv", "convert", "--hex", "#fff"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.json);
    }

    #[test]
    fn describe_rounds_hsl() {
        let color = Color::from_rgb(Rgb::new(255, 0, 0));
        assert_eq!(describe(&color), "#ff0000 rgb(255, 0, 0) hsl(0, 100%, 50%)");
    }
}
