//! Command-line driver for the color picker engine.
//!
//! Prints how each color argument is read and rendered, and with `--drag`
//! runs a simulated drag across the picker surface, printing the debounced
//! publishes as they arrive.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use colorpick::{
    try_parse, ColorFormat, ColorPicker, ConfigError, DebouncedEmitter, PickerConfig, PickerError,
    FALLBACK_COLOR,
};

const USAGE: &str = "usage: colorpick [--config PATH] [--format hex|rgb] [--drag] COLOR...";

/// Exit status for bad arguments and unreadable configuration
const EXIT_USAGE: u8 = 2;

/// Exit status when the picker itself fails
const EXIT_FAILURE: u8 = 1;

/// Pointer events in the simulated drag
const DRAG_STEPS: u32 = 40;

/// Delay between simulated pointer events, well under the quiet period
const DRAG_EVENT_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    format: Option<ColorFormat>,
    drag: bool,
    colors: Vec<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--format" => {
                    let format = args.next().ok_or("--format needs a value")?;
                    parsed.format = Some(format.parse().map_err(|e| format!("{e}"))?);
                }
                "--drag" => parsed.drag = true,
                "-h" | "--help" => return Err(String::new()),
                flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
                _ => parsed.colors.push(arg),
            }
        }
        if parsed.colors.is_empty() && !parsed.drag {
            return Err("no colors given".to_string());
        }
        Ok(parsed)
    }

    /// Read the config file if one was given and apply command-line overrides.
    fn config(&self) -> Result<PickerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::load(path)?,
            None => PickerConfig::default(),
        };
        if let Some(format) = self.format {
            config.output_format = format;
        }
        Ok(config)
    }
}

/// Why the binary stopped early.
#[derive(Debug)]
enum Failure {
    /// Bad arguments. An empty message means help was requested.
    Usage(String),
    Config(ConfigError),
    Picker(PickerError),
}

impl Failure {
    fn exit_status(&self) -> u8 {
        match self {
            Failure::Usage(_) | Failure::Config(_) => EXIT_USAGE,
            Failure::Picker(_) => EXIT_FAILURE,
        }
    }

    fn report(&self) {
        match self {
            Failure::Usage(message) => {
                if !message.is_empty() {
                    eprintln!("error: {message}");
                }
                eprintln!("{USAGE}");
            }
            Failure::Config(e) => eprintln!("error: {e}"),
            Failure::Picker(e) => eprintln!("error: {e}"),
        }
    }
}

/// Parse arguments and load configuration, before logging is set up.
fn prepare(args: impl Iterator<Item = String>) -> Result<(Args, PickerConfig), Failure> {
    let args = Args::parse(args).map_err(Failure::Usage)?;
    let config = args.config().map_err(Failure::Config)?;
    Ok((args, config))
}

fn main() -> ExitCode {
    let (args, config) = match prepare(std::env::args().skip(1)) {
        Ok(prepared) => prepared,
        Err(failure) => {
            failure.report();
            return ExitCode::from(failure.exit_status());
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let failure = Failure::Picker(e);
            failure.report();
            ExitCode::from(failure.exit_status())
        }
    }
}

fn run(args: &Args, config: &PickerConfig) -> Result<(), PickerError> {
    if !args.colors.is_empty() {
        describe_all(&args.colors, config)?;
    }
    if args.drag {
        run_drag(config, args.colors.first().map(String::as_str))?;
    }
    Ok(())
}

/// Describe every color, then publish the last one once the burst settles.
fn describe_all(colors: &[String], config: &PickerConfig) -> Result<(), PickerError> {
    let format = config.output_format;
    let mut settled = DebouncedEmitter::spawn(config.quiet_period(), |value: String| {
        println!("settled on {value}");
    })?;
    for color in colors {
        describe(color);
        settled.notify(colorpick::parse(color).format(format));
    }
    thread::sleep(config.quiet_period() * 4);
    settled.dispose();
    Ok(())
}

fn describe(text: &str) {
    match try_parse(text) {
        Ok(hsv) => println!(
            "{text:>24}  hsv({}, {:.3}, {:.3}, {})  {}  {}",
            hsv.hue,
            hsv.saturation,
            hsv.value,
            hsv.opacity,
            hsv.format(ColorFormat::Hex),
            hsv.format(ColorFormat::Rgb)
        ),
        Err(e) => println!(
            "{text:>24}  {e}; falls back to {}",
            FALLBACK_COLOR.format(ColorFormat::Hex)
        ),
    }
}

/// Drag from the bottom-left (black) to the top-right (full color) corner.
fn run_drag(config: &PickerConfig, start: Option<&str>) -> Result<(), PickerError> {
    let mut picker = ColorPicker::new(config, |value| println!("published {value}"))?;
    if let Some(start) = start {
        picker.set_input_value(start);
    }
    let edge = picker.surface_pixels();
    let settle = config.quiet_period() * 4;

    println!("dragging across {edge} px surface from {}", picker.formatted());
    picker.press(0.0, edge);
    for step in 1..=DRAG_STEPS {
        let t = f64::from(step) / f64::from(DRAG_STEPS);
        picker.pointer_move(t * edge, (1.0 - t) * edge);
        thread::sleep(DRAG_EVENT_INTERVAL);
    }
    picker.release();
    thread::sleep(settle);

    println!("sweeping hue");
    let start_hue = picker.current().hue;
    for offset in (0..=360).step_by(30) {
        picker.set_hue(start_hue + offset);
    }
    thread::sleep(settle);

    println!("fading opacity, then disposing mid quiet period");
    picker.set_opacity(0.5);
    picker.dispose();
    thread::sleep(settle);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_colors_and_flags() {
        let parsed = Args::parse(args(&["--format", "rgb", "#FF0000", "rgb(0,0,255)"])).unwrap();
        assert_eq!(parsed.format, Some(ColorFormat::Rgb));
        assert!(!parsed.drag);
        assert_eq!(parsed.colors, vec!["#FF0000", "rgb(0,0,255)"]);
    }

    #[test]
    fn test_drag_alone_is_enough() {
        let parsed = Args::parse(args(&["--drag"])).unwrap();
        assert!(parsed.drag);
        assert!(parsed.colors.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert_eq!(
            Args::parse(args(&["--bogus"])).unwrap_err(),
            "unknown option --bogus"
        );
        assert!(Args::parse(args(&[])).is_err());
        assert!(Args::parse(args(&["--format", "cmyk", "#FFF"])).is_err());
        assert_eq!(
            Args::parse(args(&["#FFF", "--format"])).unwrap_err(),
            "--format needs a value"
        );
        assert_eq!(
            Args::parse(args(&["#FFF", "--config"])).unwrap_err(),
            "--config needs a path"
        );
    }

    #[test]
    fn test_help_is_an_empty_usage_message() {
        assert_eq!(Args::parse(args(&["--help"])).unwrap_err(), "");
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let (_, config) = prepare(args(&["--format", "rgb", "#FFF"])).unwrap();
        assert_eq!(config.output_format, ColorFormat::Rgb);
    }

    #[test]
    fn test_bad_arguments_exit_with_usage_status() {
        let failure = prepare(args(&["--bogus"])).unwrap_err();
        assert!(matches!(failure, Failure::Usage(_)));
        assert_eq!(failure.exit_status(), EXIT_USAGE);
    }

    #[test]
    fn test_missing_config_exits_with_usage_status() {
        let failure =
            prepare(args(&["--config", "/nonexistent/colorpick/config.json", "#FFF"])).unwrap_err();
        assert!(matches!(failure, Failure::Config(ConfigError::IoError(_))));
        assert_eq!(failure.exit_status(), 2);
    }

    #[test]
    fn test_picker_failure_exits_with_failure_status() {
        let invalid = PickerConfig {
            size: 0.0,
            ..PickerConfig::default()
        };
        let failure = Failure::Picker(ColorPicker::new(&invalid, |_| {}).unwrap_err());
        assert_eq!(failure.exit_status(), EXIT_FAILURE);
    }
}
