use calcsync::config::Config;
use calcsync::error::CalcError;
use calcsync::fraction;
use calcsync::sync::{EditStatus, SyncUpdate};
use calcsync::widgets::{self, WidgetKind};
use clap::{Parser, Subcommand};
use std::num::NonZeroU64;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "calcsync")]
#[command(about = "Multi-field calculator widgets and fraction rendering", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a widget's fields and auxiliary defaults
    Fields {
        #[arg(value_enum)]
        widget: WidgetKind,
    },

    /// Edit one field and print every field of the widget
    Convert {
        #[arg(value_enum)]
        widget: WidgetKind,

        /// Field id (e.g. "g", "annual", "fraction")
        field: String,

        /// Text typed into the field
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Auxiliary parameter applied before the edit (e.g. ingredient=honey)
        #[arg(long = "aux", value_name = "KEY=VALUE")]
        aux: Vec<String>,

        /// Print the update as JSON
        #[arg(long)]
        json: bool,
    },

    /// Round a number to the nearest fraction with a fixed denominator
    Fraction {
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Denominator (default: inches.precision from the configuration)
        #[arg(short, long)]
        denominator: Option<u64>,
    },

    /// Reduce a decimal to an exact fraction
    Reduce {
        #[arg(allow_hyphen_values = true)]
        decimal: String,

        /// Treat the input as a percentage (12.5 -> 1/8)
        #[arg(long)]
        percent: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Library diagnostics go through `log`; the subscriber picks them up
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Fields { widget } => list_fields(&config, widget),
        Commands::Convert {
            widget,
            field,
            value,
            aux,
            json,
        } => convert(&config, widget, &field, &value, &aux, json),
        Commands::Fraction { value, denominator } => fixed_fraction(&config, value, denominator),
        Commands::Reduce { decimal, percent } => reduce(&decimal, percent),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => Ok(Config::empty()),
    }
}

fn list_fields(config: &Config, kind: WidgetKind) -> Result<(), Box<dyn std::error::Error>> {
    let sync = widgets::build(kind, config)?;

    println!("Widget: {}", kind);
    println!("\nFields ({}):", sync.fields().count());
    for info in sync.field_info() {
        let note = if info.editable { "" } else { " [display-only]" };
        println!("  - {} ({}){}", info.id, info.label, note);
    }

    if !sync.aux().is_empty() {
        println!("\nParameters:");
        for (key, value) in sync.aux().iter() {
            println!("  - {} = {}", key, value);
        }
    }

    Ok(())
}

fn convert(
    config: &Config,
    kind: WidgetKind,
    field: &str,
    value: &str,
    aux: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = widgets::build(kind, config)?;

    for setting in aux {
        let (key, raw) = setting
            .split_once('=')
            .ok_or_else(|| format!("Expected KEY=VALUE, got '{}'", setting))?;
        sync.on_aux_text(key.trim(), raw);
    }

    let edit = sync.on_field_edit(field, value)?;
    if edit.status == EditStatus::Rejected {
        return Err(CalcError::InvalidNumber(value.to_string()).into());
    }
    let update = SyncUpdate {
        status: edit.status,
        ..sync.on_field_blur(field)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    let width = update.display.keys().map(String::len).max().unwrap_or(0);
    for info in sync.field_info() {
        let text = update.display.get(&info.id).map(String::as_str).unwrap_or("");
        let shown = if text.is_empty() { "-" } else { text };
        println!("{:width$}  {}", info.id, shown, width = width);
    }

    Ok(())
}

fn fixed_fraction(
    config: &Config,
    value: f64,
    denominator: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let denominator = denominator.unwrap_or(config.inches.precision);
    let denominator = NonZeroU64::new(denominator)
        .ok_or_else(|| CalcError::DivisionByZero("denominator must be positive".to_string()))?;
    let result = fraction::to_fixed_denominator_fraction(value, denominator)?;
    println!("{}", result);
    Ok(())
}

fn reduce(decimal: &str, percent: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = if percent {
        fraction::percent_to_fraction(decimal)?
    } else {
        fraction::to_reduced_fraction(decimal)?
    };
    println!("{}", result);
    if !result.is_whole() && result.integer_part != 0 {
        println!("({})", result.to_improper_string());
    }
    Ok(())
}
