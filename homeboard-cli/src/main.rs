mod logging;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::info;

use homeboard::{
    DocumentFormat, OutputDestination, OutputOptions, UiOptions, Widget, WidgetDocument,
    WidgetId, WidgetOverlayUi, emit, load_document, load_widget_document, settings_from_value,
};

#[derive(Debug, Parser)]
#[command(
    name = "homeboard",
    version,
    about = "Edit or remove a dashboard widget from the terminal"
)]
struct Cli {
    /// Widget document: {id, widget: {title, settingsSchema}, settings}
    #[arg(
        short = 'w',
        long = "widget",
        value_name = "PATH",
        conflicts_with_all = ["schema", "settings", "id"]
    )]
    widget: Option<PathBuf>,

    /// Settings schema for the widget
    #[arg(short = 's', long = "schema", value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Current settings for the widget
    #[arg(short = 'c', long = "settings", value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Widget id reported back in the outcome
    #[arg(long = "id", value_name = "ID")]
    id: Option<String>,

    /// Title shown on the overlay and dialog
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Defaults to stdout.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// List every validation error under the settings form
    #[arg(long = "show-error-list")]
    show_error_list: bool,

    /// Hide the key help in the footer
    #[arg(long = "no-help")]
    no_help: bool,

    /// Input poll interval in milliseconds
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 250)]
    tick_ms: u64,

    /// Append logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.verbose)?;

    let mut document = load_input(&cli)?;
    if let Some(title) = cli.title.as_ref() {
        document.widget.title = Some(title.clone());
    }
    let output = build_output_options(&cli);

    info!(widget = %document.id, "starting overlay session");
    let options = UiOptions::default()
        .with_error_list(cli.show_error_list)
        .with_help(!cli.no_help)
        .with_tick_rate(Duration::from_millis(cli.tick_ms));
    let mut ui = WidgetOverlayUi::new(document.id, document.widget).with_options(options);
    if let Some(settings) = document.settings {
        ui = ui.with_settings(settings);
    }
    let outcome = ui.run().map_err(Report::msg)?;
    info!(
        widget = %outcome.id,
        saved = outcome.saved,
        removed = outcome.removed,
        "overlay session finished"
    );

    emit(&outcome, &output).map_err(Report::msg)?;
    Ok(())
}

fn load_input(cli: &Cli) -> Result<WidgetDocument> {
    if let Some(path) = cli.widget.as_deref() {
        return load_widget_document(path).map_err(Report::msg);
    }
    if cli.schema.is_none() && cli.settings.is_none() {
        return Err(eyre!("provide --widget, or --schema and/or --settings"));
    }

    let mut widget = Widget::new();
    if let Some(path) = cli.schema.as_deref() {
        widget = widget.with_settings_schema(load_document(path).map_err(Report::msg)?);
    }
    let settings = match cli.settings.as_deref() {
        Some(path) => Some(read_settings(path)?),
        None => None,
    };
    Ok(WidgetDocument {
        id: WidgetId::new(cli.id.clone().unwrap_or_else(|| "widget".to_string())),
        widget,
        settings,
    })
}

fn read_settings(path: &Path) -> Result<homeboard::Settings> {
    let value = load_document(path).map_err(Report::msg)?;
    settings_from_value(value)
        .map_err(Report::msg)
        .wrap_err_with(|| format!("invalid settings in {}", path.display()))
}

fn build_output_options(cli: &Cli) -> OutputOptions {
    let destinations: Vec<OutputDestination> = if cli.outputs.is_empty() {
        vec![OutputDestination::Stdout]
    } else {
        cli.outputs
            .iter()
            .map(|raw| OutputDestination::parse(raw))
            .collect()
    };
    let format = destinations
        .iter()
        .find_map(|destination| match destination {
            OutputDestination::File(path) => Some(DocumentFormat::from_path(path)),
            OutputDestination::Stdout => None,
        })
        .unwrap_or(DocumentFormat::Json);
    OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations)
}
