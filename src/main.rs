use anyhow::Context;
use clap::Parser;
use emi_calc::adapters::{AsciiPieChart, JsonChart, JsonReport, NoChart, PieHandle, TextDisplay};
use emi_calc::app::session::{run_session, MessageTarget};
use emi_calc::core::{ChartRenderer, DisplaySink};
use emi_calc::utils::logger;
use emi_calc::{AppConfig, CliConfig, EmiEngine, EmiError, OutputFormat};
use std::io;

type Chart = Box<dyn ChartRenderer<Handle = PieHandle>>;

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    // Merge the config file with command-line overrides and validate
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(config, cli.interactive) {
        // Loan errors carry a severity for the exit code; anything else exits 1
        match e.downcast_ref::<EmiError>() {
            Some(emi_error) => {
                tracing::error!("{:#}", e);
                fail(emi_error)
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(config: AppConfig, interactive: bool) -> anyhow::Result<()> {
    let validator = config
        .build_validator()
        .context("building input validator")?;

    // Results go to stdout in the chosen format
    let display: Box<dyn DisplaySink> = match config.format {
        OutputFormat::Text => Box::new(TextDisplay::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonReport::new(io::stdout())),
    };
    // The chart follows the result format unless disabled
    let chart: Chart = match (config.chart, config.format) {
        (false, _) => Box::new(NoChart),
        (true, OutputFormat::Text) => Box::new(AsciiPieChart::new(io::stdout(), config.chart_width)),
        (true, OutputFormat::Json) => Box::new(JsonChart::new(io::stdout())),
    };

    let messages = MessageTarget::for_format(config.format);
    let mut engine = EmiEngine::new(config.form, validator, config.zero_rate, display, chart);

    // Initial calculation, as on page load.
    engine.run().context("initial calculation")?;

    if interactive {
        tracing::info!("Interactive mode: type 'help' for commands, 'quit' to leave");
        let mut replies = messages.writer();
        let runs = run_session(&mut engine, io::stdin().lock(), &mut replies)
            .context("interactive session")?;
        tracing::info!("Recalculated {} times", runs);
    }

    Ok(())
}

fn fail(e: &EmiError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
