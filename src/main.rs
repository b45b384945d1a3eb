mod cli;

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use predict_form::form::parse_field_input;
use predict_form::{ConsoleReporter, Config, Form, FormHandler, PredictClient, Reporter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("predict_form=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::Cli::parse();

    if args.list_fields {
        for name in args.preset.fields() {
            match args.preset.describe(name) {
                Some(d) => println!("{:<6} {}", name, d),
                None => println!("{}", name),
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Load config; flags win over rc file and env
    let mut cfg = Config::load();
    if let Some(url) = &args.base_url {
        cfg.set("PREDICT_BASE_URL", url.as_str());
    }
    if let Some(endpoint) = &args.endpoint {
        cfg.set("PREDICT_ENDPOINT", endpoint.as_str());
    }
    if let Some(secs) = args.timeout {
        cfg.set("PREDICT_REQUEST_TIMEOUT", secs.to_string());
    }

    let mut form = Form::with_preset(cfg.form_id(), args.preset);

    // Piped fields first, then --field
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        if !buf.trim().is_empty() {
            for (name, value) in parse_field_input(&buf).map_err(|e| anyhow!(e))? {
                form.set(&name, value);
            }
        }
    }
    for (name, value) in &args.fields {
        form.set(name, value.as_str());
    }

    let reporter = ConsoleReporter::detect(args.no_color);
    let client = PredictClient::from_config(&cfg)?;

    if args.dry_run {
        let fields = form.capture();
        if let Err(err) = fields.validate() {
            reporter.on_validation_error(&err);
            return Ok(ExitCode::FAILURE);
        }
        println!("POST {}", client.url());
        println!("{}", fields.to_payload().to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    let handler = FormHandler::attach(form, &cfg, client, reporter)?;
    let outcome = handler.submit().await;

    Ok(if outcome.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
