use clap::Parser;

use predict_form::form::{parse_assignment, Preset};

#[derive(Parser, Debug, Clone)]
#[command(name = "predict-form", about = "Submit a prediction form to a model service", version)]
pub struct Cli {
    /// Field value as NAME=VALUE. Can be used multiple times.
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE", value_parser = parse_assignment, action = clap::ArgAction::Append)]
    pub fields: Vec<(String, String)>,

    /// Predeclared form controls; unfilled ones fail validation.
    #[arg(long, value_enum, default_value_t = Preset::Custom)]
    pub preset: Preset,

    /// Service base URL (overrides PREDICT_BASE_URL).
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Endpoint path (overrides PREDICT_ENDPOINT).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides PREDICT_REQUEST_TIMEOUT).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Validate and print the JSON payload without sending it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// List the preset's fields and exit.
    #[arg(long = "list-fields")]
    pub list_fields: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
