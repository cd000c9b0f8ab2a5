//! Command-line surface for `tweetshot`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use tweetshot_application::fields;

#[derive(Parser, Debug)]
#[command(
    name = "tweetshot",
    version,
    about = "Render posts to images via the TwitterShots API",
    long_about = None
)]
pub struct Cli {
    /// Config file (TOML or JSON); overrides the per-user config file
    #[arg(long, global = true, env = "TWEETSHOT_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. <https://api.twittershots.com>
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to file containing the API key (the key itself is read from TWEETSHOT_API_KEY)
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a single post
    Get(GetArgs),
    /// Render one post per input item
    Batch(BatchArgs),
    /// Check that the configured API key is accepted
    Verify,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Post id to render
    pub status_id: String,

    /// Output format: svg, png or html
    #[arg(long)]
    pub format: Option<String>,

    /// Color theme: light or dark
    #[arg(long)]
    pub theme: Option<String>,

    /// Logo: x, bluebird or none
    #[arg(long)]
    pub logo: Option<String>,

    /// Output mode: binary or url
    #[arg(long)]
    pub output_mode: Option<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Where to write a binary result (default: tweet.<format>)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    #[arg(long)]
    pub show_full_text: Option<bool>,
    #[arg(long)]
    pub show_timestamp: Option<bool>,
    #[arg(long)]
    pub show_views: Option<bool>,
    #[arg(long)]
    pub show_stats: Option<bool>,
    #[arg(long)]
    pub container_background: Option<String>,
    #[arg(long)]
    pub container_padding: Option<u32>,
    #[arg(long)]
    pub border_radius: Option<u32>,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input items: a JSON array or one JSON object per line
    #[arg(long)]
    pub items: PathBuf,

    /// Parameters as a JSON object; strings may reference item fields as {{ name }}
    #[arg(long)]
    pub params: PathBuf,

    /// Record failed items and keep going instead of aborting
    #[arg(long)]
    pub continue_on_error: bool,

    /// Directory for binary results, written as <index>-tweet.<format>
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

impl GetArgs {
    /// Converts the flags into parameters for a single-item batch.
    pub fn to_parameters(&self) -> Map<String, Value> {
        let mut parameters = Map::new();
        parameters.insert(fields::STATUS_ID.to_string(), Value::from(self.status_id.as_str()));

        let choices = [
            (fields::FORMAT, &self.format),
            (fields::THEME, &self.theme),
            (fields::LOGO, &self.logo),
            (fields::OUTPUT_MODE, &self.output_mode),
        ];
        for (field, value) in choices {
            if let Some(value) = value {
                parameters.insert(field.to_string(), Value::from(value.as_str()));
            }
        }

        parameters.insert(
            fields::ADDITIONAL_FIELDS.to_string(),
            Value::Object(self.overrides.to_map()),
        );
        parameters
    }
}

impl OverrideArgs {
    fn to_map(&self) -> Map<String, Value> {
        let entries = [
            ("showFullText", self.show_full_text.map(Value::from)),
            ("showTimestamp", self.show_timestamp.map(Value::from)),
            ("showViews", self.show_views.map(Value::from)),
            ("showStats", self.show_stats.map(Value::from)),
            (
                "containerBackground",
                self.container_background.as_deref().map(Value::from),
            ),
            ("containerPadding", self.container_padding.map(Value::from)),
            ("borderRadius", self.border_radius.map(Value::from)),
        ];

        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_get_to_parameters() {
        let cli = Cli::parse_from([
            "tweetshot",
            "get",
            "123",
            "--format",
            "png",
            "--show-stats",
            "false",
            "--container-padding",
            "8",
        ]);
        let Commands::Get(args) = cli.command else {
            unreachable!("parsed a get command")
        };

        assert_eq!(
            Value::Object(args.to_parameters()),
            json!({
                "statusId": "123",
                "format": "png",
                "additionalFields": { "showStats": false, "containerPadding": 8 }
            })
        );
    }

    #[test]
    fn test_batch_defaults() {
        let cli =
            Cli::parse_from(["tweetshot", "batch", "--items", "i.json", "--params", "p.json"]);
        let Commands::Batch(args) = cli.command else {
            unreachable!("parsed a batch command")
        };
        assert!(!args.continue_on_error);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }
}
