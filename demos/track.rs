use clap::Parser as ClapParser;
use snowplow_payload::{Config, PageView, PayloadMap};
use std::{fs, path::PathBuf};
use tracing::error;

/// Page view payload example
#[derive(Debug, clap::Parser)]
struct Opts {
    /// The tracker configuration yaml file
    pub config: PathBuf,

    /// The URL of the page being tracked
    pub url: String,

    /// The page title
    #[arg(long)]
    pub title: Option<String>,

    /// The page referrer
    #[arg(long)]
    pub referrer: Option<String>,

    /// Additional JSON context
    #[arg(long)]
    pub context: Option<String>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();

    let cfg_str = fs::read_to_string(&opts.config).unwrap();

    let cfg = Config::from_yaml(&cfg_str).unwrap();

    let context: Option<serde_json::Value> = opts
        .context
        .as_deref()
        .map(|c| serde_json::from_str(c).unwrap());

    let page = PageView {
        url: opts.url,
        title: opts.title,
        referrer: opts.referrer,
    };

    let mut payload = PayloadMap::from_config(&cfg);
    if let Err(e) = payload.track_page_view(&page, context.as_ref(), None) {
        error!("{e}");
        return;
    }

    println!("{payload}");
}
