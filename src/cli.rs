use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, AppConfig};
use crate::error::{DisplayError, Result};
use crate::network::{LegacyMessageClient, MessageClient};
use crate::ui::{
    ConsoleNotifier, Container, Element, HostPage, LegacyMessageRenderer, MessageRenderer,
    RenderSettings,
};

#[derive(Parser, Debug)]
#[command(
    name = "message-display",
    version,
    about = "Fetch a message list and render it as HTML"
)]
pub struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    pub config: String,
    /// Use the blocking request mechanism
    #[arg(long)]
    pub legacy: bool,
    /// Interpolate message fields without HTML escaping
    #[arg(long)]
    pub raw: bool,
    /// Base for relative source urls
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load messages once and print the rendered output
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Message source url, rendered into a bare container
    #[arg(long, required_unless_present = "page", conflicts_with = "page")]
    pub url: Option<String>,
    /// Host page holding the container element
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,
    /// Id of the container element inside the host page
    #[arg(long)]
    pub container_id: Option<String>,
    /// Print only the container content instead of the whole page
    #[arg(long)]
    pub fragment_only: bool,
}

impl Cli {
    /// File, then `MESSAGE_DISPLAY_*` env, then flags.
    pub fn effective_config(&self) -> AppConfig {
        let mut app_config = config::load_config(&self.config);
        app_config.apply_env();
        self.apply_flags(&mut app_config);
        app_config
    }

    pub fn apply_flags(&self, app_config: &mut AppConfig) {
        if let Some(base_url) = self.base_url.clone() {
            app_config.base_url = Some(base_url);
        }
        if self.raw {
            app_config.escape_html = false;
        }
    }
}

/// Runs the parsed command and returns the text to print.
pub async fn run(cli: Cli, app_config: &AppConfig) -> Result<String> {
    let Command::Render(args) = cli.command;
    run_render(app_config, cli.legacy, args).await
}

/// Process exit status for a finished run.
pub fn exit_status(result: &Result<String>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn run_render(app_config: &AppConfig, legacy: bool, args: RenderArgs) -> Result<String> {
    let settings = app_config.render_settings()?;

    if let Some(path) = args.page {
        let document = fs::read_to_string(&path)?;
        let id = args
            .container_id
            .as_deref()
            .unwrap_or(&app_config.container_id);
        let page = HostPage::parse(&document, id)?;
        log::info!("Loaded container \"{id}\" from {}", path.display());

        let page = render_into(page, app_config, settings, legacy).await?;
        return Ok(if args.fragment_only {
            page.inner_html().to_string()
        } else {
            page.to_html()
        });
    }

    let url = args
        .url
        .ok_or_else(|| DisplayError::Config("either --url or --page is required".to_string()))?;
    let element = Element::new("div").with_attribute(&settings.url_attribute, &url);
    let element = render_into(element, app_config, settings, legacy).await?;
    Ok(element.inner_html().to_string())
}

async fn render_into<C>(
    container: C,
    app_config: &AppConfig,
    settings: RenderSettings,
    legacy: bool,
) -> Result<C>
where
    C: Container + Send + 'static,
{
    let timeout = app_config.request_timeout();

    if legacy {
        // the blocking client cannot run on an async worker
        return tokio::task::spawn_blocking(move || -> Result<C> {
            let client = LegacyMessageClient::new(timeout)?;
            let mut renderer =
                LegacyMessageRenderer::new(container, ConsoleNotifier, client, &settings)?;
            renderer.load_and_render()?;
            Ok(renderer.into_parts().0)
        })
        .await
        .map_err(|err| DisplayError::Config(format!("legacy renderer task failed: {err}")))?;
    }

    let client = MessageClient::new(timeout)?;
    let mut renderer = MessageRenderer::new(container, ConsoleNotifier, client, &settings)?;
    renderer.load_and_render().await?;
    Ok(renderer.into_parts().0)
}
