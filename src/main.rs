// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the client, run the menu.
// - Returns `anyhow::Result` so startup errors are printed with context.

use std::io::{self, IsTerminal};
use wikifetch_cli::api::WikiClient;
use wikifetch_cli::config::Settings;
use wikifetch_cli::ui::{install_interrupt_handler, is_interrupted, main_menu, LinePrompt, TermPrompt};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; `RUST_LOG` overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    install_interrupt_handler()?;

    let settings = Settings::from_env()?;
    let api = WikiClient::from_settings(&settings)?;
    log::debug!("Using API endpoint {}", api.base_url());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // dialoguer needs a real terminal; piped input falls back to plain reads.
    let result = if io::stdin().is_terminal() {
        main_menu(&api, &mut TermPrompt, &mut out, &settings)
    } else {
        let stdin = io::stdin();
        let mut prompt = LinePrompt::new(stdin.lock(), io::stderr());
        main_menu(&api, &mut prompt, &mut out, &settings)
    };

    match result {
        // dialoguer reports Ctrl-C inside a raw-mode read as an error
        // instead of a signal; treat it like the handler does.
        Err(e) if is_interrupted(&e) => Ok(()),
        other => other,
    }
}
