// UI layer: the numbered text menu. Input comes through the `Prompt`
// trait (dialoguer on a real terminal, plain line reads otherwise) and all
// output goes to a caller-supplied writer, which keeps the loop testable.

use crate::api::{ArticleSource, SearchResult};
use crate::config::Settings;
use crate::display::display_article;
use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Source of user input, one line at a time.
pub trait Prompt {
    /// Show `prompt` and read a line without its trailing newline.
    /// `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Interactive prompt backed by `dialoguer`, used when stdin is a TTY.
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(line))
    }
}

/// Line-oriented prompt over any reader. Prompts are echoed to `echo`.
pub struct LinePrompt<R, W> {
    reader: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, echo: W) -> Self {
        LinePrompt { reader, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

/// What the menu does after an action finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Input ran out inside a sub-prompt.
    Exit,
}

/// Main menu loop. Runs until the user picks "Exit" or input runs out.
///
/// Lookups never fail from the loop's point of view: the `ArticleSource`
/// already turned errors into "not found". Only terminal I/O errors are
/// returned.
pub fn main_menu<S, P, W>(api: &S, prompt: &mut P, out: &mut W, settings: &Settings) -> Result<()>
where
    S: ArticleSource,
    P: Prompt,
    W: Write,
{
    loop {
        writeln!(out)?;
        writeln!(out, "Wikipedia Content Fetcher")?;
        writeln!(out, "1. Search for a page")?;
        writeln!(out, "2. Get page by exact title")?;
        writeln!(out, "3. Get random article")?;
        writeln!(out, "4. Exit")?;
        writeln!(out)?;
        out.flush()?;

        let Some(choice) = prompt.read_line("Enter your choice (1-4)")? else {
            break;
        };

        let flow = match choice.trim() {
            "1" => handle_search(api, prompt, out, settings)?,
            "2" => handle_title(api, prompt, out, settings)?,
            "3" => {
                let article = with_spinner("Fetching a random article...", || api.fetch_random());
                display_article(out, &article, settings.width)?;
                Flow::Continue
            }
            "4" => break,
            _ => {
                writeln!(out, "Invalid choice. Please try again.")?;
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            break;
        }
    }
    writeln!(out, "Goodbye!")?;
    out.flush()?;
    Ok(())
}

/// Search, list the hits and optionally show one of them.
fn handle_search<S, P, W>(api: &S, prompt: &mut P, out: &mut W, settings: &Settings) -> Result<Flow>
where
    S: ArticleSource,
    P: Prompt,
    W: Write,
{
    let Some(query) = prompt.read_line("Enter search query")? else {
        return Ok(Flow::Exit);
    };
    let results = with_spinner("Searching...", || api.search(&query, settings.search_limit));

    if results.is_empty() {
        writeln!(out, "No results found.")?;
        return Ok(Flow::Continue);
    }

    writeln!(out)?;
    writeln!(out, "Search results:")?;
    for (i, result) in results.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, result.title)?;
    }
    writeln!(out)?;
    out.flush()?;

    let Some(selection) = prompt.read_line("Enter number to view content (or press Enter to skip)")?
    else {
        return Ok(Flow::Exit);
    };
    if let Some(picked) = pick_result(&results, &selection) {
        let article = with_spinner("Loading article...", || api.fetch_by_title(&picked.title));
        display_article(out, &article, settings.width)?;
    }
    Ok(Flow::Continue)
}

fn handle_title<S, P, W>(api: &S, prompt: &mut P, out: &mut W, settings: &Settings) -> Result<Flow>
where
    S: ArticleSource,
    P: Prompt,
    W: Write,
{
    let Some(title) = prompt.read_line("Enter exact page title")? else {
        return Ok(Flow::Exit);
    };
    let article = with_spinner("Loading article...", || api.fetch_by_title(&title));
    display_article(out, &article, settings.width)?;
    Ok(Flow::Continue)
}

/// True when `err` comes from a read cut short by Ctrl-C.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
    })
}

/// Make SIGINT end the session with status 0 wherever it arrives: between
/// prompts, during a request, or while a piped read blocks.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        eprintln!();
        log::debug!("Interrupted, exiting");
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")
}

/// A 1-based index typed by the user, digits only. Anything else is a skip.
fn pick_result<'a>(results: &'a [SearchResult], selection: &str) -> Option<&'a SearchResult> {
    let selection = selection.trim();
    if selection.is_empty() || !selection.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let index: usize = selection.parse().ok()?;
    if index == 0 {
        return None;
    }
    results.get(index - 1)
}

/// Run `work` while a spinner is shown on stderr. indicatif hides the
/// spinner when stderr is not a terminal.
fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}
