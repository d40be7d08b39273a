//! `photogrid shell` - the gallery page, interactively.
//!
//! Loads once on start, then reads one command per line. Every command
//! re-renders from the current snapshot; mutations re-list on success.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use super::{AppGallery, Layout};
use crate::client::PhotoStore;
use crate::gallery::{Confirm, DeleteOutcome, Gallery, Notifier, UploadOutcome, render};
use crate::ui::StdinConfirm;
use crate::utils::{format_bytes, split_words};

const PROMPT: &str = "photogrid> ";

const HELP: &str = "\
Commands:
  list                 show the photo grid
  show <N|ID>          open the details panel for a photo
  close                close the details panel
  select <FILE>        choose the file to upload
  upload [FILE]        upload the selected (or given) file
  delete <N|ID>        delete a photo (asks first)
  stats                uploads per month
  view                 the whole page
  refresh              re-fetch the photo list
  help                 this text
  quit                 leave the shell
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Show(String),
    Close,
    Select(PathBuf),
    Upload(Option<PathBuf>),
    Delete(String),
    Stats,
    View,
    Refresh,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a line. `Ok(None)` for blank lines, `Err` with a usage message otherwise.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let words = split_words(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let one = |usage: &str| match args {
            [arg] => Ok(arg.clone()),
            _ => Err(format!("usage: {usage}")),
        };
        let none = |command: Self| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(format!("'{name}' takes no arguments"))
            }
        };

        let command = match name.to_lowercase().as_str() {
            "list" | "ls" => none(Self::List)?,
            "show" | "open" => Self::Show(one("show <N|ID>")?),
            "close" => none(Self::Close)?,
            "select" | "pick" => Self::Select(PathBuf::from(one("select <FILE>")?)),
            "upload" => match args {
                [] => Self::Upload(None),
                [path] => Self::Upload(Some(PathBuf::from(path))),
                _ => return Err("usage: upload [FILE]".to_string()),
            },
            "delete" | "rm" => Self::Delete(one("delete <N|ID>")?),
            "stats" | "chart" => none(Self::Stats)?,
            "view" | "page" => none(Self::View)?,
            "refresh" | "reload" => none(Self::Refresh)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Whether the shell keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the interactive shell until `quit` or end of input.
pub async fn execute(gallery: &AppGallery, layout: Layout) -> Result<()> {
    let mut out = io::stdout();

    if !gallery.refresh().await {
        eprintln!("Could not load photos; the gallery is empty for now. Try 'refresh'.");
    }
    write!(
        out,
        "{}",
        render::render_page(&gallery.photos(), &gallery.histogram(), layout.columns, layout.chart_width)
    )?;
    writeln!(out, "\nType 'help' for commands.")?;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match ShellCommand::parse(&line) {
            Ok(None) => {},
            Ok(Some(command)) => {
                if run(gallery, layout, command, &StdinConfirm, &mut out).await? == Flow::Quit {
                    break;
                }
            },
            Err(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}

/// Execute one command against the gallery, writing the re-rendered view to `out`.
pub async fn run<S, N, C, W>(
    gallery: &Gallery<S, N>,
    layout: Layout,
    command: ShellCommand,
    confirm: &C,
    out: &mut W,
) -> io::Result<Flow>
where
    S: PhotoStore,
    N: Notifier,
    C: Confirm + ?Sized,
    W: Write,
{
    match command {
        ShellCommand::List => {
            write!(out, "{}", render::render_grid(&gallery.photos(), layout.columns))?;
        },
        ShellCommand::Show(target) => match gallery.find(&target) {
            Some(photo) if gallery.open_details(&photo.id) => {
                write!(out, "{}", render::render_details(&photo))?;
            },
            _ => writeln!(out, "No photo '{target}'.")?,
        },
        ShellCommand::Close => gallery.close_details(),
        ShellCommand::Select(path) => {
            select(gallery, &path, out).await?;
        },
        ShellCommand::Upload(path) => {
            if let Some(path) = path
                && !select(gallery, &path, out).await?
            {
                return Ok(Flow::Continue);
            }
            match gallery.upload().await {
                UploadOutcome::Uploaded => {
                    write!(out, "{}", render::render_grid(&gallery.photos(), layout.columns))?;
                },
                UploadOutcome::Busy => writeln!(out, "An upload is already in progress.")?,
                UploadOutcome::NoFileSelected | UploadOutcome::Failed => {},
            }
        },
        ShellCommand::Delete(target) => {
            let Some(photo) = gallery.find(&target) else {
                writeln!(out, "No photo '{target}'.")?;
                return Ok(Flow::Continue);
            };
            match gallery.delete(&photo.id, confirm).await {
                DeleteOutcome::Deleted => {
                    write!(out, "{}", render::render_grid(&gallery.photos(), layout.columns))?;
                },
                DeleteOutcome::Cancelled => writeln!(out, "Cancelled.")?,
                DeleteOutcome::Failed => {},
            }
        },
        ShellCommand::Stats => {
            write!(out, "{}", render::render_chart(&gallery.histogram(), layout.chart_width))?;
        },
        ShellCommand::View => {
            write!(
                out,
                "{}",
                render::render_page(
                    &gallery.photos(),
                    &gallery.histogram(),
                    layout.columns,
                    layout.chart_width
                )
            )?;
        },
        ShellCommand::Refresh => {
            if !gallery.refresh().await {
                writeln!(out, "Refresh failed; showing the previous photos.")?;
            }
            write!(out, "{}", render::render_grid(&gallery.photos(), layout.columns))?;
        },
        ShellCommand::Help => write!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Select a file, reporting the result. Returns `false` if it could not be read.
async fn select<S, N, W>(gallery: &Gallery<S, N>, path: &std::path::Path, out: &mut W) -> io::Result<bool>
where
    S: PhotoStore,
    N: Notifier,
    W: Write,
{
    match super::upload::select(gallery, path).await {
        Ok((filename, size)) => {
            writeln!(out, "Selected {filename} ({})", format_bytes(size as u64))?;
            Ok(true)
        },
        Err(e) => {
            writeln!(out, "{e:#}")?;
            Ok(false)
        },
    }
}
