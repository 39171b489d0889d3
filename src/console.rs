//! Line-oriented driver for a running dashboard.
//!
//! Each line of input is one command. Commands act on the dashboard the same
//! way a front end would: widget input, button presses, and reads of the
//! status, view snapshot and plots.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use ecodash_ui::{Dashboard, WidgetError};
use thiserror::Error;

/// One console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply raw input to a widget
    Set { field: String, value: String },
    /// Press a button
    Click(String),
    Status,
    /// Print the view snapshot as JSON
    Show,
    /// Write the first plot on display as SVG
    Render(PathBuf),
    /// List the widget field names
    Fields,
    Quit,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Unknown command '{0}' (expected set, click, status, show, render, fields or quit)")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("Nothing is plotted yet")]
    NoPlot,

    #[error("Could not write plot to {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Errors the user can correct by typing another command. `Io` is kept
    /// for the console's own input and output streams.
    fn is_recoverable(&self) -> bool {
        !matches!(self, ConsoleError::Io(_) | ConsoleError::Json(_))
    }
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).ok_or(
                    ConsoleError::MissingArgument {
                        command: "set",
                        argument: "a field and a value",
                    },
                )?;
                Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "click" => Command::Click(required(rest, "click", "a button name")?.to_string()),
            "status" => Command::Status,
            "show" => Command::Show,
            "render" => Command::Render(PathBuf::from(required(rest, "render", "a file name")?)),
            "fields" => Command::Fields,
            "quit" | "exit" => Command::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ConsoleError> {
    if rest.is_empty() {
        Err(ConsoleError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Whether the console should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Runs commands against one dashboard and writes replies to `out`.
pub struct Console<'a, W: Write> {
    app: &'a mut dyn Dashboard,
    out: W,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(app: &'a mut dyn Dashboard, out: W) -> Self {
        Self { app, out }
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Mistyped commands and rejected widget input are reported and skipped;
    /// I/O failures end the run.
    pub fn run(&mut self, input: impl BufRead) -> Result<(), ConsoleError> {
        writeln!(self.out, "{}: {}", self.app.title(), self.app.status())?;

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let outcome = parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Flow::Continue),
            });
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) if e.is_recoverable() => {
                    log::warn!("Line {}: {}", index + 1, e);
                    writeln!(self.out, "error: {}", e)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, ConsoleError> {
        log::debug!("Console command: {:?}", command);
        match command {
            Command::Set { field, value } => {
                if self.app.input(&field, &value)? {
                    self.print_status()?;
                } else {
                    writeln!(self.out, "{} unchanged", field)?;
                }
            }
            Command::Click(button) => {
                self.app.press(&button)?;
                self.print_status()?;
            }
            Command::Status => self.print_status()?,
            Command::Show => {
                let json = serde_json::to_string_pretty(&self.app.snapshot())?;
                writeln!(self.out, "{}", json)?;
            }
            Command::Render(path) => {
                let plot = self.app.plots().into_iter().next().ok_or(ConsoleError::NoPlot)?;
                if let Err(source) = fs::write(&path, plot.to_svg()) {
                    return Err(ConsoleError::Render { path, source });
                }
                writeln!(self.out, "Wrote {} to {}", plot.summary(), path.display())?;
            }
            Command::Fields => {
                for field in self.app.field_names() {
                    writeln!(self.out, "{}", field)?;
                }
            }
            Command::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn print_status(&mut self) -> io::Result<()> {
        writeln!(self.out, "[status] {}", self.app.status())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use tempfile::TempDir;

    use super::*;
    use crate::apps::tracks_explorer;
    use crate::config::AppConfig;
    use crate::services::LocalServices;

    const TRACKS_CSV: &str = "\
event-id,timestamp,location-long,location-lat,individual-local-identifier
1,2020-05-01 10:00:00,4.0,52.0,gull-1
2,2020-05-01 11:00:00,4.5,52.5,gull-1
3,2020-05-01 12:00:00,5.0,52.1,gull-1
";

    fn run_script(app: &mut dyn Dashboard, script: &str) -> String {
        let mut out = Vec::new();
        Console::new(app, &mut out).run(script.as_bytes()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("set output_fname  /tmp/my extent.geojson ").unwrap(),
            Some(Command::Set {
                field: "output_fname".to_string(),
                value: "/tmp/my extent.geojson".to_string(),
            })
        );
        assert_eq!(
            parse_line("click boundary_update").unwrap(),
            Some(Command::Click("boundary_update".to_string()))
        );
        assert_eq!(
            parse_line("render out.svg").unwrap(),
            Some(Command::Render(PathBuf::from("out.svg")))
        );
        assert_eq!(parse_line("  status").unwrap(), Some(Command::Status));
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# load the tracks").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_line("frobnicate"),
            Err(ConsoleError::UnknownCommand(c)) if c == "frobnicate"
        ));
        assert!(matches!(
            parse_line("set buffer"),
            Err(ConsoleError::MissingArgument { command: "set", .. })
        ));
        assert!(matches!(
            parse_line("click"),
            Err(ConsoleError::MissingArgument { command: "click", .. })
        ));
    }

    #[test]
    fn test_script_drives_tracks_explorer() {
        let dir = TempDir::new().unwrap();
        let tracks = dir.path().join("gulls.csv");
        let extent = dir.path().join("extent.geojson");
        let svg = dir.path().join("tracks.svg");
        fs::write(&tracks, TRACKS_CSV).unwrap();

        let mut app = tracks_explorer::session(Rc::new(LocalServices::new()), &AppConfig::default());
        let script = format!(
            "# explore a track file\n\
             set tracksfile {}\n\
             click load_tracks_button\n\
             \n\
             set output_fname {}\n\
             click save_tracks_extent_button\n\
             render {}\n\
             quit\n\
             set tracks_buffer 0.5\n",
            tracks.display(),
            extent.display(),
            svg.display()
        );

        let output = run_script(&mut app, &script);

        assert!(output.starts_with("Tracks Explorer: Ready..."));
        assert!(output.contains("[status] Plot created!"));
        assert!(output.contains(&format!("[status] File saved to: {}", extent.display())));
        assert!(extent.exists());
        assert!(fs::read_to_string(&svg).unwrap().starts_with("<svg"));
        assert_eq!(app.model().tracks_buffer.get(), 0.1);
    }

    #[test]
    fn test_rejected_input_is_reported_and_skipped() {
        let mut app = tracks_explorer::session(Rc::new(LocalServices::new()), &AppConfig::default());

        let output = run_script(
            &mut app,
            "set tracks_buffer 7\nset no_such_field 1\nrender plot.svg\nset tracks_buffer 0.5\n",
        );

        assert!(output.contains("error: Value 7 for field 'tracks_buffer'"));
        assert!(output.contains("error: Unknown field 'no_such_field'"));
        assert!(output.contains("error: Nothing is plotted yet"));
        assert_eq!(app.model().tracks_buffer.get(), 0.5);
    }

    #[test]
    fn test_unwritable_render_path_keeps_session_running() {
        let dir = TempDir::new().unwrap();
        let tracks = dir.path().join("gulls.csv");
        let bad = dir.path().join("no_such_dir").join("tracks.svg");
        fs::write(&tracks, TRACKS_CSV).unwrap();

        let mut app = tracks_explorer::session(Rc::new(LocalServices::new()), &AppConfig::default());
        let script = format!(
            "set tracksfile {}\nclick load_tracks_button\nrender {}\nstatus\n",
            tracks.display(),
            bad.display()
        );

        let output = run_script(&mut app, &script);

        assert!(output.contains(&format!("error: Could not write plot to {}", bad.display())));
        assert!(output.trim_end().ends_with("[status] Plot created!"));
        assert_eq!(output.matches("[status] Plot created!").count(), 2);
        assert!(!bad.exists());
    }

    #[test]
    fn test_show_and_fields() {
        let mut app = tracks_explorer::session(Rc::new(LocalServices::new()), &AppConfig::default());

        let output = run_script(&mut app, "fields\nshow\n");

        assert!(output.contains("tracks_boundary_shape\ntracks_buffer\n"));
        assert!(output.contains("\"title\": \"Tracks Explorer\""));
        assert!(output.contains("\"kind\": \"widgets\""));
    }

    #[test]
    fn test_unchanged_input_is_reported() {
        let mut app = tracks_explorer::session(Rc::new(LocalServices::new()), &AppConfig::default());

        let output = run_script(&mut app, "set tracks_buffer 0.1\n");

        assert!(output.contains("tracks_buffer unchanged"));
    }
}
