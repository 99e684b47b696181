// Console front end - Line commands in place of navigation buttons
use crate::application::dashboard_controller::{DashboardController, NavigationState, Refresh};
use crate::error::DashboardError;
use crate::presentation::text_chart::TextChart;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Previous,
    Next,
    Current,
    Help,
    Quit,
    /// New container width for every chart, in columns.
    Width(u32),
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        if verb == "w" || verb == "width" {
            let width = words
                .next()
                .and_then(|arg| arg.parse::<u32>().ok())
                .filter(|width| *width > 0)
                .ok_or_else(|| "width needs a positive number of columns".to_string())?;
            return Ok(Command::Width(width));
        }

        match line.as_str() {
            "p" | "prev" | "previous" => Ok(Command::Previous),
            "n" | "next" => Ok(Command::Next),
            "c" | "now" | "current" => Ok(Command::Current),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

/// Shows the current window, then executes one command per input line until
/// `quit` or end of input.
pub async fn run<R, W>(
    controller: &mut DashboardController<TextChart>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let result = controller.show_now().await;
    report(controller, result, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}; type 'help' for commands", e)?;
                continue;
            }
        };

        let navigation = controller.navigation();
        let result = match command {
            Command::Quit => break,
            Command::Help => {
                write_help(out)?;
                continue;
            }
            Command::Previous if !navigation.previous_enabled => {
                writeln!(out, "no earlier measurements")?;
                continue;
            }
            Command::Next if !navigation.next_enabled => {
                writeln!(out, "no later measurements")?;
                continue;
            }
            Command::Previous => controller.previous().await,
            Command::Width(width) => {
                resize_all(controller, width)?;
                write_frames(controller, out)?;
                continue;
            }
            Command::Next => controller.next().await,
            Command::Current => controller.show_now().await,
        };
        report(controller, result, out)?;
    }

    Ok(())
}

fn report<W: Write>(
    controller: &DashboardController<TextChart>,
    result: Result<Refresh, DashboardError>,
    out: &mut W,
) -> anyhow::Result<()> {
    match result {
        Ok(Refresh::Applied(_)) => write_frames(controller, out)?,
        Ok(Refresh::Discarded) => {}
        // The controller already logged it; the last frame stays on screen.
        Err(DashboardError::Fetch(_)) => {}
        Err(DashboardError::NoActiveWindow) => {
            writeln!(out, "nothing shown yet; use 'current' to load the latest window")?;
        }
        Err(e @ DashboardError::WindowOutOfRange { .. }) => writeln!(out, "{}", e)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn resize_all(controller: &mut DashboardController<TextChart>, width: u32) -> anyhow::Result<()> {
    let names: Vec<String> = controller.surfaces().map(|(name, _)| name.to_string()).collect();
    for name in names {
        if let Some(chart) = controller.surface_mut(&name) {
            chart.set_width(width);
        }
        let height = controller.resize(&name)?;
        tracing::debug!("Resized chart {} to {}x{}", name, width, height);
    }
    Ok(())
}

fn write_frames<W: Write>(controller: &DashboardController<TextChart>, out: &mut W) -> anyhow::Result<()> {
    for (_, chart) in controller.surfaces() {
        writeln!(out, "{}", chart.frame())?;
    }
    write_status(controller, out)
}

fn write_status<W: Write>(controller: &DashboardController<TextChart>, out: &mut W) -> anyhow::Result<()> {
    if let Some(window) = controller.window() {
        let start = chrono::DateTime::from_timestamp(window.start(), 0);
        let end = chrono::DateTime::from_timestamp(window.end(), 0);
        if let (Some(start), Some(end)) = (start, end) {
            writeln!(
                out,
                "window {} .. {} UTC ({}s)",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M"),
                window.width()
            )?;
        }
    }
    writeln!(out, "{}", controls(controller.navigation()))?;
    Ok(())
}

fn controls(navigation: NavigationState) -> String {
    let prev = if navigation.previous_enabled { "[p]rev" } else { " prev " };
    let next = if navigation.next_enabled { "[n]ext" } else { " next " };
    format!("{} {} [c]urrent [q]uit", prev, next)
}

fn write_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "p, prev     show the previous window")?;
    writeln!(out, "n, next     show the next window")?;
    writeln!(out, "c, current  show the window ending now")?;
    writeln!(out, "w, width N  redraw the charts N columns wide")?;
    writeln!(out, "q, quit     exit")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::measurement_source::MeasurementSource;
    use crate::domain::chart::default_graphs;
    use crate::domain::measurement::MeasurementPage;
    use crate::domain::window::TimeWindow;
    use crate::error::{FetchError, FetchResult};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Serves one fixed page, or fails every request.
    struct FixedSource {
        body: Option<&'static str>,
        requested: Mutex<Vec<TimeWindow>>,
    }

    #[async_trait]
    impl MeasurementSource for FixedSource {
        async fn fetch(&self, window: TimeWindow) -> FetchResult<MeasurementPage> {
            self.requested.lock().unwrap().push(window);
            match self.body {
                Some(body) => Ok(serde_json::from_str(body)?),
                None => Err(FetchError::Status {
                    status: 503,
                    body: String::new(),
                }),
            }
        }
    }

    fn setup(body: Option<&'static str>) -> (Arc<FixedSource>, DashboardController<TextChart>) {
        let source = Arc::new(FixedSource {
            body,
            requested: Mutex::new(Vec::new()),
        });
        let mut controller = DashboardController::new(source.clone(), default_graphs(), 3600, "Time");
        controller
            .initialize(vec![
                ("power".to_string(), TextChart::new("power", 60)),
                ("temp".to_string(), TextChart::new("temp", 60)),
            ])
            .unwrap();
        (source, controller)
    }

    const PAGE: &str = r#"{"data":[{"dt":1050,"t":20,"h":50,"p":100,"e":1}],"has_prev":true,"has_more":false}"#;

    #[test]
    fn test_parse_commands() {
        assert_eq!("p".parse::<Command>(), Ok(Command::Previous));
        assert_eq!(" Next ".parse::<Command>(), Ok(Command::Next));
        assert_eq!("now".parse::<Command>(), Ok(Command::Current));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("w 120".parse::<Command>(), Ok(Command::Width(120)));
        assert_eq!("WIDTH  80".parse::<Command>(), Ok(Command::Width(80)));
        assert!("width".parse::<Command>().is_err());
        assert!("w 0".parse::<Command>().is_err());
        assert!("jump".parse::<Command>().is_err());
    }

    #[test]
    fn test_controls_reflect_navigation() {
        let both = NavigationState {
            previous_enabled: true,
            next_enabled: true,
        };
        assert_eq!(controls(both), "[p]rev [n]ext [c]urrent [q]uit");
        assert_eq!(
            controls(NavigationState::default()),
            " prev   next  [c]urrent [q]uit"
        );
    }

    #[tokio::test]
    async fn test_session() {
        let (source, mut controller) = setup(Some(PAGE));
        let mut out = Vec::new();

        run(&mut controller, &b"p\nn\nbogus\nq\nc\n"[..], &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== power (60x60) =="));
        assert!(text.contains("Temperature [deg C]"));
        assert!(text.contains("[p]rev  next  [c]urrent [q]uit"));
        assert!(text.contains("no later measurements"));
        assert!(text.contains("unknown command 'bogus'"));

        // Initial window plus one step back; 'n' was disabled and 'c' came after quit.
        let requested = source.requested.lock().unwrap().clone();
        assert_eq!(requested.len(), 2);
        assert_eq!(requested[1].end(), requested[0].start());
        assert_eq!(requested[1].width(), 3600);
    }

    #[tokio::test]
    async fn test_width_command_resizes_every_chart() {
        let (source, mut controller) = setup(Some(PAGE));
        let mut out = Vec::new();

        run(&mut controller, &b"width 600\n"[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== power (600x300) =="));
        assert!(text.contains("== temp (600x300) =="));
        assert!(controller.surface("temp").unwrap().frame().contains("n=1"));
        assert_eq!(source.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_silent() {
        let (source, mut controller) = setup(None);
        let mut out = Vec::new();

        run(&mut controller, &b"c\n"[..], &mut out).await.unwrap();

        assert!(out.is_empty());
        assert_eq!(source.requested.lock().unwrap().len(), 2);
        assert_eq!(controller.window(), None);
    }
}
