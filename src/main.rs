use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use framecrop::{
    Align, BackgroundPreset, Command, Outcome, Rgb, Session, SettingsStore, Size, SizePreset,
    ZoomStep,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Framecrop(#[from] framecrop::Error),
    #[error("invalid nudge `{0}`; expected DX,DY")]
    InvalidNudge(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "framecrop",
    version,
    about = "Place an image in a fixed-size frame and export it"
)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Place INPUT in the frame and export the composite
    Export(ExportArgs),
    /// Export a background-only frame
    Blank(FrameArgs),
    /// List or clear remembered sizes and colors
    Recent {
        #[arg(value_enum, default_value_t = RecentKind::All)]
        kind: RecentKind,
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Output file; the extension picks the format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Custom frame size, e.g. 2560x1440 (remembered)
    #[arg(long, conflicts_with = "preset")]
    size: Option<Size>,

    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Custom background, e.g. #336699 (remembered)
    #[arg(long, conflicts_with = "dark")]
    bg: Option<Rgb>,

    /// Use the dark preset background
    #[arg(long)]
    dark: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    input: PathBuf,

    #[command(flatten)]
    frame: FrameArgs,

    #[arg(long, value_enum)]
    fit: Option<FitArg>,

    /// Repeatable; applied in order
    #[arg(long, value_enum)]
    align: Vec<AlignArg>,

    #[arg(long)]
    scale_percent: Option<f64>,

    #[arg(long, default_value_t = 0)]
    zoom_in: u32,

    #[arg(long, default_value_t = 0)]
    zoom_out: u32,

    /// Move the placed image by DX,DY pixels
    #[arg(long, allow_hyphen_values = true)]
    nudge: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PresetArg {
    Landscape,
    Portrait,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FitArg {
    Contain,
    Width,
    Height,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlignArg {
    Center,
    CenterVertical,
    CenterHorizontal,
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RecentKind {
    All,
    Sizes,
    Colors,
}

impl From<AlignArg> for Align {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Center => Align::Center,
            AlignArg::CenterVertical => Align::CenterVertical,
            AlignArg::CenterHorizontal => Align::CenterHorizontal,
            AlignArg::Top => Align::Top,
            AlignArg::Bottom => Align::Bottom,
            AlignArg::Left => Align::Left,
            AlignArg::Right => Align::Right,
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = match cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::default_location(),
    };
    let mut session = Session::new(store);

    match cli.command {
        CliCommand::Export(args) => run_export(&mut session, args),
        CliCommand::Blank(args) => {
            apply_frame(&mut session, &args)?;
            export(&mut session, args.output)
        }
        CliCommand::Recent { kind, clear } => {
            run_recent(&mut session, kind, clear);
            Ok(())
        }
    }
}

fn apply_frame(session: &mut Session, args: &FrameArgs) -> Result<(), CliError> {
    if let Some(size) = args.size {
        session.execute(Command::SetCustomSize(size))?;
    } else if let Some(preset) = args.preset {
        let preset = match preset {
            PresetArg::Landscape => SizePreset::Landscape,
            PresetArg::Portrait => SizePreset::Portrait,
        };
        session.execute(Command::SetOutputSize(preset.size()))?;
    }

    if let Some(color) = args.bg {
        session.execute(Command::SetCustomBackground(color))?;
    } else if args.dark {
        session.execute(Command::SetBackground(BackgroundPreset::Dark.color()))?;
    }
    Ok(())
}

fn run_export(session: &mut Session, args: ExportArgs) -> Result<(), CliError> {
    let nudge = args.nudge.as_deref().map(parse_nudge).transpose()?;

    apply_frame(session, &args.frame)?;
    session.execute(Command::OpenImage(args.input))?;

    if let Some(fit) = args.fit {
        session.execute(match fit {
            FitArg::Contain => Command::FitContain,
            FitArg::Width => Command::FitWidth,
            FitArg::Height => Command::FitHeight,
        })?;
    }
    if let Some(p) = args.scale_percent {
        session.execute(Command::SetScalePercent(p))?;
    }
    for (zoom_in, n) in [(true, args.zoom_in), (false, args.zoom_out)] {
        for _ in 0..n {
            session.execute(Command::Zoom {
                zoom_in,
                step: ZoomStep::Normal,
            })?;
        }
    }
    for a in args.align {
        session.execute(Command::Align(a.into()))?;
    }
    if let Some((dx, dy)) = nudge {
        session.execute(Command::Nudge { dx, dy })?;
    }

    if let Some(p) = session.placement() {
        tracing::info!(
            scale_percent = p.scale_percent(),
            x = p.position().x,
            y = p.position().y,
            "final placement"
        );
    }
    export(session, args.frame.output)
}

fn export(session: &mut Session, output: Option<PathBuf>) -> Result<(), CliError> {
    if let Outcome::Exported { path, .. } = session.execute(Command::Export(output))? {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_recent(session: &mut Session, kind: RecentKind, clear: bool) {
    let sizes = matches!(kind, RecentKind::All | RecentKind::Sizes);
    let colors = matches!(kind, RecentKind::All | RecentKind::Colors);
    if clear {
        if sizes {
            session.clear_recent_sizes();
        }
        if colors {
            session.clear_recent_colors();
        }
        return;
    }
    if sizes {
        for s in &session.settings().recent_sizes {
            println!("{s}");
        }
    }
    if colors {
        for c in &session.settings().recent_colors {
            println!("{c}");
        }
    }
}

fn parse_nudge(raw: &str) -> Result<(f64, f64), CliError> {
    let invalid = || CliError::InvalidNudge(raw.to_owned());
    let (dx, dy) = raw.split_once(',').ok_or_else(invalid)?;
    let dx: f64 = dx.trim().parse().map_err(|_| invalid())?;
    let dy: f64 = dy.trim().parse().map_err(|_| invalid())?;
    if !dx.is_finite() || !dy.is_finite() {
        return Err(invalid());
    }
    Ok((dx, dy))
}
