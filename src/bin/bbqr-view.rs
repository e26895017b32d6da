use std::io::{BufRead as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bbqr_view::{Command, Outcome, PageState, RenderMode, UiView, Viewer, ViewerConfig};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bbqr-view", version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Viewer config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory downloads are written to (overrides the config).
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Load one fragment, adjust the frame count, and write both images.
    Show(ShowArgs),
    /// Read commands from stdin, one per line.
    Repl,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// BBQr fragment, `#fragment`, or a full URL.
    fragment: String,

    /// Target frame count; the nearest feasible count on the way there is used.
    #[arg(long, conflicts_with_all = ["more", "fewer", "single"])]
    frames: Option<usize>,

    /// Step the frame count up this many times.
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Step the frame count down this many times.
    #[arg(long, default_value_t = 0)]
    fewer: usize,

    /// Collapse to a single frame.
    #[arg(long, default_value_t = false)]
    single: bool,

    /// Print the page status as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Do not write image files.
    #[arg(long, default_value_t = false)]
    no_download: bool,
}

#[derive(serde::Serialize)]
struct Status<'a> {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<SessionStatus>,
    view: &'a UiView,
}

#[derive(serde::Serialize)]
struct SessionStatus {
    encoding: char,
    file_type: char,
    bytes: usize,
    frames: usize,
    min_frames: usize,
    qr_version: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::from_path(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(dir) = cli.out_dir {
        config.out_dir = dir;
    }

    match cli.cmd {
        Cmd::Show(args) => cmd_show(config, args),
        Cmd::Repl => cmd_repl(config),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_show(config: ViewerConfig, args: ShowArgs) -> anyhow::Result<()> {
    let mut viewer = Viewer::with_config(config);
    viewer.on_fragment_change(Some(&args.fragment));

    match viewer.state() {
        PageState::NoHash => anyhow::bail!("no fragment given"),
        PageState::InvalidHash => anyhow::bail!("not a valid BBQr fragment"),
        PageState::Loading | PageState::Loaded(_) => {}
    }

    if args.single {
        report(viewer.handle(Command::CollapseToSingle));
    }
    for _ in 0..args.more {
        report(viewer.handle(Command::IncreaseFrames));
    }
    for _ in 0..args.fewer {
        report(viewer.handle(Command::DecreaseFrames));
    }
    if let Some(target) = args.frames {
        step_towards(&mut viewer, target);
    }

    print_status(&viewer, args.json)?;
    if !args.no_download {
        for mode in [RenderMode::Animated, RenderMode::Stacked] {
            write_download(&viewer, mode)?;
        }
    }
    Ok(())
}

fn step_towards(viewer: &mut Viewer, target: usize) {
    loop {
        let Some(page) = viewer.state().loaded() else {
            return;
        };
        let current = page.session.frame_count();
        let cmd = match current.cmp(&target) {
            std::cmp::Ordering::Less => Command::IncreaseFrames,
            std::cmp::Ordering::Greater => Command::DecreaseFrames,
            std::cmp::Ordering::Equal => return,
        };
        let outcome = viewer.handle(cmd);
        report(outcome.clone());
        if outcome != Outcome::Updated {
            return;
        }
        let Some(next) = viewer.state().loaded().map(|p| p.session.frame_count()) else {
            return;
        };
        // Overshot: the nearest feasible count lies past the target.
        if (current < target) != (next < target) {
            return;
        }
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Exhausted(direction) => eprintln!("no further frame count ({direction})"),
        Outcome::Ignored(reason) => eprintln!("ignored: {reason}"),
        Outcome::Invalidated => eprintln!("page invalidated"),
        Outcome::Updated | Outcome::Link(_) | Outcome::Download { .. } => {}
    }
}

fn status(viewer: &Viewer) -> Status<'_> {
    let state = viewer.state();
    Status {
        state: state.name(),
        session: state.loaded().map(|page| {
            let s = &page.session;
            SessionStatus {
                encoding: s.encoding.as_char(),
                file_type: s.file_type.as_char(),
                bytes: s.raw_bytes.len(),
                frames: s.frame_count(),
                min_frames: s.min_frame_count,
                qr_version: s.qr_version,
            }
        }),
        view: viewer.view(),
    }
}

fn print_status(viewer: &Viewer, json: bool) -> anyhow::Result<()> {
    let status = status(viewer);
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &status).context("serialize status")?;
        writeln!(out)?;
        return Ok(());
    }
    match &status.session {
        Some(s) => writeln!(
            out,
            "{}: {} bytes, {} frame(s) (min {}), QR version {}",
            status.state, s.bytes, s.frames, s.min_frames, s.qr_version
        )?,
        None => writeln!(out, "{}", status.state)?,
    }
    Ok(())
}

fn write_download(viewer: &Viewer, mode: RenderMode) -> anyhow::Result<()> {
    let Outcome::Download { filename, bytes } = viewer.download(mode) else {
        return Ok(());
    };
    let path = viewer.config().out_dir.join(filename);
    write_file(&path, &bytes)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_repl(config: ViewerConfig) -> anyhow::Result<()> {
    let mut viewer = Viewer::with_config(config);
    viewer.on_fragment_change(None);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            continue;
        };
        let arg = words.next();

        let cmd = match (verb, arg) {
            ("quit" | "exit", _) => break,
            ("open", frag) => {
                viewer.on_fragment_change(frag);
                print_status(&viewer, false)?;
                continue;
            }
            ("clear", _) => {
                viewer.on_fragment_change(None);
                print_status(&viewer, false)?;
                continue;
            }
            ("status", _) => {
                print_status(&viewer, arg == Some("--json"))?;
                continue;
            }
            ("more", _) => Command::IncreaseFrames,
            ("fewer", _) => Command::DecreaseFrames,
            ("single", _) => Command::CollapseToSingle,
            ("copy-link", _) => Command::CopyLink,
            ("download", None | Some("animated")) => Command::Download(RenderMode::Animated),
            ("download", Some("stacked")) => Command::Download(RenderMode::Stacked),
            _ => {
                eprintln!("unknown command: {line}");
                continue;
            }
        };

        match viewer.handle(cmd) {
            Outcome::Link(link) => println!("{link}"),
            Outcome::Download { filename, bytes } => {
                let path = viewer.config().out_dir.join(filename);
                write_file(&path, &bytes)?;
                println!("wrote {}", path.display());
            }
            Outcome::Updated => print_status(&viewer, false)?,
            other => report(other),
        }
    }
    Ok(())
}
