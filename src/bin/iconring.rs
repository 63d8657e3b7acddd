use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "iconring", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mask an image into a ring and export the 512x512 PNG.
    Render(RenderArgs),
    /// Like `render`, but with the overlay guide drawn on top.
    Preview(RenderArgs),
    /// Replay a script of editor events (upload, size, thickness, rotate, overlay, reset, download).
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct ControlArgs {
    /// Settings JSON; flags below override its values.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Ring diameter in pixels (0-512).
    #[arg(long)]
    size: Option<f64>,

    /// Ring thickness in percent of the outer radius (0-100).
    #[arg(long)]
    thickness: Option<f64>,

    /// Image rotation in degrees, applied after the upload.
    #[arg(long, allow_negative_numbers = true)]
    rotation: Option<f64>,

    /// Extra font directory for the overlay label.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long, default_value = iconring::DEFAULT_FILE_NAME)]
    out: PathBuf,

    #[command(flatten)]
    controls: ControlArgs,

    /// Print the ring's SVG path data to stderr.
    #[arg(long)]
    dump_mask: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Event script, one command per line.
    #[arg(long)]
    script: PathBuf,

    /// Answer "yes" to confirmations instead of asking on the terminal.
    #[arg(long, short = 'y')]
    yes: bool,

    /// Directory for `download` without a path (defaults to the script's directory).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    controls: ControlArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args, false),
        Command::Preview(args) => cmd_render(args, true),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ICONRING_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(controls: &ControlArgs) -> anyhow::Result<iconring::EditorSettings> {
    let mut settings = match &controls.settings {
        Some(path) => iconring::EditorSettings::from_path(path)?,
        None => iconring::EditorSettings::default(),
    };
    if let Some(size) = controls.size {
        settings.size_px = size;
    }
    if let Some(thickness) = controls.thickness {
        settings.thickness_pct = thickness;
    }
    if let Some(rotation) = controls.rotation {
        settings.rotation_deg = rotation;
    }
    if let Some(dir) = &controls.font_dir {
        settings.font_dir = Some(dir.clone());
    }
    settings.validate()?;
    Ok(settings)
}

fn cmd_render(args: RenderArgs, with_overlay: bool) -> anyhow::Result<()> {
    let mut settings = load_settings(&args.controls)?;
    settings.overlay = with_overlay;

    let rotation_deg = settings.rotation_deg;
    let mut editor = iconring::Editor::new(settings)?;
    editor
        .upload_path(&args.in_path)
        .with_context(|| format!("upload '{}'", args.in_path.display()))?;
    editor.set_rotation(rotation_deg)?;

    if args.dump_mask {
        eprintln!("mask: {}", editor.ring().to_svg_path_data());
    }

    if with_overlay {
        let frame = editor.render()?;
        iconring::write_png(&frame, &args.out)?;
    } else {
        let mut prompt = iconring::AutoPrompt::default();
        if editor.download(&mut prompt, &args.out)?.is_none() {
            anyhow::bail!("nothing to export");
        }
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let settings = load_settings(&args.controls)?;
    let src = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let base_dir = args
        .script
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let out_dir = args.out_dir.clone().unwrap_or_else(|| base_dir.clone());

    let lines = iconring::script::parse_script(&src, &base_dir)?;
    let mut editor = iconring::Editor::new(settings)?;
    let mut stdout = std::io::stdout().lock();

    let report = if args.yes {
        let mut prompt = iconring::AutoPrompt { assume_yes: true };
        iconring::script::run_script(&mut editor, &lines, &mut prompt, &out_dir, &mut stdout)?
    } else {
        let mut prompt = iconring::TerminalPrompt::stdio();
        iconring::script::run_script(&mut editor, &lines, &mut prompt, &out_dir, &mut stdout)?
    };

    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    if report.refused_downloads > 0 {
        eprintln!(
            "{} download(s) skipped: no image loaded",
            report.refused_downloads
        );
    }
    Ok(())
}
