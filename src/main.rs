use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use keymapper::cli::{CliArgs, Command};
use keymapper::config::MapperSettings;
use keymapper::mapper::{
    raw_event_from_window_event, BindingDirectory, EventSource, InitSource, KeyboardSink,
    JoystickSink, NullSink, RawEvent, Recorder, TracingSink,
};
use keymapper::replay::ScriptSource;

fn load_settings(args: &CliArgs) -> Result<MapperSettings> {
    match &args.settings {
        Some(path) => MapperSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(MapperSettings::load()),
    }
}

fn mapper_file(args: &CliArgs, settings: &MapperSettings) -> Result<PathBuf> {
    match &args.mapperfile {
        Some(path) => Ok(path.clone()),
        None => settings
            .mapper_file_path()
            .context("No config directory available for the mapper file"),
    }
}

fn build_directory(
    args: &CliArgs,
    settings: &MapperSettings,
    mapper_path: &Path,
    keyboard: Box<dyn KeyboardSink>,
    joystick: Box<dyn JoystickSink>,
) -> BindingDirectory {
    let mut directory =
        BindingDirectory::new(settings.mapper_options(args.host_sticks()), keyboard, joystick);
    match directory.init(Some(mapper_path)) {
        InitSource::MapperFile(report) if !report.is_clean() => tracing::warn!(
            "{}: {} unknown events, {} rejected binds",
            mapper_path.display(),
            report.unknown_events,
            report.rejected_tokens
        ),
        InitSource::MapperFile(_) => {}
        InitSource::Defaults => tracing::info!("Using default bindings"),
    }
    directory
}

fn run_replay(
    args: &CliArgs,
    settings: &MapperSettings,
    mapper_path: &Path,
    script: &Path,
    caps_lock: bool,
    num_lock: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let mut source = ScriptSource::parse(&text)
        .with_context(|| format!("Invalid script {}", script.display()))?;

    let recorder = Recorder::new();
    let mut directory = build_directory(
        args,
        settings,
        mapper_path,
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
    );

    directory.replay_lock_state(caps_lock, num_lock, false);
    directory.tick();
    for call in recorder.take() {
        println!("   start -> {}", call);
    }

    // Each script line is one poll cycle
    let mut line = 0;
    while let Some(raw) = source.poll_event() {
        line += 1;
        if raw == RawEvent::Quit {
            println!("{:>4} {:?}", line, raw);
            break;
        }
        let claimed = directory.process_raw_event(&raw);
        directory.tick();
        println!(
            "{:>4} {:?}{}",
            line,
            raw,
            if claimed { "" } else { " (unclaimed)" }
        );
        for call in recorder.take() {
            println!("      -> {}", call);
        }
        if directory.take_editor_request() {
            println!("      -> mapper editor requested");
        }
    }
    Ok(())
}

/// Window that feeds keyboard input through the mapper
struct WatchApp {
    directory: BindingDirectory,
    window: Option<Window>,
}

impl ApplicationHandler for WatchApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title("keymapper - type to see mapped input")
            .with_inner_size(LogicalSize::new(480, 160));
        match event_loop.create_window(window_attributes) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(raw) = raw_event_from_window_event(&event) else {
            return;
        };
        if raw == RawEvent::Quit {
            event_loop.exit();
            return;
        }

        self.directory.process_raw_event(&raw);
        if self.directory.take_editor_request() {
            if self.directory.editor().is_open() {
                self.directory.close_editor();
                tracing::info!("Mapper editor closed");
            } else {
                self.directory.open_editor();
                tracing::info!("Mapper editor: {}", self.directory.editor().status());
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        self.directory.tick();
    }
}

fn run_watch(args: &CliArgs, settings: &MapperSettings, mapper_path: &Path) -> Result<()> {
    let directory = build_directory(
        args,
        settings,
        mapper_path,
        Box::new(TracingSink),
        Box::new(TracingSink),
    );
    let event_loop = EventLoop::new()?;
    let mut app = WatchApp {
        directory,
        window: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let console_filter = match args.command {
        Command::Watch => "warn,keymapper::sink=info,keymapper=info",
        _ => "warn",
    };
    let _log_guard = keymapper::tracing::init(console_filter);

    let settings = load_settings(&args)?;
    let mapper_path = mapper_file(&args, &settings)?;

    match &args.command {
        Command::Dump => {
            let directory = build_directory(
                &args,
                &settings,
                &mapper_path,
                Box::new(NullSink),
                Box::new(NullSink),
            );
            print!("{}", directory.to_mapper_file());
        }
        Command::Save => {
            let directory = build_directory(
                &args,
                &settings,
                &mapper_path,
                Box::new(NullSink),
                Box::new(NullSink),
            );
            directory
                .save_bindings(&mapper_path)
                .context("Failed to save mapper file")?;
            println!("Saved {}", mapper_path.display());
        }
        Command::Reset => {
            if mapper_path.exists() {
                std::fs::remove_file(&mapper_path).with_context(|| {
                    format!("Failed to remove {}", mapper_path.display())
                })?;
                println!("Removed {}", mapper_path.display());
            } else {
                println!("No mapper file at {}", mapper_path.display());
            }
        }
        Command::Replay {
            script,
            caps_lock,
            num_lock,
        } => run_replay(&args, &settings, &mapper_path, script, *caps_lock, *num_lock)?,
        Command::Watch => run_watch(&args, &settings, &mapper_path)?,
        Command::Settings { write } => {
            print!("{}", settings.to_yaml()?);
            if *write {
                match &args.settings {
                    Some(path) => settings.save_to(path)?,
                    None => settings.save()?,
                }
            }
        }
    }

    Ok(())
}
