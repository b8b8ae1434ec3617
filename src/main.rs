mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use egui::*;
use log::{debug, error, info, LevelFilter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use superchip::{
    Display, Options, Processor, Program, StateSnapshot, StateSnapshotVerbosity, SuperChipError,
};

const TITLE_APP_WINDOW: &str = "SUPER-CHIP";
const INITIAL_WIDTH: f32 = 960.;
const INITIAL_HEIGHT: f32 = 480.;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / 60);
const EXIT_STATUS_FAULT: i32 = 1;
const COLOUR_DEFAULT_FOREGROUND: Color32 = Color32::from_rgb(0, 220, 255);
const COLOUR_DEFAULT_BACKGROUND: Color32 = Color32::from_rgb(9, 73, 146);

/// Host keys for logical keys 0x0 to 0xF, in order.
const KEY_MAP: [Key; 16] = [
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Q,
    Key::W,
    Key::E,
    Key::R,
    Key::A,
    Key::S,
    Key::D,
    Key::F,
    Key::Z,
    Key::X,
    Key::C,
    Key::V,
];

/// Runs a CHIP-8 / SUPER-CHIP program in a window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program ROM
    rom: PathBuf,

    /// JSON options file
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Instructions executed per 60 Hz frame (overrides the options file)
    #[arg(short, long)]
    cycles_per_frame: Option<u32>,

    /// Let 00FD and 0010/0011 end the program with an exit status
    #[arg(short, long)]
    exit_opcodes: bool,
}

enum MessageToProcessor {
    KeyState { keys: u16 },
    ReadyForStateSnapshot,
    Terminate,
}

enum MessageFromProcessor {
    StateSnapshotReport { snapshot: StateSnapshot },
    Exited { code: u8 },
    ErrorReport { error: SuperChipError },
}

struct SuperChipApp {
    message_to_processor_tx: mpsc::Sender<MessageToProcessor>,
    message_from_processor_rx: mpsc::Receiver<MessageFromProcessor>,
    exit_code: Arc<AtomicI32>,
    frame_buffer: Option<Display>,
    keys: u16,
    foreground_colour: Color32,
    background_colour: Color32,
}

impl eframe::App for SuperChipApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.request_processor_update();
        if self.process_processor_updates() {
            frame.close();
        }
        self.render_frame_buffer(ctx);
        ctx.request_repaint();
    }
}

impl Drop for SuperChipApp {
    fn drop(&mut self) {
        // The emulation thread may already have ended
        let _ = self.message_to_processor_tx.send(MessageToProcessor::Terminate);
    }
}

impl SuperChipApp {
    fn new(processor: Processor, exit_code: Arc<AtomicI32>) -> Self {
        let (message_to_processor_tx, message_from_processor_rx) = spawn_processor(processor);
        SuperChipApp {
            message_to_processor_tx,
            message_from_processor_rx,
            exit_code,
            frame_buffer: None,
            keys: 0x0,
            foreground_colour: COLOUR_DEFAULT_FOREGROUND,
            background_colour: COLOUR_DEFAULT_BACKGROUND,
        }
    }

    /// Samples the keypad and forwards the mask when it changes.
    fn handle_input(&mut self, ctx: &egui::Context) {
        let keys: u16 = ctx.input(|i| {
            KEY_MAP
                .iter()
                .enumerate()
                .filter(|(_, key)| i.key_down(**key))
                .fold(0x0, |mask, (ordinal, _)| mask | (1 << ordinal))
        });
        if keys != self.keys {
            self.keys = keys;
            let _ = self
                .message_to_processor_tx
                .send(MessageToProcessor::KeyState { keys });
        }
    }

    fn request_processor_update(&self) {
        let _ = self
            .message_to_processor_tx
            .send(MessageToProcessor::ReadyForStateSnapshot);
    }

    /// Drains messages from the emulation thread; returns true once the window should close.
    fn process_processor_updates(&mut self) -> bool {
        loop {
            match self.message_from_processor_rx.try_recv() {
                Ok(MessageFromProcessor::StateSnapshotReport { snapshot }) => {
                    if let StateSnapshot::MinimalSnapshot { frame_buffer, .. } = snapshot {
                        self.frame_buffer = Some(frame_buffer);
                    }
                }
                Ok(MessageFromProcessor::Exited { code }) => {
                    info!("program exited with code {}", code);
                    self.exit_code.store(code as i32, Ordering::SeqCst);
                    return true;
                }
                Ok(MessageFromProcessor::ErrorReport { error }) => {
                    error!("{}", error);
                    self.exit_code.store(EXIT_STATUS_FAULT, Ordering::SeqCst);
                    return true;
                }
                Err(mpsc::TryRecvError::Empty) => return false,
                Err(mpsc::TryRecvError::Disconnected) => return true,
            }
        }
    }
}

/// Moves the processor onto its own thread, which runs one frame every 1/60 s and answers
/// UI messages through the returned channels.
fn spawn_processor(
    mut processor: Processor,
) -> (
    mpsc::Sender<MessageToProcessor>,
    mpsc::Receiver<MessageFromProcessor>,
) {
    let (message_to_processor_tx, message_to_processor_rx) = mpsc::channel();
    let (message_from_processor_tx, message_from_processor_rx) = mpsc::channel();
    thread::spawn(move || loop {
        let frame_start: Instant = Instant::now();
        let mut ui_ready_for_update: bool = false;
        for message in message_to_processor_rx.try_iter() {
            match message {
                MessageToProcessor::KeyState { keys } => processor.set_keys(keys),
                MessageToProcessor::ReadyForStateSnapshot => ui_ready_for_update = true,
                MessageToProcessor::Terminate => {
                    debug!("emulation thread terminating");
                    return;
                }
            }
        }
        let outcome: Option<MessageFromProcessor> = match processor.execute_frame() {
            Ok(_) => processor
                .exit_code()
                .map(|code| MessageFromProcessor::Exited { code }),
            Err(error) => Some(MessageFromProcessor::ErrorReport { error }),
        };
        if ui_ready_for_update {
            let snapshot = processor.export_state_snapshot(StateSnapshotVerbosity::Minimal);
            let _ = message_from_processor_tx
                .send(MessageFromProcessor::StateSnapshotReport { snapshot });
        }
        if let Some(message) = outcome {
            let _ = message_from_processor_tx.send(message);
            return;
        }
        if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    });
    (message_to_processor_tx, message_from_processor_rx)
}

fn load_options(args: &Args) -> Result<Options> {
    let mut options: Options = match &args.options {
        Some(path) => Options::load_from_file(path)
            .with_context(|| format!("could not load options from {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(cycles_per_frame) = args.cycles_per_frame {
        options.cycles_per_frame = cycles_per_frame;
    }
    if args.exit_opcodes {
        options.exit_opcodes_enabled = true;
    }
    Ok(options)
}

/// Loads the program, opens the window and blocks until it closes; returns the process
/// exit status.
fn run(args: Args) -> Result<i32> {
    let options: Options = load_options(&args)?;
    let program: Program = Program::load_from_file(&args.rom)
        .with_context(|| format!("could not read ROM {}", args.rom.display()))?;
    let processor: Processor = Processor::initialise_and_load(program, options)
        .context("could not initialise the processor")?;
    let exit_code: Arc<AtomicI32> = Arc::new(AtomicI32::new(0));
    let app_exit_code: Arc<AtomicI32> = Arc::clone(&exit_code);
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(Vec2::from((INITIAL_WIDTH, INITIAL_HEIGHT))),
        ..Default::default()
    };
    eframe::run_native(
        TITLE_APP_WINDOW,
        native_options,
        Box::new(move |_cc| Box::new(SuperChipApp::new(processor, app_exit_code))),
    )
    .map_err(|e| anyhow!("could not open window: {}", e))?;
    Ok(exit_code.load(Ordering::SeqCst))
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    let args: Args = Args::parse();
    let status: i32 = match run(args) {
        Ok(status) => status,
        Err(e) => {
            error!("{:#}", e);
            EXIT_STATUS_FAULT
        }
    };
    std::process::exit(status);
}
