#![allow(non_snake_case)]

use super::display::Display;
use super::error::{ErrorDetail, SuperChipError};
use super::font::Font;
use super::instruction::Instruction;
use super::keystate::KeyState;
use super::memory::Memory;
use super::options::Options;
use super::program::Program;
use super::stack::Stack;
use log::{debug, error, info, trace, warn};

mod execute; // separate sub-module for all the instruction execution methods
#[cfg(test)]
mod frame_tests; // frame loop, timer and key-wait tests

/// The number of variable registers available.
const VARIABLE_REGISTER_COUNT: usize = 16;
/// The number of RPL user flags.
const RPL_REGISTER_COUNT: usize = 8;
/// The flag register index (VF).
const FLAG_REGISTER: usize = 0xF;

/// An enum used to keep track of the processor execution status.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProcessorStatus {
    /// The processor has been instantiated but memory is empty
    StartingUp,
    /// The processor has been instantiated and font data loaded
    Initialised,
    /// A program has been loaded into the processor's memory
    ProgramLoaded,
    /// The program is being executed
    Running,
    /// The processor is suspended on FX0A until an eligible key is pressed
    WaitingForKeypress,
    /// The processor hit a fatal fault
    Crashed,
    /// The program requested an exit with the given status code
    Completed { exit_code: u8 },
}

/// Selects which variant of [StateSnapshot] [Processor::export_state_snapshot()] returns.
pub enum StateSnapshotVerbosity {
    /// Only the frame buffer state will be reported
    Minimal,
    /// The frame buffer, registers, stack and memory state will all be reported
    Extended,
}

/// A copy of processor state handed to hosting applications (for rendering or diagnostics).
#[derive(Debug, PartialEq)]
pub enum StateSnapshot {
    /// Minimal snapshot containing only the frame buffer state
    MinimalSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
    },
    /// Extended snapshot containing the frame buffer state along with all registers,
    /// stack and memory
    ExtendedSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
        stack: Stack,
        memory: Memory,
        program_counter: u16,
        index_register: u16,
        variable_registers: [u8; VARIABLE_REGISTER_COUNT],
        rpl_registers: [u8; RPL_REGISTER_COUNT],
        delay_timer: u8,
        sound_timer: u8,
        cycles: usize,
        compatibility_mode: bool,
    },
}

/// The virtual machine, and the core public interface to the crate.
///
/// Holds all machine state and exposes methods to load a program and run it either one
/// instruction at a time ([Processor::execute_cycle()]) or one 60 Hz frame at a time
/// ([Processor::execute_frame()]), together with methods for supplying key input and
/// exporting display state to the host application.
#[derive(Debug)]
pub struct Processor {
    // MACHINE STATE FIELDS
    frame_buffer: Display, // The display frame buffer
    stack: Stack,          // The call stack (holds return addresses for subroutines)
    memory: Memory,        // The system memory
    program_counter: u16,  // Points to the next opcode location in memory
    index_register: u16,   // Used to point to memory addresses
    variable_registers: [u8; VARIABLE_REGISTER_COUNT], // General purpose registers V0-VF
    rpl_registers: [u8; RPL_REGISTER_COUNT], // RPL user flags (FX75 / FX85)
    delay_timer: u8,       // Decrements once per frame when non-zero
    sound_timer: u8,       // Decrements once per frame when non-zero
    cycles: usize,         // The number of instructions fetched
    compatibility_mode: bool, // When true FX55/FX65 leave the index register unchanged
    keystate: KeyState,    // Held keys and their key-wait eligibility
    status: ProcessorStatus, // The current execution status of the processor
    // CONFIG AND SETUP FIELDS
    font_start_address: usize, // Where the small font is loaded
    large_font_start_address: usize, // Where the large font is loaded (after the small font)
    program_start_address: usize, // Where the program is loaded
    cycles_per_frame: u32,  // Instruction steps per call to execute_frame()
    exit_opcodes_enabled: bool, // Whether 00FD / 0010 / 0011 end the program
}

impl Processor {
    /// Constructor/builder function that returns a freshly-initialised [Processor] instance
    /// with the supplied program data loaded into memory ready for execution.
    ///
    /// # Arguments
    ///
    /// * `program` - a [Program] instance holding the bytes of the ROM to be executed
    /// * `options` - an [Options] instance holding start-up configuration
    pub fn initialise_and_load(program: Program, options: Options) -> Result<Self, SuperChipError> {
        let mut processor = Processor {
            frame_buffer: Display::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            program_counter: options.program_start_address,
            index_register: 0x0,
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            rpl_registers: [0x0; RPL_REGISTER_COUNT],
            delay_timer: 0x0,
            sound_timer: 0x0,
            cycles: 0,
            compatibility_mode: options.compatibility_mode,
            keystate: KeyState::new(),
            status: ProcessorStatus::StartingUp,
            font_start_address: options.font_start_address as usize,
            large_font_start_address: 0x0,
            program_start_address: options.program_start_address as usize,
            cycles_per_frame: options.cycles_per_frame,
            exit_opcodes_enabled: options.exit_opcodes_enabled,
        };
        if let Err(e) = processor.load_font_data() {
            return Err(processor.crash(e));
        }
        processor.status = ProcessorStatus::Initialised;
        if let Err(e) = processor.load_program(&program) {
            return Err(processor.crash(e));
        }
        processor.status = ProcessorStatus::ProgramLoaded;
        Ok(processor)
    }

    /// Returns a copy of the current state.
    ///
    /// The minimal level returns just a copy of the [Display] frame buffer; the extended level
    /// adds all registers and timers, the [Stack] and the [Memory].
    ///
    /// # Arguments
    ///
    /// * `verbosity` - the amount of state that should be returned
    pub fn export_state_snapshot(&self, verbosity: StateSnapshotVerbosity) -> StateSnapshot {
        match verbosity {
            StateSnapshotVerbosity::Minimal => StateSnapshot::MinimalSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
            },
            StateSnapshotVerbosity::Extended => StateSnapshot::ExtendedSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
                stack: self.stack.clone(),
                memory: self.memory.clone(),
                program_counter: self.program_counter,
                index_register: self.index_register,
                variable_registers: self.variable_registers,
                rpl_registers: self.rpl_registers,
                delay_timer: self.delay_timer,
                sound_timer: self.sound_timer,
                cycles: self.cycles,
                compatibility_mode: self.compatibility_mode,
            },
        }
    }

    /// Returns the current execution status
    pub fn status(&self) -> ProcessorStatus {
        self.status
    }

    /// Returns the exit status requested by the program, once it has exited
    pub fn exit_code(&self) -> Option<u8> {
        match self.status {
            ProcessorStatus::Completed { exit_code } => Some(exit_code),
            _ => None,
        }
    }

    /// Replaces the key latch with a host-sampled bitmask (bit k set means key k is held).
    /// Intended to be called once per frame, before [Processor::execute_frame()].
    ///
    /// # Arguments
    ///
    /// * `keys` - bitmask of held keys
    pub fn set_keys(&mut self, keys: u16) {
        self.keystate.set_keys(keys);
    }

    /// Sets the state of a single key to pressed / not pressed.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - the value to set for the specified key (true means pressed)
    pub fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), SuperChipError> {
        if let Err(e) = self.keystate.set_key_status(key, status) {
            return Err(self.crash(e));
        }
        Ok(())
    }

    /// Returns true if the sound timer is active i.e. if the hosting application should play audio
    pub fn sound_timer_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Loads the small font at the configured address and the large font straight after it.
    /// Returns [ErrorDetail::MemoryAddressOutOfBounds] if the fonts would overlap the program.
    fn load_font_data(&mut self) -> Result<(), ErrorDetail> {
        let small_font: Font = Font::small();
        let large_font: Font = Font::large();
        self.large_font_start_address = self.font_start_address + small_font.font_data_size();
        let fonts_end: usize = self.large_font_start_address + large_font.font_data_size();
        if fonts_end > self.program_start_address {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: fonts_end as u16,
            });
        }
        self.memory
            .write_bytes(self.font_start_address, small_font.font_data())?;
        self.memory
            .write_bytes(self.large_font_start_address, large_font.font_data())?;
        Ok(())
    }

    /// Copies the program into memory.  Anything that does not fit between the program start
    /// address and the end of memory is dropped with a warning.
    fn load_program(&mut self, program: &Program) -> Result<(), ErrorDetail> {
        let capacity: usize = self.memory.max_addressable_size();
        if self.program_start_address >= capacity {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: self.program_start_address as u16,
            });
        }
        let capacity: usize = capacity - self.program_start_address;
        let mut program_data: &[u8] = program.program_data();
        if program.program_data_size() > capacity {
            warn!(
                "program is {} bytes, only the first {} will be loaded",
                program.program_data_size(),
                capacity
            );
            program_data = &program_data[..capacity];
        }
        self.memory
            .write_bytes(self.program_start_address, program_data)?;
        info!(
            "loaded {} byte program at {:#05X}",
            program_data.len(),
            self.program_start_address
        );
        Ok(())
    }

    /// Helper method that "crashes" the processor when an [ErrorDetail] instance is returned from a
    /// function call, and wraps this in an appropriate [SuperChipError] instance before returning
    fn crash(&mut self, inner_error: ErrorDetail) -> SuperChipError {
        error!(
            "processor crashed at {:#05X}: {}",
            self.program_counter, inner_error
        );
        self.status = ProcessorStatus::Crashed;
        SuperChipError {
            state_snapshot_dump: self.export_state_snapshot(StateSnapshotVerbosity::Extended),
            inner_error,
        }
    }

    /// Executes one iteration of the fetch -> decode -> execute cycle.  Returns a boolean
    /// indicating whether the display frame buffer may have changed this cycle.
    ///
    /// Unknown opcodes are logged and skipped.  Once the program has exited or crashed this
    /// returns [ErrorDetail::ExecutionHalted] without touching the processor state.
    pub fn execute_cycle(&mut self) -> Result<bool, SuperChipError> {
        match self.status {
            ProcessorStatus::ProgramLoaded => self.status = ProcessorStatus::Running,
            ProcessorStatus::Running | ProcessorStatus::WaitingForKeypress => {
                // no change
            }
            ProcessorStatus::StartingUp
            | ProcessorStatus::Initialised
            | ProcessorStatus::Completed { .. }
            | ProcessorStatus::Crashed => {
                return Err(SuperChipError {
                    state_snapshot_dump: self
                        .export_state_snapshot(StateSnapshotVerbosity::Extended),
                    inner_error: ErrorDetail::ExecutionHalted,
                });
            }
        }
        self.cycles += 1;
        let opcode_address: u16 = self.program_counter;
        let opcode: u16 = match self.memory.read_two_bytes(opcode_address as usize) {
            Ok(opcode) => opcode,
            Err(e) => return Err(self.crash(e)),
        };
        self.program_counter += 0x2;
        let instruction: Instruction =
            match Instruction::decode_from(opcode, self.exit_opcodes_enabled) {
                Ok(instruction) => instruction,
                Err(ErrorDetail::UnknownInstruction { opcode }) => {
                    warn!(
                        "skipping unrecognised opcode {:#06X} at {:#05X}",
                        opcode, opcode_address
                    );
                    return Ok(false);
                }
                Err(e) => return Err(self.crash(e)),
            };
        trace!(
            "{:#05X}: {:#06X} {}",
            opcode_address,
            opcode,
            instruction.name()
        );
        let display_updated: bool = instruction.updates_display();
        if let Err(e) = self.execute(instruction) {
            return Err(self.crash(e));
        }
        Ok(display_updated)
    }

    /// Executes one 60 Hz frame: up to `cycles_per_frame` instruction steps, ending early if the
    /// processor starts waiting for a key or the program exits, then one timer tick.  Returns
    /// true if any step may have changed the display.
    pub fn execute_frame(&mut self) -> Result<bool, SuperChipError> {
        let mut display_updated: bool = false;
        for _ in 0..self.cycles_per_frame {
            display_updated |= self.execute_cycle()?;
            if self.status != ProcessorStatus::Running {
                break;
            }
        }
        self.tick_timers();
        Ok(display_updated)
    }

    /// Decrements the delay and sound timers (each only if non-zero).  Timers are frozen while
    /// the processor waits for a key.
    pub fn tick_timers(&mut self) {
        if self.status == ProcessorStatus::WaitingForKeypress {
            return;
        }
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Dispatches the passed [Instruction] to its execution method.
    ///
    /// # Arguments
    ///
    /// * `instr` - the instruction to be executed
    fn execute(&mut self, instr: Instruction) -> Result<(), ErrorDetail> {
        match instr {
            Instruction::Op001X { exit_code } => self.execute_001X(exit_code),
            Instruction::Op00CN { n } => self.execute_00CN(n),
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE(),
            Instruction::Op00FA => self.execute_00FA(),
            Instruction::Op00FB => self.execute_00FB(),
            Instruction::Op00FC => self.execute_00FC(),
            Instruction::Op00FD => self.execute_00FD(),
            Instruction::Op00FE => self.execute_00FE(),
            Instruction::Op00FF => self.execute_00FF(),
            Instruction::Op0NNN { nnn } => self.execute_0NNN(nnn),
            Instruction::Op1NNN { nnn } => self.execute_1NNN(nnn),
            Instruction::Op3XY0 { x, y } => self.execute_3XY0(x, y),
            Instruction::Op3XKK { x, kk } => self.execute_3XKK(x, kk),
            Instruction::Op4XKK { x, kk } => self.execute_4XKK(x, kk),
            Instruction::Op6XKK { x, kk } => self.execute_6XKK(x, kk),
            Instruction::Op7XKK { x, kk } => self.execute_7XKK(x, kk),
            Instruction::Op8XY0 { x, y } => self.execute_8XY0(x, y),
            Instruction::Op8XY1 { x, y } => self.execute_8XY1(x, y),
            Instruction::Op8XY2 { x, y } => self.execute_8XY2(x, y),
            Instruction::Op8XY3 { x, y } => self.execute_8XY3(x, y),
            Instruction::Op8XY4 { x, y } => self.execute_8XY4(x, y),
            Instruction::Op8XY5 { x, y } => self.execute_8XY5(x, y),
            Instruction::Op8XY6 { x } => self.execute_8XY6(x),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x } => self.execute_8XYE(x),
            Instruction::Op9XY0 { x, y } => self.execute_9XY0(x, y),
            Instruction::OpANNN { nnn } => self.execute_ANNN(nnn),
            Instruction::OpBNNN { nnn } => self.execute_BNNN(nnn),
            Instruction::OpCXKK { x, kk } => self.execute_CXKK(x, kk),
            Instruction::OpDXY0 { x, y } => self.execute_DXY0(x, y),
            Instruction::OpDXYN { x, y, n } => self.execute_DXYN(x, y, n),
            Instruction::OpEX9E { x } => self.execute_EX9E(x),
            Instruction::OpEXA1 { x } => self.execute_EXA1(x),
            Instruction::OpFX07 { x } => self.execute_FX07(x),
            Instruction::OpFX0A { x } => self.execute_FX0A(x),
            Instruction::OpFX15 { x } => self.execute_FX15(x),
            Instruction::OpFX18 { x } => self.execute_FX18(x),
            Instruction::OpFX1E { x } => self.execute_FX1E(x),
            Instruction::OpFX29 { x } => self.execute_FX29(x),
            Instruction::OpFX30 { x } => self.execute_FX30(x),
            Instruction::OpFX33 { x } => self.execute_FX33(x),
            Instruction::OpFX55 { x } => self.execute_FX55(x),
            Instruction::OpFX65 { x } => self.execute_FX65(x),
            Instruction::OpFX75 { x } => self.execute_FX75(x),
            Instruction::OpFX85 { x } => self.execute_FX85(x),
        }
    }

    /// Logs a status transition worth surfacing at debug level.
    fn set_status(&mut self, status: ProcessorStatus) {
        if self.status != status {
            debug!("status {:?} -> {:?}", self.status, status);
        }
        self.status = status;
    }
}
