use super::*;

fn setup_test_processor_with_program(program_data: Vec<u8>) -> Processor {
    let options: Options = Options {
        exit_opcodes_enabled: true,
        ..Options::default()
    };
    Processor::initialise_and_load(Program::new(program_data), options).unwrap()
}

fn setup_test_processor_key_wait() -> Processor {
    // 200: F3 0A (V3 = key)   202: 00 FD (exit)
    setup_test_processor_with_program(vec![0xF3, 0x0A, 0x00, 0xFD])
}

#[test]
fn test_execute_frame_runs_cycles_per_frame() {
    // 200: 70 01 (V0 += 1)   202: 02 00 (jump to 0x200)
    let mut processor: Processor = setup_test_processor_with_program(vec![0x70, 0x01, 0x02, 0x00]);
    processor.execute_frame().unwrap();
    // 10 steps alternate add and jump
    assert!(processor.variable_registers[0x0] == 5 && processor.cycles == 10);
}

#[test]
fn test_execute_frame_custom_cycles_per_frame() {
    let options: Options = Options {
        cycles_per_frame: 4,
        ..Options::default()
    };
    let mut processor: Processor =
        Processor::initialise_and_load(Program::new(vec![0x70, 0x01, 0x02, 0x00]), options)
            .unwrap();
    processor.execute_frame().unwrap();
    assert_eq!(processor.variable_registers[0x0], 2);
}

#[test]
fn test_execute_frame_ticks_timers_once() {
    // 200: 60 05   202: F0 15 (DT = 5)   204: F0 18 (ST = 5)   206: 02 06 (spin)
    let mut processor: Processor =
        setup_test_processor_with_program(vec![0x60, 0x05, 0xF0, 0x15, 0xF0, 0x18, 0x02, 0x06]);
    processor.execute_frame().unwrap();
    assert!(processor.delay_timer == 4 && processor.sound_timer == 4);
}

#[test]
fn test_tick_timers_stops_at_zero() {
    let mut processor: Processor = setup_test_processor_with_program(vec![]);
    processor.delay_timer = 1;
    processor.tick_timers();
    processor.tick_timers();
    assert!(processor.delay_timer == 0 && processor.sound_timer == 0);
}

#[test]
fn test_tick_timers_frozen_while_waiting() {
    let mut processor: Processor = setup_test_processor_with_program(vec![]);
    processor.delay_timer = 3;
    processor.sound_timer = 3;
    processor.status = ProcessorStatus::WaitingForKeypress;
    processor.tick_timers();
    assert!(processor.delay_timer == 3 && processor.sound_timer == 3);
}

#[test]
fn test_execute_frame_stops_on_exit() {
    // 200: 00 11 (exit 1)   202: 60 09
    let mut processor: Processor = setup_test_processor_with_program(vec![0x00, 0x11, 0x60, 0x09]);
    processor.execute_frame().unwrap();
    assert!(
        processor.exit_code() == Some(1)
            && processor.variable_registers[0x0] == 0
            && processor.cycles == 1
    );
}

#[test]
fn test_execute_frame_waits_for_key() {
    let mut processor: Processor = setup_test_processor_key_wait();
    processor.delay_timer = 2;
    processor.execute_frame().unwrap();
    assert!(
        processor.status == ProcessorStatus::WaitingForKeypress
            && processor.program_counter == 0x200
            && processor.cycles == 1
            && processor.delay_timer == 2
    );
}

#[test]
fn test_execute_frame_key_press_resumes() {
    let mut processor: Processor = setup_test_processor_key_wait();
    processor.execute_frame().unwrap();
    processor.set_keys(1 << 0x7);
    processor.execute_frame().unwrap();
    assert!(processor.variable_registers[0x3] == 0x7 && processor.exit_code() == Some(0));
}

#[test]
fn test_key_wait_ignores_key_held_beforehand() {
    let mut processor: Processor = setup_test_processor_key_wait();
    // Key 5 is already down when FX0A first runs
    processor.set_keys(1 << 0x5);
    processor.execute_frame().unwrap();
    processor.set_keys(1 << 0x5);
    processor.execute_frame().unwrap();
    let still_waiting: bool = processor.status == ProcessorStatus::WaitingForKeypress;
    // Released, then pressed again
    processor.set_keys(0x0);
    processor.execute_frame().unwrap();
    processor.set_keys(1 << 0x5);
    processor.execute_frame().unwrap();
    assert!(
        still_waiting
            && processor.variable_registers[0x3] == 0x5
            && processor.exit_code() == Some(0)
    );
}

#[test]
fn test_key_wait_other_key_becomes_eligible() {
    let mut processor: Processor = setup_test_processor_key_wait();
    processor.set_keys(1 << 0x5);
    processor.execute_frame().unwrap();
    // Key 5 still held, key 9 freshly pressed
    processor.set_keys((1 << 0x5) | (1 << 0x9));
    processor.execute_frame().unwrap();
    assert!(processor.variable_registers[0x3] == 0x9 && processor.exit_code() == Some(0));
}

#[test]
fn test_key_wait_consumed_key_needs_release() {
    // 200: F3 0A   202: F4 0A   204: 00 FD
    let mut processor: Processor =
        setup_test_processor_with_program(vec![0xF3, 0x0A, 0xF4, 0x0A, 0x00, 0xFD]);
    processor.execute_frame().unwrap();
    processor.set_keys(1 << 0x2);
    // First wait takes key 2; the second must not reuse the same press
    processor.execute_frame().unwrap();
    let first_key: u8 = processor.variable_registers[0x3];
    let waiting_again: bool = processor.status == ProcessorStatus::WaitingForKeypress;
    processor.set_keys(0x0);
    processor.execute_frame().unwrap();
    processor.set_keys(1 << 0x2);
    processor.execute_frame().unwrap();
    assert!(
        first_key == 0x2
            && waiting_again
            && processor.variable_registers[0x4] == 0x2
            && processor.exit_code() == Some(0)
    );
}

#[test]
fn test_set_key_status_satisfies_wait() {
    let mut processor: Processor = setup_test_processor_key_wait();
    processor.execute_frame().unwrap();
    processor.set_key_status(0xC, true).unwrap();
    processor.execute_frame().unwrap();
    assert_eq!(processor.variable_registers[0x3], 0xC);
}

#[test]
fn test_execute_frame_after_exit_error() {
    let mut processor: Processor = setup_test_processor_with_program(vec![0x00, 0xFD]);
    processor.execute_frame().unwrap();
    assert_eq!(
        processor.execute_frame().unwrap_err().inner_error,
        ErrorDetail::ExecutionHalted
    );
}

#[test]
fn test_execute_frame_reports_display_update() {
    // 200: 60 00   202: A0 00 (I = glyph 0)   204: D0 05   206: 02 06 (spin)
    let mut processor: Processor = setup_test_processor_with_program(vec![
        0x60, 0x00, 0xA0, 0x00, 0xD0, 0x05, 0x02, 0x06,
    ]);
    let display_updated: bool = processor.execute_frame().unwrap();
    let second_frame: bool = processor.execute_frame().unwrap();
    assert!(
        display_updated
            && !second_frame
            && processor.status == ProcessorStatus::Running
            && processor.frame_buffer.row_words(0).0 == 0xF000_0000_0000_0000
    );
}

#[test]
fn test_resolution_toggle_round_trip() {
    // 200: 00 FF (high)   202: 00 FE (low)   204: 00 FD
    let mut processor: Processor =
        setup_test_processor_with_program(vec![0x00, 0xFF, 0x00, 0xFE, 0x00, 0xFD]);
    processor.frame_buffer.set_pixel(9, 3, true);
    processor.frame_buffer.set_pixel(63, 31, true);
    let before: Display = processor.frame_buffer.clone();
    processor.execute_frame().unwrap();
    assert_eq!(processor.frame_buffer, before);
}
