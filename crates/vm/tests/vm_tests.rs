//! Integration tests for the tapeworm VM.
//!
//! Organized by instruction group, followed by whole-program regressions.

use tapeworm_common::Program;
use tapeworm_vm::{run, CellWidth, Config, EofPolicy, Halt, Machine, PointerPolicy, RunError};

// ============================================================
// Helper functions
// ============================================================

/// Load a program that is known to be balanced.
fn load(source: &str) -> Program {
    Program::load(source).unwrap()
}

/// Run with the default configuration and no input; return the tape prefix.
fn tape_after(source: &str, prefix: usize) -> Vec<u32> {
    let program = load(source);
    let mut vm = Machine::new(&program, &Config::default()).unwrap();
    vm.run(&b""[..], Vec::new()).unwrap();
    vm.tape().cells()[..prefix].to_vec()
}

/// Run with the given input; return output bytes.
fn output_of(source: &str, input: &[u8]) -> Vec<u8> {
    let program = load(source);
    let mut output = Vec::new();
    run(&program, &Config::default(), input, &mut output).unwrap();
    output
}

// ============================================================
// Cell arithmetic
// ============================================================

#[test]
fn increment_from_255_wraps_to_0() {
    let source = format!("{}+", "+".repeat(255));
    assert_eq!(tape_after(&source, 1), vec![0]);
}

#[test]
fn decrement_from_0_wraps_to_255() {
    assert_eq!(tape_after("-", 1), vec![255]);
}

#[test]
fn sixteen_bit_decrement_wraps() {
    let program = load("-");
    let config = Config::default().with_cell_width(CellWidth::Bits16);
    let mut vm = Machine::new(&program, &config).unwrap();
    vm.run(&b""[..], Vec::new()).unwrap();
    assert_eq!(vm.tape().get(), 0xffff);
}

// ============================================================
// Tape pointer
// ============================================================

#[test]
fn move_right_from_last_cell_wraps_to_0() {
    let program = load(">>>>+");
    let config = Config::default().with_tape_size(4);
    let mut vm = Machine::new(&program, &config).unwrap();
    vm.run(&b""[..], Vec::new()).unwrap();
    assert_eq!(vm.tape().pointer(), 0);
    assert_eq!(vm.tape().cells(), &[1, 0, 0, 0]);
}

#[test]
fn move_left_from_0_wraps_to_last_cell() {
    let program = load("<+");
    let mut vm = Machine::new(&program, &Config::default()).unwrap();
    vm.run(&b""[..], Vec::new()).unwrap();
    assert_eq!(vm.tape().pointer(), 29_999);
    assert_eq!(vm.tape().cells()[29_999], 1);
}

#[test]
fn strict_tape_faults_instead_of_wrapping() {
    let program = load(">>>>");
    let config = Config::default()
        .with_tape_size(4)
        .with_pointer_policy(PointerPolicy::Fault);
    let err = run(&program, &config, &b""[..], Vec::new()).unwrap_err();
    assert_eq!(err, RunError::TapeOutOfBounds { at: 3, pointer: 3 });
}

// ============================================================
// Loops
// ============================================================

#[test]
fn clear_loop_on_5_runs_body_exactly_5_times() {
    let program = load("+++++[-]");
    let mut vm = Machine::new(&program, &Config::default()).unwrap();
    let halt = vm.run(&b""[..], Vec::new()).unwrap();
    assert_eq!(vm.tape().get(), 0);
    // 5 increments, 1 loop entry, 5 x ('-' + ']').
    assert_eq!(halt.steps, 5 + 1 + 5 * 2);
}

#[test]
fn empty_loop_on_nonzero_cell_never_terminates() {
    let program = load("+[]");
    let config = Config::default().with_step_limit(100_000);
    let err = run(&program, &config, &b""[..], Vec::new()).unwrap_err();
    assert_eq!(err, RunError::StepLimitExceeded { limit: 100_000 });
}

#[test]
fn empty_loop_on_zero_cell_is_skipped() {
    let program = load("[]");
    let halt = run(&program, &Config::default(), &b""[..], Vec::new()).unwrap();
    assert_eq!(
        halt,
        Halt {
            steps: 1,
            open_loops: 0
        }
    );
}

#[test]
fn skipped_loop_body_is_never_executed() {
    assert_eq!(tape_after("[>+++<]+", 2), vec![1, 0]);
}

#[test]
fn move_value_idiom() {
    assert_eq!(tape_after("++>++<[->+<]", 2), vec![0, 4]);
}

#[test]
fn nested_loops_golden() {
    // Outer runs 3 times; each adds 2 to cell 1 and drains it into cell 2.
    assert_eq!(tape_after("+++[>++[>+<-]<-]", 4), vec![0, 0, 6, 0]);
}

#[test]
fn multiplication_nested_three_deep() {
    // 2 * 3 * 4 = 24 in cell 3.
    assert_eq!(
        tape_after("++[>+++[>++++[>+<-]<-]<-]", 4),
        vec![0, 0, 0, 24]
    );
}

#[test]
fn comments_inside_loops_are_ignored() {
    assert_eq!(
        tape_after("++ two\n[ loop: -> move + back < ]", 2),
        vec![0, 2]
    );
}

// ============================================================
// I/O
// ============================================================

#[test]
fn outputs_are_emitted_in_execution_order() {
    assert_eq!(output_of("+.+.+.", b""), vec![1, 2, 3]);
}

#[test]
fn input_is_stored_in_current_cell() {
    assert_eq!(output_of(",+.", b"a"), b"b");
}

#[test]
fn cat_program_copies_input() {
    assert_eq!(output_of(",[.,]", b"hello\n"), b"hello\n");
}

#[test]
fn eof_unchanged_keeps_cell() {
    let program = load("+++++,");
    let config = Config::default().with_eof_policy(EofPolicy::Unchanged);
    let mut vm = Machine::new(&program, &config).unwrap();
    vm.run(&b""[..], Vec::new()).unwrap();
    assert_eq!(vm.tape().get(), 5);
}

#[test]
fn failing_output_is_reported() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let program = load("+.");
    let err = run(&program, &Config::default(), &b""[..], Broken).unwrap_err();
    assert!(matches!(err, RunError::Output { at: 1, .. }), "{err:?}");
}

#[test]
fn hello_world() {
    let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.\
                  +++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    assert_eq!(output_of(source, b""), b"Hello World!\n");
}

// ============================================================
// Shared program store
// ============================================================

#[test]
fn one_program_drives_independent_tapes() {
    let program = load(",[->+<]");
    let config = Config::default();

    let mut first = Machine::new(&program, &config).unwrap();
    let mut second = Machine::new(&program, &config).unwrap();
    first.run(&[7u8][..], Vec::new()).unwrap();
    second.run(&[9u8][..], Vec::new()).unwrap();

    assert_eq!(first.tape().cells()[..2], [0, 7]);
    assert_eq!(second.tape().cells()[..2], [0, 9]);
}

#[test]
fn programs_can_be_shared_across_threads() {
    let program = load("++++[>++<-]>.");
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut output = Vec::new();
                run(&program, &Config::default(), &b""[..], &mut output).unwrap();
                assert_eq!(output, vec![8]);
            });
        }
    });
}
