// Command loop tests: the library driver and the `dhset` binary.
//
// Protocol: whitespace-separated `(command_char, key)` pairs; `+` add,
// `?` contains, `-` remove; anything else is skipped silently. One
// `OK`/`FAIL` line per recognised command, in input order.
use dh_hashset::command::{run, RunStats};
use dh_hashset::DoubleHashSet;
use std::io::Write;
use std::process::{Command, Stdio};

fn drive(input: &str) -> String {
    let mut set = DoubleHashSet::new();
    let mut out = Vec::new();
    run(input.as_bytes(), &mut out, &mut set).expect("in-memory io");
    String::from_utf8(out).expect("utf8 replies")
}

// Test: the six-name scenario driven through the protocol.
#[test]
fn six_names_session() {
    let input = "+ ann\n+ bob\n+ cid\n+ dee\n+ eve\n+ fay\n\
                 ? ann\n? fay\n- cid\n? cid\n+ cid\n+ ann\n";
    let expected = "OK\nOK\nOK\nOK\nOK\nOK\nOK\nOK\nOK\nFAIL\nOK\nFAIL\n";
    assert_eq!(drive(input), expected);
}

#[test]
fn pairs_may_share_a_line() {
    assert_eq!(drive("+ a + b ? a - b ? b"), "OK\nOK\nOK\nOK\nFAIL\n");
}

#[test]
fn empty_input_prints_nothing() {
    assert_eq!(drive(""), "");
    assert_eq!(drive("   \n\t\n"), "");
}

#[test]
fn stats_count_executed_and_skipped() {
    let mut set = DoubleHashSet::new();
    let mut out = Vec::new();
    let stats = run("! a\n+ a\n# b\n? a\n".as_bytes(), &mut out, &mut set).unwrap();
    assert_eq!(
        stats,
        RunStats {
            executed: 2,
            skipped: 2
        }
    );
    assert!(set.contains(b"a".as_slice()));
    assert!(!set.contains(b"b".as_slice()));
}

// Test: the binary end to end.
// Verifies: replies on stdout only, exit status zero.
#[test]
fn binary_answers_on_stdout() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dhset"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("RUST_LOG")
        .spawn()
        .expect("spawn dhset");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"+ x\n+ x\n? x\n~ y\n- x\n? x\n")
        .expect("write requests");
    let output = child.wait_with_output().expect("dhset exits");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "OK\nFAIL\nOK\nOK\nFAIL\n"
    );
}

// Test: the binary on input that is not UTF-8.
// Verifies: every request after the odd bytes is still answered.
#[test]
fn binary_keeps_going_past_invalid_utf8() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dhset"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("RUST_LOG")
        .spawn()
        .expect("spawn dhset");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"+ a\n+ \xff\xfe\n? a\n+ b\n")
        .expect("write requests");
    let output = child.wait_with_output().expect("dhset exits");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"OK\nOK\nOK\nOK\n");
}
