use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::tempdir;

fn depman() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("depman"));
    for var in [
        "DEPMAN_ALLOW_CYCLES",
        "DEPMAN_CASCADE",
        "DEPMAN_FORMAT",
        "DEPMAN_ECHO",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

const CLASSIC_SCRIPT: &str = "\
DEPEND TELNET TCPIP NETCARD
DEPEND TCPIP NETCARD
DEPEND DNS TCPIP NETCARD
DEPEND BROWSER TCPIP HTML
INSTALL NETCARD
INSTALL TELNET
INSTALL foo
REMOVE NETCARD
INSTALL BROWSER
INSTALL DNS
LIST
REMOVE TELNET
REMOVE NETCARD
REMOVE DNS
REMOVE NETCARD
INSTALL NETCARD
REMOVE TCPIP
REMOVE BROWSER
REMOVE TCPIP
LIST
END
";

#[test]
fn test_end_to_end_script_from_stdin() {
    let expected = "\
DEPEND TELNET TCPIP NETCARD
DEPEND TCPIP NETCARD
DEPEND DNS TCPIP NETCARD
DEPEND BROWSER TCPIP HTML
INSTALL NETCARD
   Installing NETCARD
INSTALL TELNET
   Installing TCPIP
   Installing TELNET
INSTALL foo
   Installing foo
REMOVE NETCARD
   NETCARD is still needed.
INSTALL BROWSER
   Installing HTML
   Installing BROWSER
INSTALL DNS
   Installing DNS
LIST
    TELNET
    TCPIP
    NETCARD
    DNS
    BROWSER
    HTML
    foo
REMOVE TELNET
   Removing TELNET
REMOVE NETCARD
   NETCARD is still needed.
REMOVE DNS
   Removing DNS
REMOVE NETCARD
   NETCARD is still needed.
INSTALL NETCARD
   NETCARD is already installed.
REMOVE TCPIP
   TCPIP is still needed.
REMOVE BROWSER
   Removing BROWSER
   Removing TCPIP
   Removing NETCARD
   Removing HTML
REMOVE TCPIP
   TCPIP is not installed.
LIST
    foo
END
";

    depman()
        .write_stdin(CLASSIC_SCRIPT)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_script_file_argument() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("commands.txt");
    std::fs::write(&script, "DEPEND APP LIB1 LIB2\nINSTALL APP\nLIST\nEND\n").unwrap();

    depman()
        .arg(&script)
        .assert()
        .success()
        .stdout(
            "DEPEND APP LIB1 LIB2\n\
             INSTALL APP\n   Installing LIB1\n   Installing LIB2\n   Installing APP\n\
             LIST\n    APP\n    LIB1\n    LIB2\n\
             END\n",
        );
}

#[test]
fn test_missing_script_file_fails() {
    let dir = tempdir().unwrap();

    depman()
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_no_echo_flag() {
    depman()
        .arg("--no-echo")
        .write_stdin("DEPEND A B\nDEPEND C B\nINSTALL A\nINSTALL C\nREMOVE A\nREMOVE C\n")
        .assert()
        .success()
        .stdout(
            "   Installing B\n   Installing A\n\
             \x20  Installing C\n\
             \x20  Removing A\n\
             \x20  Removing C\n   Removing B\n",
        );
}

#[test]
fn test_cycle_rejected_by_default() {
    depman()
        .arg("--no-echo")
        .write_stdin("DEPEND A B\nDEPEND B A\nINSTALL A\nLIST\n")
        .assert()
        .success()
        .stdout("   Cannot install A: cyclic dependency A -> B -> A.\n");
}

#[test]
fn test_cycle_allowed_with_flag() {
    depman()
        .args(["--no-echo", "--allow-cycles"])
        .write_stdin("DEPEND A B\nDEPEND B A\nINSTALL A\nLIST\n")
        .assert()
        .success()
        .stdout("   Installing B\n   Installing A\n    A\n    B\n");
}

#[test]
fn test_cycle_allowed_via_environment() {
    depman()
        .env("DEPMAN_ALLOW_CYCLES", "1")
        .env("DEPMAN_ECHO", "off")
        .write_stdin("DEPEND A A\nINSTALL A\n")
        .assert()
        .success()
        .stdout("   Installing A\n");
}

#[test]
fn test_implicit_cascade_keeps_explicit_dependencies() {
    depman()
        .args(["--no-echo", "--cascade", "implicit"])
        .write_stdin("DEPEND APP LIB UTIL\nINSTALL LIB\nINSTALL APP\nREMOVE APP\nLIST\n")
        .assert()
        .success()
        .stdout(
            "   Installing LIB\n\
             \x20  Installing UTIL\n   Installing APP\n\
             \x20  Removing APP\n   Removing UTIL\n\
             \x20   LIB\n",
        );
}

#[test]
fn test_json_output() {
    depman()
        .args(["--format", "json"])
        .write_stdin("INSTALL A\nREMOVE A\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                r#"{"kind":"install","status":"installed","installed":[{"name":"A","implicit":false}]}"#,
            )
            .and(predicate::str::contains(
                r#"{"kind":"remove","status":"removed","name":"A","cascaded":[]}"#,
            ))
            .and(predicate::str::contains("INSTALL A").not()),
        );
}

#[test]
fn test_invalid_environment_value_fails() {
    depman()
        .env("DEPMAN_CASCADE", "sometimes")
        .write_stdin("LIST\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn test_environment_selects_json_and_cascade() {
    depman()
        .env("DEPMAN_FORMAT", "json")
        .env("DEPMAN_CASCADE", "implicit")
        .write_stdin("DEPEND APP LIB\nINSTALL LIB\nINSTALL APP\nREMOVE APP\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"kind":"remove","status":"removed","name":"APP","cascaded":[]}"#,
        ));
}

#[test]
fn test_flag_overrides_environment() {
    depman()
        .env("DEPMAN_ECHO", "yes")
        .arg("--no-echo")
        .write_stdin("INSTALL A\n")
        .assert()
        .success()
        .stdout("   Installing A\n");
}

#[test]
fn test_invalid_utf8_line_is_skipped() {
    depman()
        .arg("--no-echo")
        .write_stdin(&b"INSTALL A\n\xff\xfe BAD\nLIST\n"[..])
        .assert()
        .success()
        .stdout("   Installing A\n    A\n");
}

#[test]
fn test_help_lists_commands() {
    depman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEPEND NAME DEP..."));
}
