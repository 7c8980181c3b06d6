mod common;

use approx::assert_relative_eq;
use xafsprep::{Session, SessionSettings, SessionState};

use common::FixedProvider;

fn session(dir_name: &str) -> Session<FixedProvider> {
    let settings = SessionSettings {
        samples_dir: common::scratch_dir(dir_name),
        ..SessionSettings::default()
    };
    Session::new(common::provider(), settings)
}

fn run(session: &mut Session<FixedProvider>, script: &str) -> String {
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

const SETUP_FE2O3: &str = "\
sample new Fe2O3
sample setup
0
5.24
2
Fe
0.7
O
0.3
";

#[test]
fn test_quit_exits() {
    let mut s = session("quit");
    let out = run(&mut s, "quit\nlist\n");
    assert_eq!(s.state(), SessionState::Exited);
    assert!(!out.contains("No samples"));
}

#[test]
fn test_end_of_input_exits() {
    let mut s = session("eof");
    run(&mut s, "help\n");
    assert_eq!(s.state(), SessionState::Exited);
}

#[test]
fn test_help_and_bad_commands() {
    let mut s = session("help");
    let out = run(&mut s, "help\nfrobnicate\nsample explode\nsample\n\n   \nquit\n");
    assert!(out.contains("sample dilute [percent]"));
    assert_eq!(out.matches("Bad command name. Please re-input.").count(), 1);
    assert_eq!(
        out.matches("Bad subcommand under command 'sample' -- Please re-input.")
            .count(),
        2
    );
    assert!(s.registry().is_empty());
}

#[test]
fn test_new_requires_one_word_name() {
    let mut s = session("new");
    let out = run(&mut s, "sample new\nsample new two words\nsample new Fe2O3\nquit\n");
    assert_eq!(
        out.matches("A one-word sample name is required.").count(),
        2
    );
    assert_eq!(s.registry().len(), 1);
    assert_eq!(s.registry().get(0).unwrap().name(), "Fe2O3");
}

#[test]
fn test_list_without_samples() {
    let mut s = session("list-empty");
    let out = run(&mut s, "list\nsample compute\nquit\n");
    assert_eq!(out.matches("No samples have been created yet.").count(), 2);
    assert!(!out.contains("Enter the ID"));
}

#[test]
fn test_sample_commands_abort_without_samples() {
    for command in [
        "sample rename",
        "sample setup",
        "sample compute",
        "sample dilute 0.2",
        "sample dilute",
        "sample write",
    ] {
        let mut s = session("empty-abort");
        let out = run(&mut s, &format!("{command}\nquit\n"));
        assert_eq!(
            out.matches("No samples have been created yet.").count(),
            1,
            "{command}"
        );
        assert!(!out.contains("Enter the ID"), "{command}");
        assert!(!out.contains("dilution percentage"), "{command}");
        assert!(s.registry().is_empty());
    }
}

#[test]
fn test_names_cannot_leave_samples_dir() {
    let mut s = session("escape");
    let out = run(
        &mut s,
        "sample new ../escaped\nsample new /tmp/x\nsample new a\\b\nsample new ..\nquit\n",
    );
    assert_eq!(out.matches("Sample names cannot contain").count(), 4);
    assert!(s.registry().is_empty());

    let mut s = session("escape-rename");
    let out = run(
        &mut s,
        "sample new safe\nsample rename\n0\n../escaped\n.\ninside\nsample write\n0\nquit\n",
    );
    assert_eq!(out.matches("Invalid input.").count(), 2);
    assert_eq!(s.registry().get(0).unwrap().name(), "inside");

    let dir = s.settings().samples_dir.clone();
    assert!(dir.join("inside.txt").is_file());
    assert!(!dir.parent().unwrap().join("escaped.txt").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_setup_and_compute_scenario() {
    let mut s = session("compute");
    let script = format!("{SETUP_FE2O3}sample compute\n0\n10\nquit\n");
    let out = run(&mut s, &script);

    assert!(out.contains("Sample has been successfully set up."));
    assert!(out.contains("Computation successful."));

    let sample = s.registry().get(0).unwrap();
    assert_eq!(sample.density(), Some(5.24));
    let elements: Vec<&str> = sample.elements().collect();
    assert_eq!(elements, ["Fe", "O"]);

    let pellet = sample.pellet().unwrap();
    assert_eq!(pellet.energy_kev, 10.0);
    assert_relative_eq!(pellet.mu, (0.7 * 171.0 + 0.3 * 5.95) * 5.24, max_relative = 1e-12);
    assert!(pellet.mass_g > 0.0);
}

#[test]
fn test_prompts_retry_on_bad_input() {
    let mut s = session("retry");
    let script = "\
sample new Fe2O3
sample setup
9
abc
0
-1
5.24
two
2
Fe
lots
0.7
O
0.3
quit
";
    let out = run(&mut s, script);
    assert!(out.contains("Sample has been successfully set up."));
    // two bad IDs, a negative density, a bad count and a bad fraction
    assert_eq!(out.matches("Invalid input.").count(), 5);
    assert_eq!(s.registry().get(0).unwrap().constituents().len(), 2);
}

#[test]
fn test_cancel_leaves_composition_untouched() {
    let mut s = session("cancel");
    let script = format!("{SETUP_FE2O3}sample setup\n0\n3.0\n3\nZn\n0.5\ncancel\nquit\n");
    let out = run(&mut s, &script);

    assert!(out.contains("Command cancelled."));
    assert_eq!(s.state(), SessionState::Exited);
    let sample = s.registry().get(0).unwrap();
    assert_eq!(sample.density(), Some(5.24));
    assert_eq!(sample.constituents().len(), 2);
}

#[test]
fn test_end_of_input_mid_prompt_ends_session() {
    let mut s = session("eof-prompt");
    let script = format!("{SETUP_FE2O3}sample setup\n0\n3.0\n");
    run(&mut s, &script);
    assert_eq!(s.state(), SessionState::Exited);
    assert_eq!(s.registry().get(0).unwrap().density(), Some(5.24));
}

#[test]
fn test_rename() {
    let mut s = session("rename");
    let out = run(&mut s, "sample new old\nsample rename\n0\nnew name\nhematite\nquit\n");
    assert!(out.contains("Sample renamed."));
    assert_eq!(s.registry().get(0).unwrap().name(), "hematite");
}

#[test]
fn test_dilute_appends_new_sample() {
    let mut s = session("dilute");
    let script = format!("{SETUP_FE2O3}sample dilute 0.2\n0\nlist\nquit\n");
    let out = run(&mut s, &script);

    assert!(out.contains("Dilution successful."));
    assert!(out.contains("1. Fe2O3_%_0.2"));
    assert_eq!(s.registry().len(), 2);

    let original = s.registry().get(0).unwrap();
    assert_eq!(original.fraction_of("Fe"), Some(0.7));
    assert_eq!(original.fraction_of("B"), None);

    let diluted = s.registry().get(1).unwrap();
    assert_relative_eq!(diluted.fraction_of("B").unwrap(), 0.0872, epsilon = 1e-12);
    assert_relative_eq!(diluted.fraction_of("N").unwrap(), 0.1128, epsilon = 1e-12);
    assert_relative_eq!(diluted.fraction_of("Fe").unwrap(), 0.56, epsilon = 1e-12);
}

#[test]
fn test_dilute_rejects_bad_percent_without_prompting() {
    let mut s = session("dilute-bad");
    let out = run(
        &mut s,
        "sample new x\nsample dilute\nsample dilute 1.5\nsample dilute lots\nquit\n",
    );
    assert_eq!(
        out.matches("Enter a dilution percentage between 0-1.").count(),
        3
    );
    assert!(!out.contains("Enter the ID"));
    assert_eq!(s.registry().len(), 1);
}

#[test]
fn test_compute_failure_is_reported() {
    let mut s = session("compute-fail");
    let script = "\
sample new mystery
sample setup
0
1.0
1
Xx
1.0
sample compute
0
10
quit
";
    let out = run(&mut s, script);
    assert!(out.contains("Error: cross-section lookup failed for 'Xx'"));
    assert!(!out.contains("Computation successful."));
    assert!(s.registry().get(0).unwrap().pellet().is_none());
    assert_eq!(s.state(), SessionState::Exited);
}

#[test]
fn test_write_report_to_screen_and_file() {
    let mut s = session("write");
    let script = format!("{SETUP_FE2O3}sample compute\n0\n10\nsample write\n0\nquit\n");
    let out = run(&mut s, &script);

    assert!(out.contains("Sample Name: Fe2O3"));
    assert!(out.contains("Pellet Radius (cm): 0.65"));
    assert!(out.contains("Sample has been saved to Fe2O3.txt."));

    let path = s.settings().samples_dir.join("Fe2O3.txt");
    let file = std::fs::read_to_string(&path).unwrap();
    assert!(file.contains("Sample Name: Fe2O3"));
    assert!(file.contains("0.7  Fe"));
    assert!(out.contains(&file));
    let _ = std::fs::remove_dir_all(&s.settings().samples_dir);
}

#[test]
fn test_write_failure_keeps_session_alive() {
    let blocker = common::scratch_dir("write-blocked");
    std::fs::write(&blocker, "not a directory").unwrap();

    let settings = SessionSettings {
        samples_dir: blocker.clone(),
        ..SessionSettings::default()
    };
    let mut s = Session::new(common::provider(), settings);
    let out = run(&mut s, "sample new x\nsample write\n0\nlist\nquit\n");

    assert!(out.contains("Could not save sample to"));
    assert!(out.contains("0. x"));
    assert_eq!(s.state(), SessionState::Exited);
    let _ = std::fs::remove_file(&blocker);
}
