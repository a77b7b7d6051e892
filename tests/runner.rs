use std::{fs, process::Command, str::from_utf8};

const BIN: &str = env!("CARGO_BIN_EXE_elfmt");

fn format(name: &str) -> (bool, String, String) {
    let output = Command::new(BIN)
        .arg(name)
        .output()
        .expect("Failed to execute elfmt");

    (
        output.status.success(),
        from_utf8(&output.stdout).unwrap().to_owned(),
        from_utf8(&output.stderr).unwrap().to_owned(),
    )
}

fn get_expected(name: &str) -> String {
    let name = format!("{}.expected", name.trim_end_matches(".elt"));
    fs::read_to_string(name).unwrap()
}

#[test]
fn test_all_files() {
    let files = fs::read_dir("tests/files").unwrap();

    for file in files {
        let name = file.unwrap().path().display().to_string();

        if !name.ends_with(".elt") {
            continue;
        }

        let (success, output, errors) = format(&name);
        assert!(success, "{} failed:\n{}", name, errors);
        assert_eq!(get_expected(&name), output, "{}", name);

        // the formatted text is already canonical
        let (success, again, _) = format(&format!("{}.expected", name.trim_end_matches(".elt")));
        assert!(success);
        assert_eq!(output, again, "{}", name);
    }
}

#[test]
fn test_missing_argument_fails() {
    let output = Command::new(BIN)
        .output()
        .expect("Failed to execute elfmt");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_file_fails() {
    let (success, output, errors) = format("tests/files/missing.elt");

    assert!(!success);
    assert_eq!("", output);
    assert!(errors.starts_with("elfmt: reading tests/files/missing.elt: "));
}

#[test]
fn test_syntax_error_fails_without_output() {
    let (success, output, errors) = format("tests/broken/unclosed.elt");

    assert!(!success);
    assert_eq!("", output);
    assert!(errors.starts_with("error: Failed to lex token, because: Unexpected end of file\n"));
    assert!(errors.ends_with("elfmt: parsing tests/broken/unclosed.elt: 1 syntax error\n"));
}
