use std::io::Write;

use fuzzy_control::{Error, SystemConfig};

const REFLECTION: &str = r#"
[inference]
defuzzification = "boa"

[[variables]]
name = "reflection"
range = [0.0, 1.0]
step = 0.01
terms.low = { shape = "trapezoidal", points = [0.0, 0.1, 0.2, 0.3] }
terms.gray = { shape = "triangular", points = [0.2, 0.4, 0.5] }
terms.dark_gray = { shape = "triangular", points = [0.4, 0.6, 0.8] }
terms.high = { shape = "trapezoidal", points = [0.7, 0.8, 0.9, 1.0] }

[[variables]]
name = "turn"
range = [-1.0, 1.0]
step = 0.05
terms.left = { shape = "triangular", points = [-1.0, -1.0, 0.0] }
terms.straight = { shape = "triangular", points = [-0.5, 0.0, 0.5] }
terms.right = { shape = "triangular", points = [0.0, 1.0, 1.0] }

[[rules]]
premise = { is = ["reflection", "low"] }
then = [["turn", "left"]]

[[rules]]
premise = { any = [{ is = ["reflection", "gray"] }, { is = ["reflection", "dark_gray"] }] }
then = [["turn", "straight"]]

[[rules]]
premise = { is = ["reflection", "high"] }
then = [["turn", "right"]]
"#;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();

    file.write_all(REFLECTION.as_bytes()).unwrap();

    let system = SystemConfig::load(file.path()).unwrap().build().unwrap();
    let reflection = system.variable("reflection").unwrap();

    assert_eq!(reflection.range(), 0. ..=1.);
    assert_eq!(reflection.membership(&"gray".to_owned(), 0.4), Some(1.));

    // Symmetric straight-ahead response
    let turn = system.compute([("reflection", 0.5)]).unwrap()["turn"];

    assert!(turn.abs() < 1e-9, "{turn}");

    // Mostly white line, steer left; mostly black, steer right
    let left = system.compute([("reflection", 0.1)]).unwrap()["turn"];
    let right = system.compute([("reflection", 0.9)]).unwrap()["turn"];

    assert!(left < -0.2, "{left}");
    assert!(right > 0.2, "{right}");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(SystemConfig::load(&path), Err(Error::Io { path: p, .. }) if p == path));
}

#[test]
fn test_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();

    file.write_all(b"[[variables]]\nname = 3\n").unwrap();

    assert!(matches!(SystemConfig::load(file.path()), Err(Error::Config(_))));
}

#[test]
fn test_missing_and_unknown_inputs() {
    let system = SystemConfig::from_toml_str(REFLECTION).unwrap().build().unwrap();

    assert!(matches!(
        system.compute([]),
        Err(Error::MissingInput { variable }) if variable == "reflection"
    ));
    assert!(matches!(
        system.compute([("colour", 0.5)]),
        Err(Error::UnknownVariable(name)) if name == "colour"
    ));
}
