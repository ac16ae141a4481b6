//! Config file loading end to end.
//!
//! These tests steer `RosterConfig::load` through the `ROSTER_CONFIG`
//! path override. The environment is process-global, so everything that
//! touches the variable lives in a single test.

use std::io::Write;

use roster_engine::RosterConfig;

#[test]
fn load_honors_config_path_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "[api]\ntoken = \"file-token\"\n\n[app]\nascii_only = true"
    )
    .unwrap();

    // SAFETY: no other test in this binary reads ROSTER_CONFIG.
    unsafe { std::env::set_var("ROSTER_CONFIG", &path) };

    let loaded = RosterConfig::load().unwrap().expect("config file exists");
    assert_eq!(
        loaded.api.as_ref().and_then(|api| api.token.as_deref()),
        Some("file-token")
    );
    assert!(loaded.app.as_ref().is_some_and(|app| app.ascii_only));

    // A malformed file is an error, not a silent default.
    std::fs::write(&path, "[api\nbroken").unwrap();
    assert!(RosterConfig::load().is_err());

    // A missing file is Ok(None).
    std::fs::remove_file(&path).unwrap();
    assert!(RosterConfig::load().unwrap().is_none());

    unsafe { std::env::remove_var("ROSTER_CONFIG") };
}
