use std::fs;

use timon::run_source;
use walkdir::WalkDir;

#[test]
fn example_scripts_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "tim")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Failed to read {expected_path:?}: {e}")
                       });

        count += 1;
        let mut out = Vec::new();
        if let Err(e) = run_source(&source, &mut out) {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(String::from_utf8(out).unwrap(),
                   expected,
                   "wrong output for {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
