//! End-to-end check of the demo pair: build, backtrack, render.

use warpalign_dtw::Dtw;
use warpalign_report::{AlignmentReport, render_grid};

const X: [f64; 6] = [1.0, 2.0, 3.0, 3.0, 2.0, 1.0];
const Y: [f64; 6] = [1.0, 1.0, 2.0, 3.0, 3.0, 2.0];

#[test]
fn demo_grid_and_path() {
    let alignment = Dtw::new().align(&X, &Y).expect("valid demo input");

    let grid = render_grid(&X, &Y, alignment.matrix()).expect("shapes match");
    let expected = "\
x\\y [1] [1] [2] [3] [3] [2]
[1] [0] [0] [1] [3] [5] [6]
[2] [1] [1] [0] [1] [2] [2]
[3] [3] [3] [1] [0] [0] [1]
[3] [5] [5] [2] [0] [0] [1]
[2] [6] [6] [2] [1] [1] [0]
[1] [6] [6] [3] [3] [3] [1]
";
    assert_eq!(grid, expected);

    assert_eq!(
        alignment.path().to_string(),
        "[(0, 0), (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 5)]"
    );
}

#[test]
fn demo_report_json() {
    let alignment = Dtw::new().align(&X, &Y).expect("valid demo input");
    let report = AlignmentReport::new(&X, &Y, &alignment).expect("shapes match");
    assert_eq!(report.distance(), 1.0);

    let value: serde_json::Value =
        serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["path"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["matrix"][5][5], serde_json::json!(1.0));
}
