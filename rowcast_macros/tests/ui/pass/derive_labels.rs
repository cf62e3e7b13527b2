#![allow(non_snake_case)]

use rowcast_core::Mappable as _;
use rowcast_macros::Mappable;

#[derive(Mappable, Debug, Default)]
struct Metrics {
    #[db]
    userName: String,
    // Consecutive capitals split individually: user_i_d, not user_id.
    #[db]
    userID: i64,
    // An empty override falls back to the derived label.
    #[db(column = "")]
    rawScore: f64,
}

fn main() {
    let set = Metrics::bindings();
    let labels: Vec<String> = set.iter().map(|b| b.label().to_string()).collect();
    assert_eq!(labels, ["user_name", "user_i_d", "raw_score"]);

    let fields: Vec<&str> = set.iter().map(|b| b.field()).collect();
    assert_eq!(fields, ["userName", "userID", "rawScore"]);
}
