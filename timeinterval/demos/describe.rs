//! Prints a description of the given time interval, written as JSON

use timeinterval::{parse::English, TimeInterval};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args
        .get(1)
        .map(|s| serde_json::from_str::<TimeInterval>(s))
        .transpose()
    {
        Ok(Some(interval)) => println!("{}", interval.describe(English::default())),
        Ok(None) => println!(
            "Usage: cargo run --example describe -- '{{\"weekdays\": [\"monday:friday\"]}}'"
        ),
        Err(err) => println!("{}", err),
    }
}
