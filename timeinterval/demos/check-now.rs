//! Checks whether the current local time falls within any of the given time intervals,
//! written as a JSON list

use chrono::Local;
use timeinterval::{contains_any, parse::English, TimeInterval};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args
        .get(1)
        .map(|s| serde_json::from_str::<Vec<TimeInterval>>(s))
        .transpose()
    {
        Ok(Some(intervals)) => {
            let now = Local::now();
            for interval in &intervals {
                let matched = if interval.contains(now) { "x" } else { " " };
                println!("[{}] {}", matched, interval.describe(English::default()));
            }
            if contains_any(&intervals, now) {
                println!("{} is within the intervals", now.format("%F %R"));
            } else {
                println!("{} is outside of the intervals", now.format("%F %R"));
            }
        }
        Ok(None) => println!(
            "Usage: cargo run --example check-now -- '[{{\"times\": [{{\"start_time\": \"09:00\", \"end_time\": \"17:00\"}}]}}]'"
        ),
        Err(err) => println!("{}", err),
    }
}
