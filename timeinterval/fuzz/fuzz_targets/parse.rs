#![no_main]
use libfuzzer_sys::fuzz_target;
use timeinterval::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse::time_of_day(s);
        let _ = parse::weekday_range(s);
        let _ = parse::month_range(s);
        let _ = parse::year_range(s);

        if let Ok(range) = parse::day_of_month_range(s) {
            // every accepted range has to survive being written back out
            assert_eq!(parse::day_of_month_range(&range.to_string()), Ok(range));
        }

        let mut halves = s.splitn(2, '-');
        if let Ok(range) = parse::time_range(halves.next(), halves.next()) {
            assert!(range.start() < range.end());
            assert!(range.end() <= parse::MINUTES_PER_DAY);
        }
    }
});
