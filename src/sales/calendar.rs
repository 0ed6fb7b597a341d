/// Quarter (1-4) of the given month. Anything outside 1-12 maps to 0.
pub fn quarter_of(month: u32) -> u32 {
    match month {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        10..=12 => 4,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month. Months outside 1-12 aren't rejected and fall into the 31 day case.
pub fn max_day_of(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn quarter_is_month_divided_by_three_rounded_up(
        #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)] month: u32,
    ) {
        assert_eq!((month + 2) / 3, quarter_of(month));
    }

    #[test]
    fn quarter_out_of_range() {
        assert_eq!(0, quarter_of(0));
        assert_eq!(0, quarter_of(13));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2000, 2, 29)]
    #[case(2100, 2, 28)]
    #[case(2024, 4, 30)]
    #[case(2024, 6, 30)]
    #[case(2024, 9, 30)]
    #[case(2024, 11, 30)]
    #[case(2024, 1, 31)]
    #[case(2024, 12, 31)]
    #[case(2024, 13, 31)]
    fn max_day(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(expected, max_day_of(year, month));
    }
}
