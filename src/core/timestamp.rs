use chrono::NaiveDateTime;

/// Layout understood by `SetFile -m`.
const SET_FILE_LAYOUT: &str = "%m/%d/%Y %H:%M:%S";

/// Formats a wall-clock date-time as `MM/DD/YYYY HH:MM:SS`.
///
/// The fields are taken as they are; no timezone is applied or printed.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use mtime2created::core::timestamp::format_timestamp;
///
/// let birth = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(5, 6, 7).unwrap();
/// assert_eq!(format_timestamp(&birth), "03/04/2024 05:06:07");
/// ```
pub fn format_timestamp(date_time: &NaiveDateTime) -> String {
    date_time.format(SET_FILE_LAYOUT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn single_digit_fields_are_zero_padded() {
        assert_eq!(format_timestamp(&at(2024, 3, 4, 5, 6, 7)), "03/04/2024 05:06:07");
        assert_eq!(format_timestamp(&at(2001, 1, 1, 0, 0, 0)), "01/01/2001 00:00:00");
    }

    #[test]
    fn two_digit_fields_are_not_truncated() {
        assert_eq!(format_timestamp(&at(1999, 12, 31, 23, 59, 59)), "12/31/1999 23:59:59");
        assert_eq!(format_timestamp(&at(2038, 12, 31, 23, 59, 59)), "12/31/2038 23:59:59");
    }

    #[test]
    fn year_is_four_digits() {
        assert_eq!(format_timestamp(&at(987, 6, 5, 4, 3, 2)), "06/05/0987 04:03:02");
    }
}
