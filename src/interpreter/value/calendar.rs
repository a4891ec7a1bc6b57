use std::fmt;

use crate::interpreter::value::timedelta::{SECONDS_PER_DAY, Timedelta};

/// Smallest year a date may carry.
pub const MIN_YEAR: i64 = 1;
/// Largest year a date may carry.
pub const MAX_YEAR: i64 = 9999;

/// Errors raised when constructing or shifting calendar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The day does not exist in the given month.
    DayOutOfRange {
        /// The offending day.
        day:   i64,
        /// Month the day was checked against.
        month: i64,
        /// Year the month belongs to.
        year:  i64,
    },
    /// The month is not in `1..=12`.
    MonthOutOfRange {
        /// The offending month.
        month: i64,
    },
    /// The year left the supported range.
    YearOutOfRange {
        /// The offending year.
        year: i64,
    },
    /// The hour is not in `0..=23`.
    HourOutOfRange {
        /// The offending hour.
        hour: i64,
    },
    /// The minute is not in `0..=59`.
    MinuteOutOfRange {
        /// The offending minute.
        minute: i64,
    },
    /// The second is not in `0..=59`.
    SecondOutOfRange {
        /// The offending second.
        second: i64,
    },
    /// Intermediate arithmetic exceeded `i64`.
    Overflow,
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayOutOfRange { day, month, year } => {
                write!(f, "day {day} does not exist in month {month} of year {year}")
            },
            Self::MonthOutOfRange { month } => write!(f, "month {month} is out of range"),
            Self::YearOutOfRange { year } => {
                write!(f, "year {year} is outside the supported range {MIN_YEAR}-{MAX_YEAR}")
            },
            Self::HourOutOfRange { hour } => write!(f, "hour {hour} is out of range"),
            Self::MinuteOutOfRange { minute } => write!(f, "minute {minute} is out of range"),
            Self::SecondOutOfRange { second } => write!(f, "second {second} is out of range"),
            Self::Overflow => write!(f, "temporal arithmetic overflowed"),
        }
    }
}

impl std::error::Error for CalendarError {}

/// Whether `year` is a Gregorian leap year.
#[must_use]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`. `month` must be in `1..=12`.
#[must_use]
pub const fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        },
    }
}

/// A validated Gregorian calendar date.
///
/// Every constructed `Date` is a real date: the month is in range, the day
/// exists in that month, and the year is within `1..=9999`. The derived
/// ordering is chronological because the fields are declared most
/// significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    year:  i64,
    month: i64,
    day:   i64,
}

impl Date {
    /// Validates and builds a date. The argument order matches the literal
    /// form `DD.MM.YYYY`.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] when any component is out of range.
    ///
    /// # Examples
    /// ```
    /// use timon::interpreter::value::calendar::Date;
    ///
    /// assert!(Date::new(29, 2, 2020).is_ok());
    /// assert!(Date::new(29, 2, 2019).is_err());
    /// ```
    pub const fn new(day: i64, month: i64, year: i64) -> Result<Self, CalendarError> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(CalendarError::YearOutOfRange { year });
        }
        if month < 1 || month > 12 {
            return Err(CalendarError::MonthOutOfRange { month });
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(CalendarError::DayOutOfRange { day, month, year });
        }
        Ok(Self { year, month, day })
    }

    /// The day of month, `1..=31`.
    #[must_use]
    pub const fn day(self) -> i64 {
        self.day
    }

    /// The month, `1..=12`.
    #[must_use]
    pub const fn month(self) -> i64 {
        self.month
    }

    /// The year, `1..=9999`.
    #[must_use]
    pub const fn year(self) -> i64 {
        self.year
    }

    /// Days since 1970-01-01, using era-based civil-calendar arithmetic.
    #[must_use]
    pub const fn to_days(self) -> i64 {
        let year = if self.month <= 2 { self.year - 1 } else { self.year };
        let era = (if year >= 0 { year } else { year - 399 }) / 400;
        let year_of_era = year - era * 400;
        let shifted_month = (self.month + 9) % 12;
        let day_of_year = (153 * shifted_month + 2) / 5 + self.day - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era - 719_468
    }

    /// Inverse of [`Date::to_days`].
    ///
    /// # Errors
    /// Returns [`CalendarError::YearOutOfRange`] when the day number falls
    /// outside the representable years.
    pub const fn from_days(days: i64) -> Result<Self, CalendarError> {
        let shifted = days + 719_468;
        let era = (if shifted >= 0 { shifted } else { shifted - 146_096 }) / 146_097;
        let day_of_era = shifted - era * 146_097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let year = year_of_era + era * 400;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
        let year = if month <= 2 { year + 1 } else { year };
        Self::new(day, month, year)
    }

    /// Shifts the date by a number of months, clamping the day-of-month to
    /// the target month once at the end. Jumping from 29.02.2020 by 13
    /// months therefore lands on 29.03.2021, not 28.03.2021.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] when the target year is unrepresentable
    /// or the month count overflows.
    pub fn add_months(self, months: i64) -> Result<Self, CalendarError> {
        let index = self.year
                        .checked_mul(12)
                        .and_then(|base| base.checked_add(self.month - 1))
                        .and_then(|base| base.checked_add(months))
                        .ok_or(CalendarError::Overflow)?;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        let day = self.day.min(days_in_month(year, month));
        Self::new(day, month, year)
    }

    /// Applies a timedelta: years and months first (with day clamping), then
    /// weeks and days. Hour, minute and second components shift an anchored
    /// value by less than a day and leave a plain date untouched.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] when the result leaves the representable
    /// range or intermediate arithmetic overflows.
    pub fn checked_add(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        let months = delta.years
                          .checked_mul(12)
                          .and_then(|months| months.checked_add(delta.months))
                          .ok_or(CalendarError::Overflow)?;
        let date = self.add_months(months)?;
        let shift = delta.day_shift().ok_or(CalendarError::Overflow)?;
        let days = date.to_days().checked_add(shift).ok_or(CalendarError::Overflow)?;
        Self::from_days(days)
    }

    /// Applies a negated timedelta; see [`Date::checked_add`].
    ///
    /// # Errors
    /// Returns a [`CalendarError`] under the same conditions as addition.
    pub fn checked_sub(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        self.checked_add(&delta.checked_neg().ok_or(CalendarError::Overflow)?)
    }

    /// Signed number of days from `other` to `self`.
    #[must_use]
    pub const fn days_since(self, other: Self) -> i64 {
        self.to_days() - other.to_days()
    }
}

impl fmt::Display for Date {
    /// Canonical literal form `DD.MM.YYYY`, zero padded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

/// A validated wall-clock time with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    hour:   i64,
    minute: i64,
    second: i64,
}

impl Time {
    /// `00:00:00`.
    pub const MIDNIGHT: Self = Self { hour:   0,
                                      minute: 0,
                                      second: 0, };

    /// Validates and builds a time of day.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] when any component is out of range.
    pub const fn new(hour: i64, minute: i64, second: i64) -> Result<Self, CalendarError> {
        if hour < 0 || hour > 23 {
            return Err(CalendarError::HourOutOfRange { hour });
        }
        if minute < 0 || minute > 59 {
            return Err(CalendarError::MinuteOutOfRange { minute });
        }
        if second < 0 || second > 59 {
            return Err(CalendarError::SecondOutOfRange { second });
        }
        Ok(Self { hour, minute, second })
    }

    /// The hour, `0..=23`.
    #[must_use]
    pub const fn hour(self) -> i64 {
        self.hour
    }

    /// The minute, `0..=59`.
    #[must_use]
    pub const fn minute(self) -> i64 {
        self.minute
    }

    /// The second, `0..=59`.
    #[must_use]
    pub const fn second(self) -> i64 {
        self.second
    }

    /// Seconds since midnight, `0..86400`.
    #[must_use]
    pub const fn seconds_of_day(self) -> i64 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Builds a time from a second-of-day value already in `0..86400`.
    pub(crate) const fn from_seconds_of_day(seconds: i64) -> Self {
        Self { hour:   seconds / 3600,
               minute: seconds % 3600 / 60,
               second: seconds % 60, }
    }

    /// Applies a timedelta, wrapping modulo 24 hours.
    ///
    /// Year through day components shift an anchored value by whole days
    /// and can never change the time of day, so only the clock components
    /// take part.
    ///
    /// # Errors
    /// Returns [`CalendarError::Overflow`] when folding the clock components
    /// into seconds overflows.
    pub fn checked_add(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        let shift = delta.clock_seconds().ok_or(CalendarError::Overflow)?;
        let seconds = self.seconds_of_day()
                          .checked_add(shift)
                          .ok_or(CalendarError::Overflow)?
                          .rem_euclid(SECONDS_PER_DAY);
        Ok(Self::from_seconds_of_day(seconds))
    }

    /// Applies a negated timedelta; see [`Time::checked_add`].
    ///
    /// # Errors
    /// Returns [`CalendarError::Overflow`] under the same conditions as
    /// addition.
    pub fn checked_sub(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        self.checked_add(&delta.checked_neg().ok_or(CalendarError::Overflow)?)
    }

    /// Signed number of seconds from `other` to `self`.
    #[must_use]
    pub const fn seconds_since(self, other: Self) -> i64 {
        self.seconds_of_day() - other.seconds_of_day()
    }
}

impl fmt::Display for Time {
    /// Canonical literal form `HH:MM:SS`, zero padded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A date paired with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// Pairs an already validated date and time.
    #[must_use]
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// The date half.
    #[must_use]
    pub const fn date(self) -> Date {
        self.date
    }

    /// The time half.
    #[must_use]
    pub const fn time(self) -> Time {
        self.time
    }

    /// Applies a timedelta with full carry between the date and the clock.
    ///
    /// Years and months are applied first with day clamping, then the
    /// remaining components are folded into seconds and carried through
    /// midnight in both directions.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] when the result leaves the representable
    /// range or intermediate arithmetic overflows.
    ///
    /// # Examples
    /// ```
    /// use timon::interpreter::value::{calendar::{Date, DateTime, Time},
    ///                                 timedelta::Timedelta};
    ///
    /// let anchor = DateTime::new(Date::new(1, 1, 2020).unwrap(),
    ///                            Time::new(23, 59, 59).unwrap());
    /// let second = Timedelta { seconds: 1, ..Timedelta::ZERO };
    ///
    /// let shifted = anchor.checked_add(&second).unwrap();
    /// assert_eq!(shifted.to_string(), "02.01.2020~00:00:00");
    /// ```
    pub fn checked_add(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        let months = delta.years
                          .checked_mul(12)
                          .and_then(|months| months.checked_add(delta.months))
                          .ok_or(CalendarError::Overflow)?;
        let date = self.date.add_months(months)?;
        let days = date.to_days()
                       .checked_add(delta.day_shift().ok_or(CalendarError::Overflow)?)
                       .ok_or(CalendarError::Overflow)?;
        let seconds = self.time
                          .seconds_of_day()
                          .checked_add(delta.clock_seconds().ok_or(CalendarError::Overflow)?)
                          .ok_or(CalendarError::Overflow)?;
        let total = days.checked_mul(SECONDS_PER_DAY)
                        .and_then(|base| base.checked_add(seconds))
                        .ok_or(CalendarError::Overflow)?;
        Ok(Self { date: Date::from_days(total.div_euclid(SECONDS_PER_DAY))?,
                  time: Time::from_seconds_of_day(total.rem_euclid(SECONDS_PER_DAY)), })
    }

    /// Applies a negated timedelta; see [`DateTime::checked_add`].
    ///
    /// # Errors
    /// Returns a [`CalendarError`] under the same conditions as addition.
    pub fn checked_sub(self, delta: &Timedelta) -> Result<Self, CalendarError> {
        self.checked_add(&delta.checked_neg().ok_or(CalendarError::Overflow)?)
    }

    /// Signed number of seconds from `other` to `self`. Cannot overflow:
    /// the representable range spans fewer than 2^39 seconds.
    #[must_use]
    pub const fn seconds_since(self, other: Self) -> i64 {
        self.date.days_since(other.date) * SECONDS_PER_DAY + self.time.seconds_since(other.time)
    }
}

impl fmt::Display for DateTime {
    /// Canonical literal form `DD.MM.YYYY~HH:MM:SS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.date, self.time)
    }
}
