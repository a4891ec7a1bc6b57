use std::fmt;

/// One of the seven calendar/clock granularities of the language.
///
/// Time units appear in three syntactic positions: as the step of a `from`
/// loop (`by days`), as the field name of a component access (`d.days`), and
/// as the single-letter suffixes inside timedelta literals (`'3D'`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// `years` / `Y`
    Years,
    /// `months` / `M`
    Months,
    /// `weeks` / `W`
    Weeks,
    /// `days` / `D`
    Days,
    /// `hours` / `h`
    Hours,
    /// `minutes` / `m`
    Minutes,
    /// `seconds` / `s`
    Seconds,
}

impl TimeUnit {
    /// All units, largest to smallest. This is also the only order in which
    /// timedelta literal components may appear.
    pub const ALL: [Self; 7] = [Self::Years,
                                Self::Months,
                                Self::Weeks,
                                Self::Days,
                                Self::Hours,
                                Self::Minutes,
                                Self::Seconds];

    /// The keyword form used in source code (`years`, `months`, ...).
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    /// The single-character suffix used in timedelta literals.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Years => 'Y',
            Self::Months => 'M',
            Self::Weeks => 'W',
            Self::Days => 'D',
            Self::Hours => 'h',
            Self::Minutes => 'm',
            Self::Seconds => 's',
        }
    }

    /// Looks a unit up by its literal suffix.
    #[must_use]
    pub fn from_suffix(suffix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.suffix() == suffix)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A signed duration with seven independent components.
///
/// Components are *not* normalized against each other when a timedelta is
/// built; `'90m'` keeps 90 minutes rather than becoming an hour and a half.
/// Normalization only happens when the delta is applied to a date, time or
/// datetime anchor, because the length of a month or year depends on the
/// anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timedelta {
    pub years:   i64,
    pub months:  i64,
    pub weeks:   i64,
    pub days:    i64,
    pub hours:   i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Month length used by the relational ordering of timedeltas. A month is
/// counted as its longest possible span so that `'1M' < '32D'` holds while
/// `'1M' < '31D'` does not.
const ORDERING_DAYS_PER_MONTH: i128 = 31;

impl Timedelta {
    /// The all-zero timedelta, printed as `'0s'`.
    pub const ZERO: Self = Self { years:   0,
                                  months:  0,
                                  weeks:   0,
                                  days:    0,
                                  hours:   0,
                                  minutes: 0,
                                  seconds: 0, };

    /// Builds a timedelta with `amount` in the given unit and zero elsewhere.
    #[must_use]
    pub const fn from_unit(unit: TimeUnit, amount: i64) -> Self {
        let mut delta = Self::ZERO;
        match unit {
            TimeUnit::Years => delta.years = amount,
            TimeUnit::Months => delta.months = amount,
            TimeUnit::Weeks => delta.weeks = amount,
            TimeUnit::Days => delta.days = amount,
            TimeUnit::Hours => delta.hours = amount,
            TimeUnit::Minutes => delta.minutes = amount,
            TimeUnit::Seconds => delta.seconds = amount,
        }
        delta
    }

    /// Builds a timedelta holding only a day count.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self { days, ..Self::ZERO }
    }

    /// Decomposes a signed second count into hours, minutes and seconds.
    ///
    /// The decomposition truncates toward zero, so a negative input yields
    /// non-positive components throughout.
    #[must_use]
    pub const fn from_clock_seconds(total: i64) -> Self {
        let remainder = total % 3600;
        Self { hours: total / 3600,
               minutes: remainder / 60,
               seconds: remainder % 60,
               ..Self::ZERO }
    }

    /// Decomposes a signed second count into days, hours, minutes and
    /// seconds, truncating toward zero.
    #[must_use]
    pub const fn from_day_seconds(total: i64) -> Self {
        let clock = Self::from_clock_seconds(total % SECONDS_PER_DAY);
        Self { days: total / SECONDS_PER_DAY,
               ..clock }
    }

    /// Returns the stored component for `unit`, without any normalization.
    #[must_use]
    pub const fn component(self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Years => self.years,
            TimeUnit::Months => self.months,
            TimeUnit::Weeks => self.weeks,
            TimeUnit::Days => self.days,
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    /// Component-wise addition. `None` on overflow of any component.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self { years:   self.years.checked_add(other.years)?,
                    months:  self.months.checked_add(other.months)?,
                    weeks:   self.weeks.checked_add(other.weeks)?,
                    days:    self.days.checked_add(other.days)?,
                    hours:   self.hours.checked_add(other.hours)?,
                    minutes: self.minutes.checked_add(other.minutes)?,
                    seconds: self.seconds.checked_add(other.seconds)?, })
    }

    /// Component-wise subtraction. `None` on overflow of any component.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.checked_add(other.checked_neg()?)
    }

    /// Component-wise scaling. `None` on overflow of any component.
    #[must_use]
    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        Some(Self { years:   self.years.checked_mul(factor)?,
                    months:  self.months.checked_mul(factor)?,
                    weeks:   self.weeks.checked_mul(factor)?,
                    days:    self.days.checked_mul(factor)?,
                    hours:   self.hours.checked_mul(factor)?,
                    minutes: self.minutes.checked_mul(factor)?,
                    seconds: self.seconds.checked_mul(factor)?, })
    }

    /// Component-wise integer division, truncating toward zero.
    ///
    /// `None` when `divisor` is zero or a component overflows.
    #[must_use]
    pub fn checked_div(self, divisor: i64) -> Option<Self> {
        Some(Self { years:   self.years.checked_div(divisor)?,
                    months:  self.months.checked_div(divisor)?,
                    weeks:   self.weeks.checked_div(divisor)?,
                    days:    self.days.checked_div(divisor)?,
                    hours:   self.hours.checked_div(divisor)?,
                    minutes: self.minutes.checked_div(divisor)?,
                    seconds: self.seconds.checked_div(divisor)?, })
    }

    /// Component-wise negation. `None` when a component is `i64::MIN`.
    #[must_use]
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self { years:   self.years.checked_neg()?,
                    months:  self.months.checked_neg()?,
                    weeks:   self.weeks.checked_neg()?,
                    days:    self.days.checked_neg()?,
                    hours:   self.hours.checked_neg()?,
                    minutes: self.minutes.checked_neg()?,
                    seconds: self.seconds.checked_neg()?, })
    }

    /// Years and months folded into a single month count.
    pub(crate) fn month_count(self) -> i128 {
        i128::from(self.years) * 12 + i128::from(self.months)
    }

    /// Weeks through seconds folded into a single second count. Exact:
    /// weeks, days, hours and minutes all have fixed lengths in seconds.
    pub(crate) fn second_count(self) -> i128 {
        (i128::from(self.weeks) * 7 + i128::from(self.days)) * i128::from(SECONDS_PER_DAY)
        + i128::from(self.hours) * 3600
        + i128::from(self.minutes) * 60
        + i128::from(self.seconds)
    }

    /// Equality as the language's `==` sees it.
    ///
    /// Units that convert exactly are folded together, so `'1W'` equals
    /// `'7D'` and `'1h'` equals `'60m'`, but a month never equals any fixed
    /// number of days.
    ///
    /// # Examples
    /// ```
    /// use timon::interpreter::value::timedelta::Timedelta;
    ///
    /// let week = Timedelta { weeks: 1, ..Timedelta::ZERO };
    /// let seven_days = Timedelta { days: 7, ..Timedelta::ZERO };
    /// let month = Timedelta { months: 1, ..Timedelta::ZERO };
    /// let thirty_days = Timedelta { days: 30, ..Timedelta::ZERO };
    ///
    /// assert!(week.normalized_eq(seven_days));
    /// assert!(!month.normalized_eq(thirty_days));
    /// ```
    #[must_use]
    pub fn normalized_eq(self, other: Self) -> bool {
        self.month_count() == other.month_count() && self.second_count() == other.second_count()
    }

    /// Ordering key for the relational operators.
    ///
    /// Months are approximated by their longest span (31 days, and a year by
    /// twelve such months), which gives relational operators a total order
    /// even though month-based and day-based deltas are never `==`-equal.
    #[must_use]
    pub fn duration_key(self) -> i128 {
        self.month_count() * ORDERING_DAYS_PER_MONTH * i128::from(SECONDS_PER_DAY)
        + self.second_count()
    }

    /// Hours, minutes and seconds folded into seconds. `None` on overflow.
    pub(crate) fn clock_seconds(self) -> Option<i64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Weeks and days folded into days. `None` on overflow.
    pub(crate) fn day_shift(self) -> Option<i64> {
        self.weeks.checked_mul(7)?.checked_add(self.days)
    }
}

impl fmt::Display for Timedelta {
    /// Canonical literal form: every non-zero component in `Y M W D h m s`
    /// order, space separated, inside `'` bounds; `'0s'` when all components
    /// are zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        let mut first = true;
        for unit in TimeUnit::ALL {
            let amount = self.component(unit);
            if amount != 0 {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{amount}{}", unit.suffix())?;
                first = false;
            }
        }
        if first {
            write!(f, "0s")?;
        }
        write!(f, "'")
    }
}
