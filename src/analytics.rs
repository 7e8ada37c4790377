//! Pure, side-effect-free aggregates over an entry snapshot.
//!
//! Nothing here caches or increments: at personal-mood-log scale, a full
//! recompute per snapshot is cheaper than keeping derived state correct.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::entry::MoodEntry;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One mood's share of a windowed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSlice {
    pub mood: String,
    pub count: usize,
    /// count / total × 100, rounded to one decimal.
    pub percentage: f64,
}

/// Mean intensity over one calendar week, [start, end] inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// 0.0 when the week has no entries.
    pub avg_intensity: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAverage {
    pub weekday: Weekday,
    /// 0.0 when no entry falls on this weekday.
    pub avg_intensity: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// The comparison facts the insight copy is built from — which mood, which
/// direction, which weekday. Anything beyond these is presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodInsights {
    pub dominant: Option<MoodSlice>,
    pub trend: Option<TrendDirection>,
    pub best_weekday: Option<Weekday>,
}

/// Group a windowed snapshot by mood, preserving first-seen order so the
/// dominant-mood tie-break is stable with respect to grouping order.
pub fn mood_distribution(entries: &[MoodEntry]) -> Vec<MoodSlice> {
    let total = entries.len();
    if total == 0 {
        return Vec::new();
    }

    let mut slices: Vec<MoodSlice> = Vec::new();
    for entry in entries {
        match slices.iter_mut().find(|s| s.mood == entry.mood) {
            Some(slice) => slice.count += 1,
            None => slices.push(MoodSlice {
                mood: entry.mood.clone(),
                count: 1,
                percentage: 0.0,
            }),
        }
    }
    for slice in &mut slices {
        slice.percentage = round1(slice.count as f64 / total as f64 * 100.0);
    }
    slices
}

/// Highest count wins; on equal counts the first-seen mood wins.
pub fn dominant_mood(distribution: &[MoodSlice]) -> Option<&MoodSlice> {
    distribution.iter().fold(None, |best, slice| match best {
        Some(b) if slice.count <= b.count => best,
        _ => Some(slice),
    })
}

/// Mean intensity per calendar week for the last 7 weeks including the
/// current one, oldest first. Weeks are [start, end] inclusive, anchored on
/// the caller's week-start convention; empty weeks report 0.
pub fn weekly_trend(
    entries: &[MoodEntry],
    today: NaiveDate,
    week_starts_on: Weekday,
) -> Vec<WeekBucket> {
    (0..7)
        .rev()
        .map(|weeks_back| {
            let start = start_of_week(today - Duration::days(weeks_back * 7), week_starts_on);
            let end = start + Duration::days(6);
            let intensities: Vec<i32> = entries
                .iter()
                .filter(|e| e.date >= start && e.date <= end)
                .map(|e| e.intensity)
                .collect();
            WeekBucket {
                start,
                end,
                avg_intensity: round1(mean(&intensities)),
                entries: intensities.len(),
            }
        })
        .collect()
}

/// Mean intensity per weekday across all entries (not windowed), Monday
/// through Sunday. Empty weekdays report 0.
pub fn day_of_week_pattern(entries: &[MoodEntry]) -> Vec<DayAverage> {
    let mut totals = [(0i64, 0usize); 7];
    for entry in entries {
        let idx = entry.date.weekday().num_days_from_monday() as usize;
        totals[idx].0 += entry.intensity as i64;
        totals[idx].1 += 1;
    }

    WEEKDAYS
        .iter()
        .zip(totals)
        .map(|(&weekday, (sum, count))| DayAverage {
            weekday,
            avg_intensity: if count == 0 {
                0.0
            } else {
                round1(sum as f64 / count as f64)
            },
            entries: count,
        })
        .collect()
}

/// Mean intensity of the 7 most recent entries against the preceding 7, by
/// recency order — not calendar weeks. Needs at least one entry on each
/// side of the split.
pub fn intensity_trend(recent_first: &[MoodEntry]) -> Option<TrendDirection> {
    if recent_first.len() < 8 {
        return None;
    }
    let intensity = |e: &MoodEntry| e.intensity;
    let recent: Vec<i32> = recent_first.iter().take(7).map(intensity).collect();
    let previous: Vec<i32> = recent_first.iter().skip(7).take(7).map(intensity).collect();

    // Unrounded means, so a fraction of a point still counts as movement.
    let recent_avg = mean(&recent);
    let previous_avg = mean(&previous);
    Some(if recent_avg > previous_avg {
        TrendDirection::Improving
    } else if recent_avg < previous_avg {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    })
}

/// Weekday with the highest non-zero average intensity; first wins ties.
pub fn best_weekday(pattern: &[DayAverage]) -> Option<Weekday> {
    pattern
        .iter()
        .fold(None, |best: Option<&DayAverage>, day| match best {
            Some(b) if day.avg_intensity <= b.avg_intensity => best,
            _ => Some(day),
        })
        .filter(|d| d.avg_intensity > 0.0)
        .map(|d| d.weekday)
}

/// All insight facts in one pass. `window` is the recency-scoped snapshot
/// (most recent first, e.g. the last 30 days); `all_entries` feeds the
/// unwindowed day-of-week pattern.
pub fn insight_facts(window: &[MoodEntry], all_entries: &[MoodEntry]) -> MoodInsights {
    let distribution = mood_distribution(window);
    let pattern = day_of_week_pattern(all_entries);
    MoodInsights {
        dominant: dominant_mood(&distribution).cloned(),
        trend: intensity_trend(window),
        best_weekday: best_weekday(&pattern),
    }
}

/// Presentation strings rendered from the facts and nothing else.
pub fn narratives(insights: &MoodInsights) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(dominant) = &insights.dominant {
        lines.push(format!(
            "You've been feeling {} most often ({}% of the time)",
            dominant.mood, dominant.percentage
        ));
    }
    if let Some(trend) = insights.trend {
        let direction = match trend {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        };
        lines.push(format!(
            "Your mood intensity is {direction} compared to last week"
        ));
    }
    if let Some(weekday) = insights.best_weekday {
        lines.push(format!("You tend to feel best on {}s", weekday_name(weekday)));
    }
    lines
}

pub fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_starts_on.num_days_from_monday())
        % 7;
    date - Duration::days(offset as i64)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as i64).sum::<i64>() as f64 / values.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
