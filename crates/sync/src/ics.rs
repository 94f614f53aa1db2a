use chrono::NaiveDate;

use crate::types::SyncIssue;

/// One VEVENT reduced to its occupied date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcsEvent {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parse an ICS document into occupied date ranges. Events that cannot be
/// read (missing or malformed DTSTART, end before start) become issues and
/// are skipped; the rest of the document still parses.
pub fn parse_ics(text: &str) -> (Vec<IcsEvent>, Vec<SyncIssue>) {
    let mut events = Vec::new();
    let mut issues = Vec::new();
    let mut current: Option<(Option<String>, Option<String>)> = None;

    for line in unfold_lines(text) {
        let upper = line.to_ascii_uppercase();
        if upper == "BEGIN:VEVENT" {
            current = Some((None, None));
            continue;
        }
        if upper == "END:VEVENT" {
            if let Some((start, end)) = current.take() {
                match event_from_fields(start.as_deref(), end.as_deref()) {
                    Ok(event) => events.push(event),
                    Err(message) => issues.push(SyncIssue {
                        context: "vevent".to_string(),
                        message,
                    }),
                }
            }
            continue;
        }
        let Some((start, end)) = current.as_mut() else {
            continue;
        };
        if let Some(value) = property_value(&line, "DTSTART") {
            *start = Some(value.to_string());
        } else if let Some(value) = property_value(&line, "DTEND") {
            *end = Some(value.to_string());
        }
    }

    (events, issues)
}

/// Expand events day-by-day over `[start, end)` into a sorted, deduplicated
/// list of occupied dates.
pub fn expand_events(events: &[IcsEvent]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = events
        .iter()
        .flat_map(|event| {
            event
                .start
                .iter_days()
                .take_while(move |date| *date < event.end)
        })
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

fn event_from_fields(
    start: Option<&str>,
    end: Option<&str>,
) -> std::result::Result<IcsEvent, String> {
    let start_raw = start.ok_or_else(|| "event has no DTSTART".to_string())?;
    let start = parse_ics_date(start_raw)
        .ok_or_else(|| format!("unparseable DTSTART: {}", start_raw))?;
    let end = match end {
        Some(raw) => parse_ics_date(raw).ok_or_else(|| format!("unparseable DTEND: {}", raw))?,
        // A VEVENT without DTEND occupies its start date only.
        None => start.succ_opt().ok_or_else(|| "date overflow".to_string())?,
    };
    if end <= start {
        return Err(format!("event ends on or before it starts: {} .. {}", start, end));
    }
    Ok(IcsEvent { start, end })
}

/// RFC 5545 folds long lines by continuing them with leading whitespace.
fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix(' ').or_else(|| line.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(line.to_string());
    }
    lines
}

/// Match a content line like `DTSTART;VALUE=DATE:20260301` and return the
/// value after the colon, ignoring any parameters.
fn property_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (head, value) = line.split_once(':')?;
    let prop = head.split(';').next().unwrap_or(head);
    if prop.eq_ignore_ascii_case(name) {
        Some(value.trim())
    } else {
        None
    }
}

/// Both date (20260301) and date-time (20260301T140000Z) forms collapse to
/// day granularity.
fn parse_ics_date(value: &str) -> Option<NaiveDate> {
    let digits = value.split('T').next().unwrap_or(value);
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
