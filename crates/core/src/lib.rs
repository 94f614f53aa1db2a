use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Fractional rates are integer basis points: 10_000 bps == 100%.
pub const BPS_SCALE: i64 = 10_000;

/// Flat guest discount applied to every resolved nightly rate.
pub const GUEST_DISCOUNT_BPS: i64 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub weekday_rate_minor: i64,
    pub weekend_rate_minor: i64,
    pub cleaning_fee_minor: i64,
    pub service_fee_bps: i64,
    pub calendar_feed_url: Option<String>,
    pub feed_listing_id: Option<String>,
    pub tax_rules: Vec<TaxRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub slug: String,
    pub name: String,
    pub weekday_rate_minor: i64,
    pub weekend_rate_minor: i64,
    pub cleaning_fee_minor: i64,
    pub service_fee_bps: i64,
    pub calendar_feed_url: Option<String>,
    pub feed_listing_id: Option<String>,
}

/// Which monetary bases a tax rule is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBases {
    pub nightly: bool,
    pub cleaning: bool,
    pub service: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRule {
    pub id: Option<i64>,
    pub label: String,
    pub rate_bps: i64,
    pub applies_to: TaxBases,
}

/// Manual per-date override set by an administrator. Wins over every other
/// pricing source; `price_minor` is meaningless when `is_blocked` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRate {
    pub property_id: i64,
    pub date: NaiveDate,
    pub price_minor: i64,
    pub is_blocked: bool,
    pub note: Option<String>,
}

/// Per-date record pushed by the dynamic-pricing provider. Last write wins
/// per (property, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOverride {
    pub property_id: i64,
    pub date: NaiveDate,
    pub price_minor: i64,
    pub min_nights: Option<u32>,
    pub is_blocked: bool,
    pub source: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockSource {
    ExternalCalendar,
    Direct,
    Manual,
}

impl BlockSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExternalCalendar => "EXTERNAL_CALENDAR",
            Self::Direct => "DIRECT",
            Self::Manual => "MANUAL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EXTERNAL_CALENDAR" => Some(Self::ExternalCalendar),
            "DIRECT" => Some(Self::Direct),
            "MANUAL" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Calendar unavailability independent of pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDateEntry {
    pub property_id: i64,
    pub date: NaiveDate,
    pub source: BlockSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Paid,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "PAID" => Some(Self::Paid),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A stay over the half-open interval `[check_in, check_out)`. Only `Paid`
/// bookings count as occupancy conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub property_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub guests: u32,
    pub total_price_minor: i64,
    pub created_at: String,
}

/// Where a night's price came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Special,
    Dynamic,
    Weekend,
    Weekday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailableReason {
    DatesBlocked,
    ExistingBooking,
}

/// One billed night. `amount_minor` is post-discount; `rack_amount_minor`
/// keeps the pre-discount price for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyLineItem {
    pub date: NaiveDate,
    pub amount_minor: i64,
    pub rack_amount_minor: i64,
    pub source: RateSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub nights: u32,
    pub nightly_subtotal_minor: i64,
    pub cleaning_fee_minor: i64,
    pub service_fee_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub average_nightly_rate_minor: i64,
    pub nightly_line_items: Vec<NightlyLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxBaseAmounts {
    pub nightly_minor: i64,
    pub cleaning_minor: i64,
    pub service_minor: i64,
}

/// Scale a non-negative minor-unit amount by a basis-point rate, rounding
/// half-up to the nearest minor unit. Widened to i128 so the quote path never
/// touches floating point.
pub fn apply_bps(amount_minor: i64, bps: i64) -> i64 {
    let product = amount_minor as i128 * bps as i128;
    ((product + BPS_SCALE as i128 / 2) / BPS_SCALE as i128) as i64
}

/// Apply the flat guest discount to a resolved rack rate.
pub fn discounted_rate(rack_minor: i64) -> i64 {
    apply_bps(rack_minor, BPS_SCALE - GUEST_DISCOUNT_BPS)
}

/// Friday and Saturday nights bill at the weekend rate.
pub fn is_weekend_night(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Every night of the half-open stay `[check_in, check_out)`.
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    check_in
        .iter_days()
        .take_while(|date| *date < check_out)
        .collect()
}

fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}

/// Sum each rule's selected bases, scale by the rule's rate, round per rule,
/// then total. Rules are independent; rounding per rule keeps each tax line
/// auditable. No rules means no tax.
pub fn compute_tax(rules: &[TaxRule], bases: &TaxBaseAmounts) -> i64 {
    rules
        .iter()
        .map(|rule| {
            let mut base = 0i64;
            if rule.applies_to.nightly {
                base += bases.nightly_minor;
            }
            if rule.applies_to.cleaning {
                base += bases.cleaning_minor;
            }
            if rule.applies_to.service {
                base += bases.service_minor;
            }
            apply_bps(base, rule.rate_bps)
        })
        .sum()
}

/// Roll resolved line items up into a full price breakdown.
pub fn assemble_quote(property: &Property, nightly_line_items: Vec<NightlyLineItem>) -> Quote {
    let nights = nightly_line_items.len() as u32;
    let nightly_subtotal_minor: i64 = nightly_line_items
        .iter()
        .map(|item| item.amount_minor)
        .sum();
    let cleaning_fee_minor = property.cleaning_fee_minor;
    let service_fee_minor = apply_bps(nightly_subtotal_minor, property.service_fee_bps);
    let tax_minor = compute_tax(
        &property.tax_rules,
        &TaxBaseAmounts {
            nightly_minor: nightly_subtotal_minor,
            cleaning_minor: cleaning_fee_minor,
            service_minor: service_fee_minor,
        },
    );
    let total_minor = nightly_subtotal_minor + cleaning_fee_minor + service_fee_minor + tax_minor;
    let average_nightly_rate_minor = if nights == 0 {
        0
    } else {
        div_round_half_up(nightly_subtotal_minor, nights as i64)
    };
    Quote {
        nights,
        nightly_subtotal_minor,
        cleaning_fee_minor,
        service_fee_minor,
        tax_minor,
        total_minor,
        average_nightly_rate_minor,
        nightly_line_items,
    }
}
