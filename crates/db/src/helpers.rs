use booking_core::{
    Booking, BookingStatus, DateOverride, Property, SpecialRate, TaxBases, TaxRule,
};
use chrono::NaiveDate;
use rusqlite::Row;
use rusqlite::types::Type;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn date_to_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_from_column(
    idx: usize,
    value: String,
) -> std::result::Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn enum_from_column<T>(
    idx: usize,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> std::result::Result<T, rusqlite::Error> {
    parse(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unrecognized value: {}", value).into(),
        )
    })
}

pub(crate) fn row_to_property(row: &Row<'_>) -> std::result::Result<Property, rusqlite::Error> {
    Ok(Property {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        weekday_rate_minor: row.get(3)?,
        weekend_rate_minor: row.get(4)?,
        cleaning_fee_minor: row.get(5)?,
        service_fee_bps: row.get(6)?,
        calendar_feed_url: row.get(7)?,
        feed_listing_id: row.get(8)?,
        tax_rules: Vec::new(),
    })
}

pub(crate) fn row_to_tax_rule(row: &Row<'_>) -> std::result::Result<TaxRule, rusqlite::Error> {
    Ok(TaxRule {
        id: row.get(0)?,
        label: row.get(1)?,
        rate_bps: row.get(2)?,
        applies_to: TaxBases {
            nightly: row.get(3)?,
            cleaning: row.get(4)?,
            service: row.get(5)?,
        },
    })
}

pub(crate) fn row_to_special_rate(
    row: &Row<'_>,
) -> std::result::Result<SpecialRate, rusqlite::Error> {
    Ok(SpecialRate {
        property_id: row.get(0)?,
        date: date_from_column(1, row.get(1)?)?,
        price_minor: row.get(2)?,
        is_blocked: row.get(3)?,
        note: row.get(4)?,
    })
}

pub(crate) fn row_to_date_override(
    row: &Row<'_>,
) -> std::result::Result<DateOverride, rusqlite::Error> {
    Ok(DateOverride {
        property_id: row.get(0)?,
        date: date_from_column(1, row.get(1)?)?,
        price_minor: row.get(2)?,
        min_nights: row.get(3)?,
        is_blocked: row.get(4)?,
        source: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub(crate) fn row_to_booking(row: &Row<'_>) -> std::result::Result<Booking, rusqlite::Error> {
    let status: String = row.get(4)?;
    Ok(Booking {
        id: row.get(0)?,
        property_id: row.get(1)?,
        check_in: date_from_column(2, row.get(2)?)?,
        check_out: date_from_column(3, row.get(3)?)?,
        status: enum_from_column(4, &status, BookingStatus::parse)?,
        guests: row.get(5)?,
        total_price_minor: row.get(6)?,
        created_at: row.get(7)?,
    })
}
