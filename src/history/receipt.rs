// CSV rendering of claim records for receipt downloads

use crate::models::claim::ClaimRecord;

const HEADER: &str = "Date,Vehicle,Amount";

/// Render records as CSV with a `Date,Vehicle,Amount` header
pub fn to_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ClaimRecord>,
{
    let mut out = String::with_capacity(128);
    out.push_str(HEADER);
    out.push('\n');

    for record in records {
        push_field(&mut out, &record.timestamp);
        out.push(',');
        push_field(&mut out, record.vehicle_category.as_str());
        out.push(',');
        push_field(&mut out, &record.display_amount);
        out.push('\n');
    }

    out
}

/// File name offered for a single-record receipt
pub fn receipt_file_name(record: &ClaimRecord) -> String {
    format!("Receipt_{}.csv", record.vehicle_category.as_str().replace(' ', "_"))
}

// Quote fields containing separators, quotes or line breaks
fn push_field(out: &mut String, value: &str) {
    if value.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(value);
    }
}
