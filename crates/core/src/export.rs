//! CSV template offered to admins for bulk herb data entry.

use crate::constants::CSV_TEMPLATE_HEADER;

/// Content type served with the template.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const SAMPLE_ROWS: [[&str; 8]; 3] = [
    [
        "Jahe",
        "Zingiber officinale",
        "Rimpang",
        "Hangat",
        "Meredakan mual dan batuk",
        "Gingerol dan shogaol",
        "Jawa Timur",
        "Diseduh atau digunakan dalam masakan",
    ],
    [
        "Temulawak",
        "Curcuma zanthorrhiza",
        "Rimpang",
        "Hangat",
        "Meningkatkan nafsu makan",
        "Kurkumin dan xanthorrhizol",
        "Jawa Barat",
        "Direbus atau dijadikan jamu",
    ],
    [
        "Kunyit",
        "Curcuma longa",
        "Rimpang",
        "Netral",
        "Anti-inflamasi",
        "Kurkumin dan minyak atsiri",
        "Jawa Tengah",
        "Dihaluskan atau dijadikan minuman",
    ],
];

/// Quote a field if it contains a separator, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// The template: header plus three sample rows, newline separated.
pub fn csv_template() -> String {
    std::iter::once(csv_line(&CSV_TEMPLATE_HEADER))
        .chain(SAMPLE_ROWS.iter().map(|row| csv_line(row)))
        .collect::<Vec<_>>()
        .join("\n")
}
