use csv::{QuoteStyle, WriterBuilder};

use crate::error::AppError;
use crate::models::rsvp::Rsvp;

const HEADER: [&str; 8] = [
    "id",
    "name",
    "email",
    "attending",
    "guests",
    "dietary_restrictions",
    "message",
    "created_at",
];

/// Serializes the given rows to CSV: a header row plus one record per RSVP,
/// in the given order. Every field is double-quoted, with embedded quotes
/// doubled. NULL text fields serialize as the empty string, `attending` as
/// yes/no, timestamps as RFC 3339.
pub fn rsvps_to_csv(rsvps: &[Rsvp]) -> Result<String, AppError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    wtr.write_record(HEADER).map_err(csv_error)?;

    for rsvp in rsvps {
        wtr.write_record([
            rsvp.id.to_string(),
            rsvp.name.clone(),
            rsvp.email.clone(),
            if rsvp.attending { "yes" } else { "no" }.to_string(),
            rsvp.guests.to_string(),
            rsvp.dietary_restrictions.clone().unwrap_or_default(),
            rsvp.message.clone().unwrap_or_default(),
            rsvp.created_at.to_rfc3339(),
        ])
        .map_err(csv_error)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use csv::ReaderBuilder;

    use super::*;

    fn rsvp(id: i64, name: &str, attending: bool, guests: i32) -> Rsvp {
        Rsvp {
            id,
            name: name.into(),
            email: format!("guest{id}@example.com"),
            attending,
            guests,
            dietary_restrictions: None,
            message: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(id),
        }
    }

    #[test]
    fn empty_set_yields_header_only() {
        let csv = rsvps_to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "\"id\",\"name\",\"email\",\"attending\",\"guests\",\"dietary_restrictions\",\"message\",\"created_at\"\n"
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut row = rsvp(1, "Grace \"Amazing\" Hopper", true, 1);
        row.message = Some("she said \"hi\"".into());

        let csv = rsvps_to_csv(&[row]).unwrap();
        assert!(csv.contains("\"Grace \"\"Amazing\"\" Hopper\""));
        assert!(csv.contains("\"she said \"\"hi\"\"\""));
    }

    #[test]
    fn fields_with_commas_and_newlines_stay_in_one_record() {
        let mut row = rsvp(1, "Ada", true, 2);
        row.dietary_restrictions = Some("no nuts, no dairy".into());
        row.message = Some("line one\nline two".into());

        let csv = rsvps_to_csv(&[row]).unwrap();

        let mut rdr = ReaderBuilder::new().from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][5], "no nuts, no dairy");
        assert_eq!(&records[0][6], "line one\nline two");
    }

    #[test]
    fn round_trips_every_field() {
        let rows = vec![
            Rsvp {
                dietary_restrictions: Some("vegan".into()),
                message: Some("congrats \"you two\"!".into()),
                ..rsvp(1, "Ada Lovelace", true, 3)
            },
            rsvp(2, "Charles Babbage", false, 1),
        ];

        let csv = rsvps_to_csv(&rows).unwrap();

        let mut rdr = ReaderBuilder::new().from_reader(csv.as_bytes());
        assert_eq!(
            rdr.headers().unwrap(),
            &csv::StringRecord::from(HEADER.to_vec())
        );

        let parsed: Vec<Rsvp> = rdr
            .records()
            .map(|r| {
                let rec = r.unwrap();
                Rsvp {
                    id: rec[0].parse().unwrap(),
                    name: rec[1].into(),
                    email: rec[2].into(),
                    attending: &rec[3] == "yes",
                    guests: rec[4].parse().unwrap(),
                    dietary_restrictions: (!rec[5].is_empty()).then(|| rec[5].into()),
                    message: (!rec[6].is_empty()).then(|| rec[6].into()),
                    created_at: DateTime::parse_from_rfc3339(&rec[7])
                        .unwrap()
                        .with_timezone(&Utc),
                }
            })
            .collect();

        assert_eq!(parsed, rows);
    }

    #[test]
    fn rows_appear_in_the_given_order() {
        let rows = vec![rsvp(3, "c", true, 1), rsvp(2, "b", true, 1), rsvp(1, "a", true, 1)];
        let csv = rsvps_to_csv(&rows).unwrap();

        let ids: Vec<String> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap().trim_matches('"').to_string())
            .collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }
}
