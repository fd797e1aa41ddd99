use serde_json::{Map, Value};

use crate::input::{RecordSchema, invalid_input_error};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum InputFormat {
    JsonArray,
    Csv,
}

impl InputFormat {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::JsonArray => "json_array",
            Self::Csv => "csv",
        }
    }
}

/// One input record before field checks, numbered from 1.
#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub(crate) row: i64,
    pub(crate) fields: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedSource {
    pub(crate) format: InputFormat,
    pub(crate) rows: Vec<RawRow>,
}

pub(crate) fn parse_source(schema: &RecordSchema, content: &str) -> ClientResult<ParsedSource> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error(&format!(
            "The {} source is empty.",
            schema.source
        )));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_input_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            schema.source,
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(schema, trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_input_format(
            &format!(
                "JSON input for {} must be a top-level array of objects.",
                schema.source
            ),
            schema.source,
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(schema, trimmed);
    }

    Err(ClientError::invalid_input_format(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        schema.source,
        "unknown",
    ))
}

fn parse_json_array(schema: &RecordSchema, content: &str) -> ClientResult<ParsedSource> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        ClientError::invalid_input_format(
            &format!(
                "Invalid JSON input for {}. Provide a valid JSON array.",
                schema.source
            ),
            schema.source,
            "invalid_json",
        )
    })?;

    let Value::Array(items) = parsed else {
        return Err(ClientError::invalid_input_format(
            &format!(
                "JSON input for {} must be a top-level array of objects.",
                schema.source
            ),
            schema.source,
            "json_non_array",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(invalid_input_error(&format!(
                "JSON array entries for {} must all be objects.",
                schema.source
            )));
        };
        rows.push(RawRow {
            row: (index as i64) + 1,
            fields,
        });
    }

    Ok(ParsedSource {
        format: InputFormat::JsonArray,
        rows,
    })
}

fn parse_csv(schema: &RecordSchema, content: &str) -> ClientResult<ParsedSource> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let missing_required = schema
        .required_headers
        .iter()
        .any(|required| !schema.has_header(&headers, required));
    if missing_required {
        return Err(ClientError::input_schema_mismatch(
            schema.source,
            schema.all_headers(),
            headers,
        ));
    }

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        // Empty cells count as missing fields.
        let fields = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(header, value)| (header.clone(), Value::String(value.to_string())))
            .collect::<Map<String, Value>>();

        rows.push(RawRow {
            row: (row_index as i64) + 1,
            fields,
        });
    }

    Ok(ParsedSource {
        format: InputFormat::Csv,
        rows,
    })
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim())
            .map(|value| value.is_object())
            .unwrap_or(false)
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{InputFormat, parse_source};
    use crate::input::{EXPENSES_SCHEMA, SALES_SCHEMA};

    #[test]
    fn json_arrays_keep_nested_fields() {
        let parsed = parse_source(
            &SALES_SCHEMA,
            r#"[{"_id":"s1","date":"2024-01-05","totalPrice":45000,"items":[{"name":"Ring","price":45000}]}]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(source) = parsed {
            assert_eq!(source.format, InputFormat::JsonArray);
            assert_eq!(source.rows.len(), 1);
            assert_eq!(source.rows[0].row, 1);
            assert!(source.rows[0].fields.get("items").is_some_and(Value::is_array));
        }
    }

    #[test]
    fn csv_rows_drop_empty_cells() {
        let parsed = parse_source(
            &EXPENSES_SCHEMA,
            "id,name,type,price,currency,created_at,description\n\
             e1,Ads,instagram_ad,5000,,2024-01-10,\n\
             e2,Shipping,other,20,USD,2024-02-01,boxes\n",
        );
        assert!(parsed.is_ok());
        if let Ok(source) = parsed {
            assert_eq!(source.format, InputFormat::Csv);
            assert_eq!(source.rows.len(), 2);
            assert!(source.rows[0].fields.get("currency").is_none());
            assert_eq!(
                source.rows[1].fields.get("currency"),
                Some(&Value::String("USD".to_string()))
            );
        }
    }

    #[test]
    fn csv_without_required_headers_is_a_schema_mismatch() {
        let parsed = parse_source(&SALES_SCHEMA, "id,city\ns1,Bogota\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "input_schema_mismatch");
        }
    }

    #[test]
    fn csv_accepts_api_header_spellings() {
        let parsed = parse_source(
            &SALES_SCHEMA,
            "_id,date,totalPrice\ns1,2024-01-05,45000\n",
        );
        assert!(parsed.is_ok());
        if let Ok(source) = parsed {
            assert_eq!(
                source.rows[0].fields.get("totalPrice"),
                Some(&Value::String("45000".to_string()))
            );
        }

        let parsed = parse_source(
            &EXPENSES_SCHEMA,
            "type,price,createdAt\nother,0,2024-01-10\n",
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn rejects_ndjson_and_non_array_json() {
        let ndjson = parse_source(
            &SALES_SCHEMA,
            "{\"date\":\"2024-01-01\"}\n{\"date\":\"2024-01-02\"}\n",
        );
        assert!(ndjson.is_err());
        if let Err(error) = ndjson {
            assert_eq!(error.code, "invalid_input_format");
        }

        let object = parse_source(&SALES_SCHEMA, r#"{"sales": []}"#);
        assert!(object.is_err());
        if let Err(error) = object {
            assert_eq!(error.code, "invalid_input_format");
        }

        let truncated = parse_source(&SALES_SCHEMA, r#"[{"date": "2024-01-01","#);
        assert!(truncated.is_err());
        if let Err(error) = truncated {
            assert_eq!(error.code, "invalid_input_format");
            assert_eq!(
                error.data.as_ref().map(|data| data["received_format"].clone()),
                Some(Value::String("invalid_json".to_string()))
            );
        }
    }
}
