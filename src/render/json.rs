use anyhow::Result;
use serde_json::{Map, Value};

use super::{Renderer, Table};
use crate::fields::OutputField;

/// Array of objects, one per row, keys are the field titles. Keys come
/// out sorted and the document is pretty-printed with two-space indent.
pub struct JsonTable;

/// license-finder compatible output: exactly {name, version, licenses}
/// per record, compact, regardless of which columns were projected.
pub struct JsonLicenseFinderTable;

impl Renderer for JsonTable {
    fn render(&self, table: &Table) -> Result<String> {
        let rows: Vec<Value> = table
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (field, value) in table.fields.iter().zip(row) {
                    object.insert(field.title().to_string(), field_value(*field, value));
                }
                Value::Object(object)
            })
            .collect();

        Ok(serde_json::to_string_pretty(&Value::Array(rows))?)
    }
}

impl Renderer for JsonLicenseFinderTable {
    fn render(&self, table: &Table) -> Result<String> {
        let rows: Vec<Value> = table
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (field, value) in table.fields.iter().zip(row) {
                    match field {
                        OutputField::Name => {
                            object.insert("name".to_string(), Value::String(value.clone()));
                        }
                        OutputField::Version => {
                            object.insert("version".to_string(), Value::String(value.clone()));
                        }
                        OutputField::License => {
                            object.insert(
                                "licenses".to_string(),
                                Value::Array(vec![Value::String(value.clone())]),
                            );
                        }
                        _ => {}
                    }
                }
                Value::Object(object)
            })
            .collect();

        Ok(serde_json::to_string(&Value::Array(rows))?)
    }
}

// Count is a number in JSON output; everything else stays a string.
fn field_value(field: OutputField, value: &str) -> Value {
    if field == OutputField::Count {
        if let Ok(count) = value.parse::<u64>() {
            return Value::Number(count.into());
        }
    }
    Value::String(value.to_string())
}
