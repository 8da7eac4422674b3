use bytes::BytesMut;
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};

/// One scraped cell: a cleaned number, raw text, or absent.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Num(f64),
    Text(String),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// One company's scraped fields, in page order. Keys are canonical labels
/// until [`table::reconcile`] renames them to column identifiers.
///
/// [`table::reconcile`]: super::table::reconcile
pub type Record = IndexMap<String, Value>;

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Num(num) => num.to_sql(ty, out),
            // date/time columns arrive pre-formatted by the reconciliation step
            Value::Text(text) => {
                if *ty == Type::DATE {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")?.to_sql(ty, out)
                } else if *ty == Type::TIME {
                    NaiveTime::parse_from_str(text, "%H:%M:%S")?.to_sql(ty, out)
                } else {
                    text.to_sql(ty, out)
                }
            }
        }
    }

    // the target column types are only known at runtime, so acceptance is
    // resolved inside to_sql instead
    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}
