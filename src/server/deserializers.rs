use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

// clients send ids both as JSON numbers and as strings taken from form values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NumberOrString")]
pub struct Stri64(pub i64);

impl TryFrom<NumberOrString> for Stri64 {
    type Error = String;

    fn try_from(value: NumberOrString) -> Result<Self, Self::Error> {
        match value {
            NumberOrString::Number(v) => Ok(Stri64(v)),
            NumberOrString::Text(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(Stri64(v)),
                Err(_) => Err(format!("Wrong value {text}, can not parse to i64")),
            },
        }
    }
}

// `?page=abc` is served as the first page rather than rejected
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        id: Stri64,
        #[serde(default)]
        ids: Vec<Stri64>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let body: Body = serde_json::from_str(r#"{"id": "4", "ids": [1, "2"]}"#).unwrap();
        assert_eq!(body.id, Stri64(4));
        assert_eq!(body.ids, vec![Stri64(1), Stri64(2)]);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Body>(r#"{"id": "four"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"id": true}"#).is_err());
    }
}
