use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use super::pagination::DEFAULT_PAGE;

// query strings only carry text; a page that doesn't parse is the first page
pub fn parse_page(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(DEFAULT_PAGE)
}

// the quiz frontend sends the whole category object (with its id as a string),
// other clients send just the id
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRef {
    Id(#[serde(deserialize_with = "deserialize_number_from_string")] i64),
    Object {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        id: i64,
    },
}

pub fn deserialize_category_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match CategoryRef::deserialize(deserializer)? {
        CategoryRef::Id(id) | CategoryRef::Object { id } => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Deserialize)]
    struct Quiz {
        #[serde(deserialize_with = "deserialize_category_id")]
        quiz_category: i64,
    }

    #[rstest]
    #[case("3", 3)]
    #[case(" 2 ", 2)]
    #[case("abc", 1)]
    #[case("", 1)]
    #[case("-2", -2)]
    fn page_falls_back_to_first(#[case] value: &str, #[case] expected: i64) {
        assert_eq!(parse_page(value), expected);
    }

    #[rstest]
    #[case(r#"{"quiz_category": 4}"#, 4)]
    #[case(r#"{"quiz_category": "4"}"#, 4)]
    #[case(r#"{"quiz_category": {"type": "Art", "id": "2"}}"#, 2)]
    #[case(r#"{"quiz_category": {"type": "Art", "id": 2}}"#, 2)]
    fn category_id_from_any_shape(#[case] body: &str, #[case] expected: i64) {
        let quiz: Quiz = serde_json::from_str(body).unwrap();
        assert_eq!(quiz.quiz_category, expected);
    }

    #[rstest]
    #[case(r#"{"quiz_category": "science"}"#)]
    #[case(r#"{"quiz_category": {"type": "Art"}}"#)]
    #[case(r#"{"quiz_category": null}"#)]
    fn bad_category_id_is_rejected(#[case] body: &str) {
        assert!(serde_json::from_str::<Quiz>(body).is_err());
    }
}
