use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::data::models::SrsError;

/// Kind of catalog content a card points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Concept,
    Character,
    Quote,
    General,
    Other(String), // Unknown tag, kept verbatim
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Concept => "concept",
            ContentType::Character => "character",
            ContentType::Quote => "quote",
            ContentType::General => "general",
            ContentType::Other(tag) => tag,
        }
    }

    /// Bonus added to the due-card priority
    pub fn priority_bonus(&self) -> f64 {
        match self {
            ContentType::Concept => 3.0,
            ContentType::Character => 2.0,
            _ => 0.0,
        }
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "concept" => ContentType::Concept,
            "character" => ContentType::Character,
            "quote" => ContentType::Quote,
            "general" => ContentType::General,
            _ => ContentType::Other(tag),
        }
    }
}

impl From<&str> for ContentType {
    fn from(tag: &str) -> Self {
        ContentType::from(tag.to_string())
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.as_str().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the catalog record, copied into the card at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentData {
    Concept {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    Character {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pinyin: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meaning: Option<String>,
    },
    Quote {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    General {
        title: String,
        #[serde(default)]
        fields: Map<String, Value>,
    },
}

fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ContentData {
    /// Builds the typed payload from the loose JSON object the catalog hands over.
    pub fn from_payload(content_type: &ContentType, payload: &Value) -> Result<Self, SrsError> {
        let object = payload.as_object().ok_or_else(|| {
            SrsError::InvalidArgument("content_data must be a JSON object".into())
        })?;

        let title = string_field(object, "title");
        let missing_title = || SrsError::InvalidArgument("content_data is missing a title".into());

        let data = match content_type {
            ContentType::Concept => ContentData::Concept {
                title: title.ok_or_else(missing_title)?,
                description: string_field(object, "description")
                    .or_else(|| string_field(object, "definition")),
                category: string_field(object, "category"),
            },
            ContentType::Character => ContentData::Character {
                title: title
                    .or_else(|| string_field(object, "character"))
                    .ok_or_else(missing_title)?,
                pinyin: string_field(object, "pinyin"),
                meaning: string_field(object, "meaning"),
            },
            ContentType::Quote => ContentData::Quote {
                title: title
                    .or_else(|| string_field(object, "text"))
                    .ok_or_else(missing_title)?,
                text: string_field(object, "text"),
                author: string_field(object, "author"),
            },
            ContentType::General | ContentType::Other(_) => {
                let mut fields = object.clone();
                fields.remove("title");
                ContentData::General {
                    title: title.ok_or_else(missing_title)?,
                    fields,
                }
            }
        };

        Ok(data)
    }

    pub fn title(&self) -> &str {
        match self {
            ContentData::Concept { title, .. }
            | ContentData::Character { title, .. }
            | ContentData::Quote { title, .. }
            | ContentData::General { title, .. } => title,
        }
    }
}

/// Review grade submitted by the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRepr", into = "u8")]
pub enum ReviewOutcome {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 4] = [
        ReviewOutcome::Again,
        ReviewOutcome::Hard,
        ReviewOutcome::Good,
        ReviewOutcome::Easy,
    ];

    /// Good and Easy count towards `correct_reviews`
    pub fn is_correct(self) -> bool {
        matches!(self, ReviewOutcome::Good | ReviewOutcome::Easy)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutcomeRepr {
    Grade(u8),
    Name(String),
}

impl TryFrom<u8> for ReviewOutcome {
    type Error = SrsError;

    fn try_from(grade: u8) -> Result<Self, Self::Error> {
        match grade {
            0 => Ok(ReviewOutcome::Again),
            1 => Ok(ReviewOutcome::Hard),
            2 => Ok(ReviewOutcome::Good),
            3 => Ok(ReviewOutcome::Easy),
            other => Err(SrsError::InvalidArgument(format!(
                "unknown review outcome grade {}",
                other
            ))),
        }
    }
}

impl TryFrom<&str> for ReviewOutcome {
    type Error = SrsError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name.to_ascii_lowercase().as_str() {
            "again" => Ok(ReviewOutcome::Again),
            "hard" => Ok(ReviewOutcome::Hard),
            "good" => Ok(ReviewOutcome::Good),
            "easy" => Ok(ReviewOutcome::Easy),
            _ => Err(SrsError::InvalidArgument(format!(
                "unknown review outcome '{}'",
                name
            ))),
        }
    }
}

impl TryFrom<OutcomeRepr> for ReviewOutcome {
    type Error = SrsError;

    fn try_from(repr: OutcomeRepr) -> Result<Self, Self::Error> {
        match repr {
            OutcomeRepr::Grade(grade) => ReviewOutcome::try_from(grade),
            OutcomeRepr::Name(name) => ReviewOutcome::try_from(name.as_str()),
        }
    }
}

impl From<ReviewOutcome> for u8 {
    fn from(outcome: ReviewOutcome) -> Self {
        outcome as u8
    }
}

/// The three fields the interval update rule rewrites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingState {
    pub easiness_factor: f64,
    pub interval: i32,
    pub repetitions: i32,
}

/// One learner's review schedule for one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub card_id: String,
    pub user_id: String,
    pub content_id: String,
    pub content_type: ContentType,
    pub content_title: String,
    pub content_data: ContentData,
    pub easiness_factor: f64,
    pub interval: i32,            // Days until next review
    pub repetitions: i32,
    pub next_review: NaiveDateTime,
    pub last_reviewed: Option<NaiveDateTime>,
    pub total_reviews: i32,
    pub correct_reviews: i32,
    pub average_response_time: f64, // Seconds, 0 until measured
    pub difficulty_rating: f64,
    pub created_at: NaiveDateTime,
}

fn escape_id_part(part: &str) -> String {
    part.replace('%', "%25").replace(':', "%3A")
}

pub const INITIAL_EASINESS: f64 = 2.5;
pub const INITIAL_INTERVAL: i32 = 1;

impl ReviewCard {
    /// `user:type:content`, with `%` and `:` percent-encoded inside each part
    /// so distinct keys never share an id
    pub fn card_id_for(user_id: &str, content_type: &ContentType, content_id: &str) -> String {
        format!(
            "{}:{}:{}",
            escape_id_part(user_id),
            escape_id_part(content_type.as_str()),
            escape_id_part(content_id)
        )
    }

    pub fn new(
        user_id: &str,
        content_id: &str,
        content_type: ContentType,
        content_data: ContentData,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            card_id: Self::card_id_for(user_id, &content_type, content_id),
            user_id: user_id.to_string(),
            content_id: content_id.to_string(),
            content_title: content_data.title().to_string(),
            content_type,
            content_data,
            easiness_factor: INITIAL_EASINESS,
            interval: INITIAL_INTERVAL,
            repetitions: 0,
            next_review: now + Duration::days(INITIAL_INTERVAL as i64),
            last_reviewed: None,
            total_reviews: 0,
            correct_reviews: 0,
            average_response_time: 0.0,
            difficulty_rating: 0.0,
            created_at: now,
        }
    }

    pub fn scheduling_state(&self) -> SchedulingState {
        SchedulingState {
            easiness_factor: self.easiness_factor,
            interval: self.interval,
            repetitions: self.repetitions,
        }
    }

    /// Fraction of correct reviews, 0 before the first review
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            0.0
        } else {
            self.correct_reviews as f64 / self.total_reviews as f64
        }
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.next_review
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_content_type_is_kept() {
        let content_type = ContentType::from("poem");
        assert_eq!(content_type, ContentType::Other("poem".into()));
        assert_eq!(content_type.as_str(), "poem");
        assert_eq!(content_type.priority_bonus(), 0.0);
    }

    #[test]
    fn test_character_payload_falls_back_to_character_field() {
        let data = ContentData::from_payload(
            &ContentType::Character,
            &json!({"character": "仁", "pinyin": "rén", "meaning": "benevolence"}),
        )
        .unwrap();

        assert_eq!(data.title(), "仁");
        assert!(matches!(data, ContentData::Character { pinyin: Some(ref p), .. } if p == "rén"));
    }

    #[test]
    fn test_payload_without_title_is_rejected() {
        let err = ContentData::from_payload(&ContentType::Concept, &json!({"category": "儒家"}))
            .unwrap_err();
        assert!(matches!(err, SrsError::InvalidArgument(_)));

        let err = ContentData::from_payload(&ContentType::General, &json!("not an object"))
            .unwrap_err();
        assert!(matches!(err, SrsError::InvalidArgument(_)));
    }

    #[test]
    fn test_general_payload_keeps_extra_fields() {
        let data = ContentData::from_payload(
            &ContentType::Other("idiom".into()),
            &json!({"title": "画蛇添足", "origin": "战国策"}),
        )
        .unwrap();

        match data {
            ContentData::General { title, fields } => {
                assert_eq!(title, "画蛇添足");
                assert_eq!(fields.get("origin"), Some(&json!("战国策")));
                assert!(fields.get("title").is_none());
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_outcome_accepts_grade_or_name() {
        let good: ReviewOutcome = serde_json::from_value(json!(2)).unwrap();
        let easy: ReviewOutcome = serde_json::from_value(json!("Easy")).unwrap();
        assert_eq!(good, ReviewOutcome::Good);
        assert_eq!(easy, ReviewOutcome::Easy);
        assert!(serde_json::from_value::<ReviewOutcome>(json!(7)).is_err());
        assert!(serde_json::from_value::<ReviewOutcome>(json!("perfect")).is_err());
        assert_eq!(serde_json::to_value(ReviewOutcome::Hard).unwrap(), json!(1));
    }

    #[test]
    fn test_card_ids_do_not_collide_across_users() {
        let a = ReviewCard::card_id_for("u:concept:x", &ContentType::Concept, "y");
        let b = ReviewCard::card_id_for("u", &ContentType::Concept, "x:concept:y");
        assert_ne!(a, b);
        assert_eq!(b, "u:concept:x%3Aconcept%3Ay");

        let literal = ReviewCard::card_id_for("u%3A", &ContentType::Concept, "z");
        let colon = ReviewCard::card_id_for("u:", &ContentType::Concept, "z");
        assert_ne!(literal, colon);
        assert_eq!(
            ReviewCard::card_id_for("u1", &ContentType::Other("a:b".into()), "c"),
            "u1:a%3Ab:c"
        );
    }

    #[test]
    fn test_new_card_defaults() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let data = ContentData::from_payload(&ContentType::Quote, &json!({"title": "学而时习之"}))
            .unwrap();
        let card = ReviewCard::new("u1", "q-7", ContentType::Quote, data, now);

        assert_eq!(card.card_id, "u1:quote:q-7");
        assert_eq!(card.easiness_factor, 2.5);
        assert_eq!(card.interval, 1);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.next_review, now + Duration::days(1));
        assert_eq!(card.accuracy(), 0.0);
        assert!(card.last_reviewed.is_none());
    }
}
