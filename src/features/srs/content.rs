use crate::data::models::{ContentData, IntervalPreview, ReviewCard, ReviewContent};
use crate::features::srs::algorithm::preview_intervals;

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "（暂无资料）".to_string())
}

/// Renders the question and answer shown when a card comes up for review
pub fn render_review_content(card: &ReviewCard) -> ReviewContent {
    let mut hints = Vec::new();

    let (question, answer) = match &card.content_data {
        ContentData::Concept {
            title,
            description,
            category,
        } => {
            if let Some(category) = category {
                hints.push(format!("所属类别：{}", category));
            }
            (
                format!("请解释「{}」这一概念的含义。", title),
                or_unknown(description),
            )
        }
        ContentData::Character {
            title,
            pinyin,
            meaning,
        } => {
            if let Some(pinyin) = pinyin {
                hints.push(format!("拼音：{}", pinyin));
            }
            (
                format!("「{}」这个字的读音和含义是什么？", title),
                match (pinyin, meaning) {
                    (Some(p), Some(m)) => format!("{}：{}", p, m),
                    (None, Some(m)) => m.clone(),
                    (Some(p), None) => p.clone(),
                    (None, None) => or_unknown(&None),
                },
            )
        }
        ContentData::Quote {
            title,
            text,
            author,
        } => {
            let quote = text.as_deref().unwrap_or(title);
            (
                format!("「{}」这句话出自谁？", quote),
                or_unknown(author),
            )
        }
        ContentData::General { title, fields } => {
            for (key, value) in fields {
                if let Some(text) = value.as_str() {
                    hints.push(format!("{}：{}", key, text));
                }
            }
            (
                format!("请回忆「{}」的相关内容。", title),
                fields
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| title.clone()),
            )
        }
    };

    let intervals = preview_intervals(card)
        .into_iter()
        .map(|(outcome, interval)| IntervalPreview { outcome, interval })
        .collect();

    ReviewContent {
        card_id: card.card_id.clone(),
        content_type: card.content_type.to_string(),
        question,
        answer,
        hints,
        intervals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::ContentType;
    use chrono::NaiveDate;
    use serde_json::json;

    fn card(content_type: ContentType, payload: serde_json::Value) -> ReviewCard {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let data = ContentData::from_payload(&content_type, &payload).unwrap();
        ReviewCard::new("u1", "x", content_type, data, now)
    }

    #[test]
    fn test_concept_prompt() {
        let content = render_review_content(&card(
            ContentType::Concept,
            json!({"title": "仁", "description": "爱人", "category": "儒家"}),
        ));

        assert!(content.question.contains("「仁」"));
        assert_eq!(content.answer, "爱人");
        assert_eq!(content.hints, vec!["所属类别：儒家".to_string()]);
        assert_eq!(content.intervals.len(), 4);
    }

    #[test]
    fn test_quote_prompt_uses_text() {
        let content = render_review_content(&card(
            ContentType::Quote,
            json!({"title": "论语·学而", "text": "学而时习之", "author": "孔子"}),
        ));

        assert!(content.question.contains("学而时习之"));
        assert_eq!(content.answer, "孔子");
        assert!(content.hints.is_empty());
    }

    #[test]
    fn test_character_without_details() {
        let content = render_review_content(&card(ContentType::Character, json!({"title": "義"})));
        assert_eq!(content.answer, "（暂无资料）");
        assert_eq!(content.content_type, "character");
    }

    #[test]
    fn test_general_fields_become_hints() {
        let content = render_review_content(&card(
            ContentType::Other("idiom".into()),
            json!({"title": "守株待兔", "origin": "韩非子", "description": "比喻死守经验"}),
        ));

        assert_eq!(content.answer, "比喻死守经验");
        assert!(content.hints.contains(&"origin：韩非子".to_string()));
        assert_eq!(content.content_type, "idiom");
    }
}
