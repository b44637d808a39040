use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use skx_core::entities::SkillEvaluation;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a `skill_id:rating` pair. The rating range is checked by the engine.
pub fn parse_skill_evaluation(raw: &str) -> anyhow::Result<SkillEvaluation> {
    let (skill_id, rating) = raw
        .rsplit_once(':')
        .with_context(|| format!("invalid skill evaluation '{raw}': expected skill_id:rating"))?;
    let skill_id = skill_id.trim();
    if skill_id.is_empty() {
        anyhow::bail!("invalid skill evaluation '{raw}': missing skill id");
    }
    let rating = rating
        .trim()
        .parse::<u8>()
        .with_context(|| format!("invalid skill evaluation '{raw}': rating must be a number"))?;

    Ok(SkillEvaluation {
        skill_id: skill_id.to_string(),
        rating,
        feedback: None,
    })
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time into a UTC instant.
pub fn parse_schedule(date: &str, time: &str) -> anyhow::Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date}': expected YYYY-MM-DD"))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .with_context(|| format!("invalid time '{time}': expected HH:MM"))?;
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use skx_core::enums::{ConnectionStatus, Decision, EventType, SkillLevel};

    use super::{parse_enum, parse_schedule, parse_skill_evaluation};

    #[test]
    fn parses_snake_case_enum() {
        let status: ConnectionStatus = parse_enum("accepted", "status").expect("status should parse");
        assert_eq!(status, ConnectionStatus::Accepted);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Decision>("maybe", "decision").expect_err("should fail");
        assert!(err.to_string().contains("invalid decision 'maybe'"));
    }

    #[test]
    fn parses_skill_evaluation() {
        let eval = parse_skill_evaluation("skl-1:4").expect("should parse");
        assert_eq!(eval.skill_id, "skl-1");
        assert_eq!(eval.rating, 4);
        assert_eq!(eval.feedback, None);
    }

    #[test]
    fn out_of_range_rating_is_left_to_the_engine() {
        let eval = parse_skill_evaluation("skl-1:9").expect("should parse");
        assert_eq!(eval.rating, 9);
    }

    #[test]
    fn schedule_combines_date_and_time() {
        let at = parse_schedule("2026-11-02", " 18:30").expect("should parse");
        assert_eq!(at.to_rfc3339(), "2026-11-02T18:30:00+00:00");
    }

    #[test]
    fn rejects_malformed_schedule() {
        assert!(parse_schedule("02/11/2026", "18:30").is_err());
        assert!(parse_schedule("2026-11-02", "6pm").is_err());
    }

    #[test]
    fn parses_event_enums() {
        let level: SkillLevel = parse_enum("intermediate", "level").expect("level should parse");
        assert_eq!(level, SkillLevel::Intermediate);
        assert!(parse_enum::<EventType>("host", "event type").is_err());
    }

    #[test]
    fn rejects_malformed_evaluations() {
        for raw in ["skl-1", ":4", "skl-1:high", "skl-1:-1"] {
            assert!(parse_skill_evaluation(raw).is_err(), "{raw} should fail");
        }
    }
}
